//! Chain clock trait.

use agora_types::Timestamp;

/// Source of the current chain timestamp.
pub trait ChainClock {
    fn now(&self) -> Timestamp;
}

/// Clock backed by the system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ChainClock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
