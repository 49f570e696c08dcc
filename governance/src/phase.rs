//! The phase state machine.
//!
//! A pure function over a proposal's captured schedule. Phases are visited
//! strictly in order, each exactly once; there is no skipping or reordering.

use agora_settings::PhaseEntry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a successful step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// Index of the phase being entered.
    pub index: usize,
    /// Whether entering it opens a referendum.
    pub spawns_referendum: bool,
    /// Whether it is the final phase of the schedule.
    pub is_last: bool,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no phase after index {current} in a schedule of {len}")]
pub struct NoNextPhase {
    pub current: usize,
    pub len: usize,
}

/// Compute the phase that follows `current`.
pub fn next_phase(phases: &[PhaseEntry], current: usize) -> Result<PhaseTransition, NoNextPhase> {
    let index = current.saturating_add(1);
    let entry = phases.get(index).ok_or(NoNextPhase {
        current,
        len: phases.len(),
    })?;
    Ok(PhaseTransition {
        index,
        spawns_referendum: entry.phase_type.spawns_referendum(),
        is_last: index + 1 == phases.len(),
    })
}
