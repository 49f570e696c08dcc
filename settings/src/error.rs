use agora_host::HostError;
use agora_types::ProposalType;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error(transparent)]
    Authorization(#[from] HostError),

    #[error("no phase schedule configured for proposal type {0}")]
    ScheduleNotConfigured(ProposalType),

    #[error("general parameter {scope}/{setting} is not configured")]
    ParamNotConfigured { scope: String, setting: String },

    #[error("invalid phase schedule: {0}")]
    InvalidSchedule(String),

    #[error("general parameter {scope}/{setting} is not {expected}")]
    InvalidParam {
        scope: String,
        setting: String,
        expected: &'static str,
    },
}

impl SettingsError {
    /// Whether this is one of the "not configured" lookups.
    pub fn is_not_configured(&self) -> bool {
        matches!(
            self,
            Self::ScheduleNotConfigured(_) | Self::ParamNotConfigured { .. }
        )
    }
}
