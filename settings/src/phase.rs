//! Phase schedule entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Behaviour tag of a phase. Only `Voting` phases open a referendum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseType {
    /// Placeholder for "no phase"; never valid inside a schedule.
    #[serde(rename = "nophase")]
    NoPhase,
    /// Drafting / discussion: the creator may still edit the proposal.
    Draft,
    /// Open debate without a vote.
    Dialog,
    /// Entering this phase opens a referendum.
    Voting,
}

impl PhaseType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoPhase => "nophase",
            Self::Draft => "draft",
            Self::Dialog => "dialog",
            Self::Voting => "voting",
        }
    }

    pub fn spawns_referendum(&self) -> bool {
        matches!(self, Self::Voting)
    }
}

impl fmt::Display for PhaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step of a phase schedule.
///
/// `name` is free text chosen by the administrator ("discussion", "debate",
/// "prevote", ...); the engine never interprets it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseEntry {
    pub name: String,
    pub duration_days: u32,
    #[serde(rename = "type")]
    pub phase_type: PhaseType,
}

impl PhaseEntry {
    pub fn new(name: impl Into<String>, duration_days: u32, phase_type: PhaseType) -> Self {
        Self {
            name: name.into(),
            duration_days,
            phase_type,
        }
    }
}

impl fmt::Display for PhaseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}d,{})", self.name, self.duration_days, self.phase_type)
    }
}

/// Check that a schedule can drive a proposal.
///
/// Returns a description of the first problem found.
pub(crate) fn validate_schedule(phases: &[PhaseEntry]) -> Result<(), String> {
    let first = phases.first().ok_or("schedule has no phases")?;
    if first.phase_type.spawns_referendum() {
        return Err(format!(
            "first phase {} must be a discussion phase, not a voting phase",
            first.name
        ));
    }
    for (i, phase) in phases.iter().enumerate() {
        if phase.name.trim().is_empty() {
            return Err(format!("phase {i} has an empty name"));
        }
        if phase.phase_type == PhaseType::NoPhase {
            return Err(format!("phase {} has type nophase", phase.name));
        }
        if phases[..i].iter().any(|p| p.name == phase.name) {
            return Err(format!("phase name {} is used twice", phase.name));
        }
    }
    Ok(())
}
