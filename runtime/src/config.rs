//! Runtime configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use agora_settings::{ParamValue, PhaseEntry};
use agora_types::{AccountName, Asset, ProposalType, Symbol};

use crate::RuntimeError;

/// Configuration for a governance runtime.
///
/// Can be loaded from a TOML file via [`RuntimeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Account allowed to change phase schedules and general parameters.
    #[serde(default = "default_admin")]
    pub admin: AccountName,

    /// The proposals contract account; finishes, holds and resumes referendums.
    #[serde(default = "default_proposals_account")]
    pub proposals_account: AccountName,

    /// Where the daemon keeps its state snapshot.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Governance token: stake checks and voting eligibility use this symbol.
    #[serde(default = "default_token")]
    pub token: Symbol,

    /// Settings and balances applied when the state is first created.
    #[serde(default)]
    pub genesis: GenesisConfig,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenesisConfig {
    #[serde(default)]
    pub schedules: Vec<GenesisSchedule>,
    #[serde(default)]
    pub params: Vec<GenesisParam>,
    /// Opening balances of the in-memory ledger.
    #[serde(default)]
    pub balances: Vec<GenesisBalance>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenesisSchedule {
    pub proposal_type: ProposalType,
    pub phases: Vec<PhaseEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenesisParam {
    pub scope: String,
    pub setting: String,
    pub value: ParamValue,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenesisBalance {
    pub account: AccountName,
    pub balance: Asset,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_admin() -> AccountName {
    AccountName::new("eosio")
}

fn default_proposals_account() -> AccountName {
    AccountName::new("proposals")
}

fn default_token() -> Symbol {
    Symbol::new("EOS", 4)
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./agora_state.bin")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl RuntimeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, RuntimeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RuntimeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RuntimeError> {
        let config: Self = toml::from_str(s).map_err(|e| RuntimeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, RuntimeError> {
        toml::to_string_pretty(self).map_err(|e| RuntimeError::Config(e.to_string()))
    }

    /// Check account names and the token symbol. Schedules and parameters
    /// are checked when they are applied.
    pub fn validate(&self) -> Result<(), RuntimeError> {
        for account in [&self.admin, &self.proposals_account] {
            if !account.is_valid() {
                return Err(RuntimeError::Config(format!("invalid account name {account}")));
            }
        }
        if !self.token.is_valid() {
            return Err(RuntimeError::Config(format!("invalid token symbol {}", self.token)));
        }
        for entry in &self.genesis.balances {
            if entry.balance.symbol() != &self.token {
                return Err(RuntimeError::Config(format!(
                    "genesis balance of {} is not in {}",
                    entry.account, self.token
                )));
            }
        }
        Ok(())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            admin: default_admin(),
            proposals_account: default_proposals_account(),
            token: default_token(),
            state_file: default_state_file(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            genesis: GenesisConfig::default(),
        }
    }
}
