//! Agora daemon: entry point for operating a governance state file.

use agora_governance::ProposalStatus;
use agora_host::{ChainClock, SignerSet, SystemClock};
use agora_nullables::NullLedger;
use agora_runtime::{
    Action, ActionReceipt, GovernanceState, Runtime, RuntimeConfig, Transaction,
};
use agora_types::{AccountName, ProposalId, ReferendumId, Timestamp};
use agora_utils::{init_logging, time_until, LogFormat};
use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agora-daemon", about = "Agora on-chain governance engine")]
struct Cli {
    /// Path to a TOML configuration file. Without one, built-in defaults
    /// are used (admin "eosio", token 4,EOS, no genesis settings).
    #[arg(long, env = "AGORA_CONFIG")]
    config: Option<PathBuf>,

    /// State snapshot file; overrides the config's `state_file`.
    #[arg(long, env = "AGORA_STATE_FILE")]
    state: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "AGORA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "AGORA_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create a fresh state file from the config's genesis section.
    Init {
        /// Overwrite an existing state file.
        #[arg(long)]
        force: bool,
    },
    /// Execute one action and persist the result.
    Submit {
        /// Account signing the transaction; repeat for several signers.
        #[arg(long = "signer", required = true)]
        signers: Vec<String>,

        /// The action as JSON, e.g. '{"action":"move","proposal_id":1}'.
        #[arg(long)]
        action: String,

        /// Execute at this unix time instead of the wall clock.
        #[arg(long)]
        at: Option<u64>,
    },
    /// Print part of the state as JSON.
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(clap::Subcommand)]
enum ShowTarget {
    Proposal { id: u64 },
    Referendum { id: u64 },
    /// Proposals with the given status: open, accepted, rejected, completed.
    Proposals {
        #[arg(value_parser = parse_status)]
        status: ProposalStatus,
    },
    /// Referendums opened for a proposal.
    Referendums { proposal_id: u64 },
}

fn parse_status(s: &str) -> Result<ProposalStatus, String> {
    match s.to_ascii_lowercase().as_str() {
        "open" => Ok(ProposalStatus::Open),
        "accepted" => Ok(ProposalStatus::Accepted),
        "rejected" => Ok(ProposalStatus::Rejected),
        "completed" => Ok(ProposalStatus::Completed),
        other => Err(format!("unknown proposal status {other}")),
    }
}

/// The wall clock, or a fixed instant when `--at` is given.
enum DaemonClock {
    System(SystemClock),
    Fixed(Timestamp),
}

impl ChainClock for DaemonClock {
    fn now(&self) -> Timestamp {
        match self {
            Self::System(clock) => clock.now(),
            Self::Fixed(at) => *at,
        }
    }
}

/// The in-memory ledger seeded from the config's genesis balances.
fn genesis_ledger(config: &RuntimeConfig) -> NullLedger {
    config
        .genesis
        .balances
        .iter()
        .fold(NullLedger::new(), |ledger, entry| {
            ledger.with_balance(entry.account.clone(), entry.balance.clone())
        })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let path = path.to_string_lossy();
            RuntimeConfig::from_toml_file(&path)
                .with_context(|| format!("loading config from {path}"))?
        }
        None => RuntimeConfig::default(),
    };
    if let Some(state) = cli.state {
        config.state_file = state;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    let format: LogFormat = config.log_format.parse()?;
    init_logging(format, &config.log_level)?;
    if let Some(path) = &cli.config {
        tracing::info!(path = %path.display(), "loaded config");
    }

    match cli.command {
        Command::Init { force } => {
            if config.state_file.exists() && !force {
                bail!(
                    "{} already exists; pass --force to overwrite it",
                    config.state_file.display()
                );
            }
            let runtime = Runtime::bootstrap(&config, genesis_ledger(&config), SystemClock)?;
            runtime.state().save(&config.state_file)?;
            tracing::info!(path = %config.state_file.display(), "state file initialised");
        }
        Command::Submit {
            signers,
            action,
            at,
        } => {
            let action = Action::from_json(&action)?;
            let signers: SignerSet = signers.into_iter().map(AccountName::new).collect();
            let clock = match at {
                Some(secs) => DaemonClock::Fixed(Timestamp::new(secs)),
                None => DaemonClock::System(SystemClock),
            };
            let state = GovernanceState::load(&config.state_file)
                .with_context(|| format!("reading {}", config.state_file.display()))?;

            let mut runtime = Runtime::new(state, genesis_ledger(&config), clock);
            let receipt = runtime.execute(Transaction::new(signers, action))?;
            runtime.state().save(&config.state_file)?;
            if let ActionReceipt::Moved(moved) = &receipt {
                tracing::info!(
                    proposal_id = %moved.proposal_id,
                    phase = %moved.phase,
                    deadline = %time_until(moved.deadline, runtime.clock().now()),
                    "phase entered"
                );
            }
            print_json(&receipt)?;
        }
        Command::Show { what } => {
            let state = GovernanceState::load(&config.state_file)
                .with_context(|| format!("reading {}", config.state_file.display()))?;
            match what {
                ShowTarget::Proposal { id } => {
                    let Some(proposal) = state.proposals.get(ProposalId::new(id)) else {
                        bail!("proposal {id} not found");
                    };
                    if proposal.is_open() {
                        tracing::info!(
                            proposal_id = %proposal.id,
                            phase = %proposal.current().name,
                            deadline = %time_until(proposal.deadline, SystemClock.now()),
                            "current phase"
                        );
                    }
                    print_json(proposal)?;
                }
                ShowTarget::Referendum { id } => {
                    let Some(referendum) = state.referendums.get(ReferendumId::new(id)) else {
                        bail!("referendum {id} not found");
                    };
                    print_json(referendum)?;
                }
                ShowTarget::Proposals { status } => {
                    print_json(&state.proposals.with_status(status))?;
                }
                ShowTarget::Referendums { proposal_id } => {
                    print_json(&state.referendums.for_proposal(ProposalId::new(proposal_id)))?;
                }
            }
        }
    }

    Ok(())
}
