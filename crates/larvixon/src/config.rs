//! Command line configuration for the Larvixon patients service.
//!
//! Every global option can also be supplied through the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LARVIXON_DATABASE_URL` | data/patients.db | SQLite database path, or `:memory:` |
//! | `LARVIXON_LOG_LEVEL` | info | Log level |
//! | `LARVIXON_RNG_SEED` | (entropy) | Seed for the synthetic patient generator |
//! | `LARVIXON_NATIONAL_ID_PROBABILITY` | 0.1 | Share of generated patients given a PESEL |

use clap::{Args, Parser, Subcommand};
use larvixon_persistence::PatientSearch;
use larvixon_persistence::backends::sqlite::MEMORY_PATH;
use larvixon_persistence::generator::GeneratorConfig;
use larvixon_persistence::seed::DEFAULT_SEED_COUNT;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration for a single `larvixon` invocation.
#[derive(Debug, Clone, Parser)]
#[command(name = "larvixon")]
#[command(version, about = "Larvixon patients service")]
pub struct CliConfig {
    /// SQLite database path (`:memory:` for a throwaway store).
    #[arg(
        long,
        global = true,
        env = "LARVIXON_DATABASE_URL",
        default_value = "data/patients.db"
    )]
    pub database_url: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, env = "LARVIXON_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Seed for the synthetic patient generator. Unset draws from OS entropy.
    #[arg(long, global = true, env = "LARVIXON_RNG_SEED")]
    pub rng_seed: Option<u64>,

    /// Probability that a generated patient carries a PESEL.
    #[arg(
        long,
        global = true,
        env = "LARVIXON_NATIONAL_ID_PROBABILITY",
        default_value = "0.1"
    )]
    pub national_id_probability: f64,

    #[command(subcommand)]
    pub command: Command,
}

/// Administrative and query commands.
#[derive(Debug, Clone, Default, PartialEq, Subcommand)]
pub enum Command {
    /// Create the schema and seed patients if the store is empty.
    Init,
    /// Seed synthetic patients in a single transaction.
    Seed {
        /// Number of patients to create.
        #[arg(default_value_t = DEFAULT_SEED_COUNT)]
        count: usize,
    },
    /// Delete every patient.
    Clear,
    /// Print stored records as JSON lines.
    List {
        /// Maximum number of records to print.
        #[arg(default_value_t = 10)]
        limit: usize,
    },
    /// Search patients and print a searchset bundle.
    Search(SearchArgs),
    /// Print one patient by external id.
    Read {
        /// External patient id.
        guid: String,
    },
    /// Print a searchset bundle for several external ids.
    Batch {
        /// External patient ids.
        #[arg(required = true)]
        guids: Vec<String>,
    },
    /// Check that the store is reachable.
    #[default]
    Health,
}

impl Command {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Init => "init",
            Command::Seed { .. } => "seed",
            Command::Clear => "clear",
            Command::List { .. } => "list",
            Command::Search(_) => "search",
            Command::Read { .. } => "read",
            Command::Batch { .. } => "batch",
            Command::Health => "health",
        }
    }
}

/// Search criteria accepted on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct SearchArgs {
    /// Substring of the given name.
    #[arg(long)]
    pub first_name: Option<String>,

    /// Substring of the family name.
    #[arg(long)]
    pub last_name: Option<String>,

    /// Substring of the PESEL.
    #[arg(long)]
    pub pesel: Option<String>,

    /// Free-text term matched against every field.
    #[arg(long, conflicts_with_all = ["first_name", "last_name", "pesel"])]
    pub term: Option<String>,
}

impl SearchArgs {
    /// Builds store criteria from the arguments.
    pub fn criteria(&self) -> PatientSearch {
        if let Some(term) = &self.term {
            return PatientSearch::term(term.clone());
        }
        PatientSearch {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            national_id: self.pesel.clone(),
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            database_url: "data/patients.db".to_string(),
            log_level: "info".to_string(),
            rng_seed: None,
            national_id_probability: 0.1,
            command: Command::default(),
        }
    }
}

impl CliConfig {
    /// Returns true when the store lives only in memory.
    pub fn is_memory(&self) -> bool {
        self.database_url == MEMORY_PATH
    }

    /// Generator settings derived from the command line.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::default().with_national_id_probability(self.national_id_probability)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("Database URL cannot be empty".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "Log level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }

        if let Err(e) = self.generator_config().validate() {
            errors.push(e.to_string());
        }

        match &self.command {
            Command::Seed { count: 0 } => {
                errors.push("Seed count must be greater than 0".to_string());
            }
            Command::List { limit: 0 } => {
                errors.push("List limit must be greater than 0".to_string());
            }
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses an in-memory store and a fixed generator seed.
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            database_url: MEMORY_PATH.to_string(),
            log_level: "debug".to_string(),
            rng_seed: Some(42),
            ..Default::default()
        }
    }
}
