//! Larvixon patients service
//!
//! Command line front end: schema setup, synthetic seeding, and FHIR
//! search and retrieval over the patient store.

mod config;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use config::{CliConfig, Command};
use larvixon_patients::PatientService;
use larvixon_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig};
use larvixon_persistence::core::{Backend, PatientStorage};
use larvixon_persistence::generator::PatientGenerator;
use larvixon_persistence::seed::{DEFAULT_SEED_COUNT, seed_if_empty, seed_patients};
use larvixon_persistence::StorageError;
use serde::Serialize;

/// Exit code for a read of an unknown patient.
const EXIT_NOT_FOUND: i32 = 2;

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "larvixon={level},larvixon_persistence={level},larvixon_patients={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Opens the SQLite store named by the configuration and creates its schema.
fn create_sqlite_backend(config: &CliConfig) -> anyhow::Result<SqliteBackend> {
    let db_path = config.database_url.as_str();
    info!(database = %db_path, "Initializing SQLite backend");

    if !config.is_memory() {
        if let Some(parent) = Path::new(db_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let backend = SqliteBackend::with_config(db_path, SqliteBackendConfig::default())?;
    backend.init_schema()?;

    Ok(backend)
}

/// Builds the synthetic patient generator.
fn create_generator(config: &CliConfig) -> anyhow::Result<PatientGenerator> {
    let rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(PatientGenerator::with_config(rng, config.generator_config())?)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(config: &CliConfig, backend: SqliteBackend) -> anyhow::Result<()> {
    let backend = Arc::new(backend);
    let service = PatientService::new(Arc::clone(&backend));

    match &config.command {
        Command::Init => {
            let mut generator = create_generator(config)?;
            let created = seed_if_empty(backend.as_ref(), &mut generator, DEFAULT_SEED_COUNT).await?;
            println!("Store ready, {} patients seeded", created);
        }
        Command::Seed { count } => {
            let mut generator = create_generator(config)?;
            let created = seed_patients(backend.as_ref(), &mut generator, *count).await?;
            println!("Seeded {} patients", created);
        }
        Command::Clear => {
            let deleted = backend.clear().await?;
            println!("Deleted {} patients", deleted);
        }
        Command::List { limit } => {
            for record in backend.list(*limit).await? {
                println!("{}", serde_json::to_string(&record)?);
            }
        }
        Command::Search(args) => {
            print_json(&service.search(&args.criteria()).await?)?;
        }
        Command::Read { guid } => {
            print_json(&service.get_by_external_id(guid).await?)?;
        }
        Command::Batch { guids } => {
            print_json(&service.get_by_external_ids(guids).await?)?;
        }
        Command::Health => {
            backend.health_check().await?;
            let count = backend.count().await?;
            print_json(&serde_json::json!({
                "status": "ok",
                "backend": backend.name(),
                "patients": count,
            }))?;
        }
    }

    Ok(())
}

fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<StorageError>()
        .is_some_and(StorageError::is_not_found)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        command = config.command.name(),
        database = %config.database_url,
        rng_seed = ?config.rng_seed,
        "Starting Larvixon patients service"
    );

    let backend = create_sqlite_backend(&config)?;

    match run(&config, backend).await {
        Err(e) if is_not_found(&e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_NOT_FOUND);
        }
        result => result,
    }
}

#[cfg(not(feature = "sqlite"))]
compile_error!("The sqlite backend feature must be enabled");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn memory_backend() -> SqliteBackend {
        create_sqlite_backend(&CliConfig::for_testing()).unwrap()
    }

    fn count_of(value: &Value) -> u64 {
        value["total"].as_u64().unwrap()
    }

    #[tokio::test]
    async fn test_init_seeds_empty_store_once() {
        let config = CliConfig {
            command: Command::Init,
            ..CliConfig::for_testing()
        };
        let backend = Arc::new(memory_backend());

        let mut generator = create_generator(&config).unwrap();
        let first = seed_if_empty(backend.as_ref(), &mut generator, DEFAULT_SEED_COUNT)
            .await
            .unwrap();
        let second = seed_if_empty(backend.as_ref(), &mut generator, DEFAULT_SEED_COUNT)
            .await
            .unwrap();

        assert_eq!(first, DEFAULT_SEED_COUNT);
        assert_eq!(second, 0);
        assert_eq!(backend.count().await.unwrap(), DEFAULT_SEED_COUNT as u64);
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let config = CliConfig::for_testing();
        let a = create_generator(&config).unwrap().generate();
        let b = create_generator(&config).unwrap().generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let config = CliConfig {
            national_id_probability: -0.5,
            ..CliConfig::for_testing()
        };
        assert!(create_generator(&config).is_err());
    }

    #[tokio::test]
    async fn test_search_output_is_bundle() {
        let backend = Arc::new(memory_backend());
        let mut generator = create_generator(&CliConfig::for_testing()).unwrap();
        seed_patients(backend.as_ref(), &mut generator, 5).await.unwrap();

        let service = PatientService::new(backend);
        let bundle = service.search(&Default::default()).await.unwrap();
        let value = serde_json::to_value(&bundle).unwrap();

        assert_eq!(value["resourceType"], "Bundle");
        assert_eq!(count_of(&value), 5);
    }

    #[tokio::test]
    async fn test_not_found_detected_through_anyhow() {
        let service = PatientService::new(Arc::new(memory_backend()));
        let error: anyhow::Error = service
            .get_by_external_id("missing-1")
            .await
            .unwrap_err()
            .into();
        assert!(is_not_found(&error));
        assert!(!is_not_found(&anyhow::anyhow!("other failure")));
    }

    #[test]
    fn test_file_backend_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("patients.db");
        let config = CliConfig {
            database_url: path.to_string_lossy().into_owned(),
            ..CliConfig::for_testing()
        };

        let backend = create_sqlite_backend(&config).unwrap();
        assert!(!backend.is_memory());
        assert!(path.exists());
    }
}
