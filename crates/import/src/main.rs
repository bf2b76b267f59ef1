//! `assetdesk-import`: load an inventory or directory spreadsheet into the
//! AssetDesk database.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assetdesk_core::kind::ImportKind;
use assetdesk_import::config::ImportConfig;
use assetdesk_import::export::write_flagged_workbook;
use assetdesk_import::{import_workbook, ImportOutcome, ImportRequest, PgInventoryStore};

#[derive(Parser)]
#[command(name = "assetdesk-import")]
#[command(about = "Import an AssetDesk spreadsheet", long_about = None)]
#[command(version)]
struct Cli {
    /// Import variant: registration, configuration, full-inventory or people
    #[arg(value_parser = parse_kind)]
    kind: ImportKind,

    /// Spreadsheet to import (xlsx, xls or ods)
    file: PathBuf,

    /// Location applied to every row (0 for none)
    #[arg(long)]
    location: Option<i64>,

    /// Actor recorded in the audit trail (defaults to IMPORT_ACTOR)
    #[arg(long)]
    actor: Option<String>,

    /// Write flagged rows to this xlsx file for review
    #[arg(long)]
    flagged_out: Option<PathBuf>,

    /// Print the full outcome as JSON
    #[arg(long)]
    json: bool,
}

fn parse_kind(s: &str) -> Result<ImportKind, String> {
    ImportKind::from_str(s).ok_or_else(|| {
        format!(
            "unknown import variant '{s}' (expected one of: {})",
            ImportKind::ALL.join(", ")
        )
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assetdesk_import=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // --- Configuration ---
    let config = ImportConfig::from_env().context("Invalid configuration")?;
    tracing::info!(batch_size = config.batch_size, "Loaded import configuration");

    // --- Database ---
    let pool = assetdesk_db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("Failed to connect to database")?;
    assetdesk_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    assetdesk_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    // --- Import ---
    let bytes = tokio::fs::read(&cli.file)
        .await
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let request = ImportRequest::new(cli.kind, cli.actor.unwrap_or(config.actor))
        .with_default_location(cli.location.unwrap_or(0))
        .with_batch_size(config.batch_size);

    let mut store = PgInventoryStore::new(pool);
    let outcome = import_workbook(&mut store, bytes, &request)
        .await
        .with_context(|| format!("Import of {} failed", cli.file.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_summary(&outcome);
    }

    if let Some(path) = cli.flagged_out {
        if !outcome.flagged.is_empty() {
            write_flagged_workbook(&path, &outcome.flagged)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    Ok(())
}

fn print_summary(outcome: &ImportOutcome) {
    let summary = &outcome.summary;
    println!("{}", summary.message());
    if summary.has_errors() {
        println!("Errors:");
        for error in &summary.errors {
            println!("  {error}");
        }
        if let Some(notice) = summary.overflow_notice() {
            println!("  {notice}");
        }
    }
    for warning in &summary.warnings {
        println!("  warning: {warning}");
    }
    if !outcome.flagged.is_empty() {
        println!("{} row(s) flagged for review", outcome.flagged.len());
    }
}
