use crate::config::{Config, DEFAULT_DB_PATH};
use crate::db::connection::Database;
use crate::dedup::{run_dedup, DedupOptions};
use crate::errors::AppResult;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod dedup;
mod domain;
mod errors;
mod ingest;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "truehome-dedup")]
#[command(about = "Merge duplicate TrueHome property records and score property risk")]
#[command(version)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "TRUEHOME_DB_PATH", default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Collapse properties sharing an address/city/zip into one survivor (default)
    Dedup {
        /// Report what would be merged without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load normalized property records from a JSON array
    Import {
        file: PathBuf,
    },

    /// Compute the risk score of one property
    Risk {
        property_id: String,

        #[arg(long)]
        json: bool,
    },

    /// List recent dedup runs
    Runs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match Config::new(cli.db) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Option<Command>, config: &Config) -> AppResult<()> {
    let mut db = Database::open(&config.db_path)?;
    info!(db = %config.db_path.display(), "database ready");

    let command = command.unwrap_or(Command::Dedup {
        dry_run: false,
        json: false,
    });

    match command {
        Command::Dedup { dry_run, json } => {
            let report = run_dedup(&mut db, DedupOptions { dry_run })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("✅ Dedup complete: {report}");
            }
        }
        Command::Import { file } => {
            let report = ingest::import_file(&db, &file)?;
            println!(
                "Imported {} records ({} skipped)",
                report.imported, report.skipped
            );
        }
        Command::Risk { property_id, json } => {
            let inputs = db.with_conn(|conn| db::risk::load_risk_inputs(conn, &property_id))?;
            let today = Utc::now().date_naive();
            let risk = domain::risk::compute_risk_score(&inputs, today);
            if json {
                println!("{}", serde_json::to_string_pretty(&risk)?);
            } else {
                println!("{property_id}: {} ({})", risk.score, risk.level);
            }
        }
        Command::Runs => {
            let runs = db.with_conn(db::runs::recent_dedup_runs)?;
            if runs.is_empty() {
                println!("No dedup runs recorded");
            }
            for r in runs {
                println!(
                    "#{} {} {}{} processed={} merged={} deleted={} skipped={}{}",
                    r.id,
                    r.started_at,
                    if r.success { "ok" } else { "FAILED" },
                    if r.dry_run { " (dry run)" } else { "" },
                    r.groups_processed.unwrap_or(0),
                    r.groups_merged.unwrap_or(0),
                    r.properties_deleted.unwrap_or(0),
                    r.groups_skipped.unwrap_or(0),
                    r.error_message
                        .map(|m| format!(" error={m}"))
                        .unwrap_or_default(),
                );
            }
        }
    }

    Ok(())
}
