use clap::{Parser, Subcommand};
use skill_radar::analyzer::build_report;
use skill_radar::config::{AppConfig, load_config};
use skill_radar::extractor::HttpTokenClassifier;
use skill_radar::model::IngestSummary;
use skill_radar::parser::ItemParser;
use skill_radar::pipeline::RecordAssembler;
use skill_radar::scraper as sources;
use skill_radar::storage::{JobStore, SqliteStorage};
use std::error::Error;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skill-radar", version, about = "Job posting ingestion, skill extraction and analytics")]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "SKILL_RADAR_CONFIG", default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pull every configured source, store normalized records, then backfill skills
    Ingest,
    /// Extract skills for stored records that have none
    Backfill,
    /// Print the analytical views as JSON
    Report {
        /// Rows kept in each ranked view
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return Err(e.into());
        }
    };

    let storage = match SqliteStorage::new(&config.database_path) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            return Err(e.into());
        }
    };

    let result = run(cli.command, &config, &storage).await;
    if let Err(e) = &result {
        error!("Run failed: {}", e);
    }

    storage.close()?;
    result
}

async fn run(command: Command, config: &AppConfig, storage: &SqliteStorage) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Ingest => {
            let classifier = HttpTokenClassifier::new(&config.classifier)?;
            let assembler = RecordAssembler::new(&classifier, storage, config.strict_salary_check);

            let mut total = IngestSummary::default();
            for source_cfg in &config.sources {
                info!("Processing source: {}", source_cfg.name);
                let source = match sources::from_config(source_cfg, config.apify_token.as_deref()) {
                    Ok(s) => s,
                    Err(e) => {
                        warn!("Source {} unavailable: {}", source_cfg.name, e);
                        continue;
                    }
                };
                let items = match source.fetch_items().await {
                    Ok(items) => items,
                    Err(e) => {
                        warn!("Fetching {} failed: {}", source_cfg.name, e);
                        continue;
                    }
                };
                info!("Fetched {} items from {}", items.len(), source_cfg.name);

                let parser = ItemParser::new(source_cfg.provider);
                let summary = assembler.ingest_items(&source_cfg.name, &items, &parser).await;
                total.processed += summary.processed;
                total.inserted += summary.inserted;
                total.failed += summary.failed;
            }
            info!(
                "Ingest done: {} processed, {} inserted, {} failed",
                total.processed, total.inserted, total.failed
            );

            assembler.backfill().await?;
        }
        Command::Backfill => {
            let classifier = HttpTokenClassifier::new(&config.classifier)?;
            let assembler = RecordAssembler::new(&classifier, storage, config.strict_salary_check);
            assembler.backfill().await?;
        }
        Command::Report { limit } => {
            let jobs = storage.get_all_jobs()?;
            info!("Building report over {} records", jobs.len());
            let report = build_report(&jobs, limit);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
