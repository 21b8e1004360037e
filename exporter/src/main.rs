//! Bulk-exports both backend resources to the static JSON files the
//! engine's `Static` data source consumes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use wardmap_engine::{DataSource, DataStore, Dataset};
use wardmap_shared::DivisionId;

const BALLOTS_FILE: &str = "phila_ballots.json";
const STATS_FILE: &str = "division_stats.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let Some(base_url) = wardmap_engine::config::backend_base_url() else {
        tracing::error!("BACKEND_URL is required to run the exporter");
        std::process::exit(1);
    };
    let Some(service_key) = wardmap_engine::config::backend_service_key() else {
        tracing::error!("BACKEND_SERVICE_KEY is required to run the exporter");
        std::process::exit(1);
    };
    let out_dir = std::env::var("EXPORT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("public/data"));

    let store = DataStore::new(DataSource::Backend {
        base_url,
        service_key,
    });
    let dataset = match store.load().await {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch backend resources");
            std::process::exit(1);
        }
    };

    if let Err(e) = write_exports(&out_dir, &dataset) {
        tracing::error!(error = %e, "failed to write export files");
        std::process::exit(1);
    }

    tracing::info!(
        records = dataset.records.len(),
        divisions = dataset.stats.len(),
        out_dir = %out_dir.display(),
        "export complete"
    );
}

fn write_exports(out_dir: &Path, dataset: &Dataset) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let ballots = serde_json::to_vec_pretty(&dataset.records)?;
    fs::write(out_dir.join(BALLOTS_FILE), ballots)?;

    // Stable row order keeps successive exports diffable.
    let ordered: BTreeMap<DivisionId, u64> =
        dataset.stats.iter().map(|(id, count)| (*id, *count)).collect();
    let rows: Vec<serde_json::Value> = ordered
        .iter()
        .map(|(division, count)| {
            serde_json::json!({ "division": division.hyphenated(), "count": count })
        })
        .collect();
    let stats = serde_json::to_vec_pretty(&rows)?;
    fs::write(out_dir.join(STATS_FILE), stats)?;

    Ok(())
}
