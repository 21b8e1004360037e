//! Single-flight, session-lifetime cache over the two backing
//! datasets (ballot records and per-division aggregate counts).

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use wardmap_shared::{BallotRecord, DivisionId};

use crate::config::{BALLOTS_RESOURCE, MIN_NAME_QUERY_LEN, STATS_RESOURCE, ballots_url, stats_url};
use crate::error::EngineError;

/// Both backing datasets. They load together or not at all, so the
/// cache is never half-populated.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<BallotRecord>,
    pub stats: HashMap<DivisionId, u64>,
}

/// Where the datasets come from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Authenticated backend REST endpoints (bearer credentials).
    Backend {
        base_url: String,
        service_key: String,
    },
    /// The pre-exported static JSON files.
    Static {
        ballots_url: String,
        stats_url: String,
    },
}

impl DataSource {
    /// The static files at their default public locations (overridable
    /// via `BALLOTS_URL`/`STATS_URL`).
    pub fn default_static() -> Self {
        Self::Static {
            ballots_url: ballots_url(),
            stats_url: stats_url(),
        }
    }
}

type LoadFuture = Shared<BoxFuture<'static, Result<Arc<Dataset>, EngineError>>>;

struct LoadSlot {
    generation: u64,
    current: Option<LoadFuture>,
}

/// Explicit cache object owned by the composing application.
///
/// Concurrent `load` calls coalesce onto one in-flight fetch; success
/// is memoized for the session, while a failure reaches every pending
/// caller and empties the slot so the next call retries from scratch.
pub struct DataStore {
    client: reqwest::Client,
    source: DataSource,
    slot: Mutex<LoadSlot>,
}

impl DataStore {
    pub fn new(source: DataSource) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("wardmap/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            source,
            slot: Mutex::new(LoadSlot {
                generation: 0,
                current: None,
            }),
        }
    }

    /// Load both datasets, reusing the in-flight or completed fetch.
    pub async fn load(&self) -> Result<Arc<Dataset>, EngineError> {
        let client = self.client.clone();
        let source = self.source.clone();
        self.load_with(move || fetch_datasets(client, source)).await
    }

    /// Drop whatever is cached or in flight; the next `load` fetches
    /// anew.
    pub fn invalidate(&self) {
        let mut slot = self.lock_slot();
        slot.generation += 1;
        slot.current = None;
    }

    pub async fn reload(&self) -> Result<Arc<Dataset>, EngineError> {
        self.invalidate();
        self.load().await
    }

    /// Case-insensitive substring search over record names. Trimmed
    /// queries shorter than the floor return nothing.
    pub async fn search_by_name(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<BallotRecord>, EngineError> {
        let dataset = self.load().await?;
        let query = query.trim();
        if query.chars().count() < MIN_NAME_QUERY_LEN {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();
        Ok(dataset
            .records
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }

    /// Records in one division, capped at `limit`.
    pub async fn ballots_in_division(
        &self,
        division: DivisionId,
        limit: usize,
    ) -> Result<Vec<BallotRecord>, EngineError> {
        let dataset = self.load().await?;
        Ok(dataset
            .records
            .iter()
            .filter(|record| record.division == division)
            .take(limit)
            .cloned()
            .collect())
    }

    /// Per-division record counts. Divisions without a row are simply
    /// absent; lookups treat them as 0.
    pub async fn division_stats(&self) -> Result<HashMap<DivisionId, u64>, EngineError> {
        Ok(self.load().await?.stats.clone())
    }

    async fn load_with<F, Fut>(&self, fetch: F) -> Result<Arc<Dataset>, EngineError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Dataset, EngineError>> + Send + 'static,
    {
        let (future, generation) = {
            let mut slot = self.lock_slot();
            match slot.current.clone() {
                Some(current) => (current, slot.generation),
                None => {
                    slot.generation += 1;
                    let future = fetch().map(|result| result.map(Arc::new)).boxed().shared();
                    slot.current = Some(future.clone());
                    (future, slot.generation)
                }
            }
        };

        match future.await {
            Ok(dataset) => Ok(dataset),
            Err(e) => {
                // Clear the failed flight unless a newer one replaced it.
                let mut slot = self.lock_slot();
                if slot.generation == generation {
                    slot.current = None;
                }
                Err(e)
            }
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, LoadSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

enum Resource {
    Ballots,
    Stats,
}

async fn fetch_datasets(
    client: reqwest::Client,
    source: DataSource,
) -> Result<Dataset, EngineError> {
    let (records, stats) = tokio::try_join!(
        fetch_records(&client, &source),
        fetch_stats(&client, &source)
    )?;
    info!(
        records = records.len(),
        divisions = stats.len(),
        "datasets loaded"
    );
    Ok(Dataset { records, stats })
}

fn get(client: &reqwest::Client, source: &DataSource, resource: Resource) -> reqwest::RequestBuilder {
    match source {
        DataSource::Backend {
            base_url,
            service_key,
        } => {
            let path = match resource {
                Resource::Ballots => BALLOTS_RESOURCE,
                Resource::Stats => STATS_RESOURCE,
            };
            client
                .get(format!("{}/{path}", base_url.trim_end_matches('/')))
                .header("apikey", service_key)
                .bearer_auth(service_key)
        }
        DataSource::Static {
            ballots_url,
            stats_url,
        } => client.get(match resource {
            Resource::Ballots => ballots_url,
            Resource::Stats => stats_url,
        }),
    }
}

async fn fetch_records(
    client: &reqwest::Client,
    source: &DataSource,
) -> Result<Vec<BallotRecord>, EngineError> {
    let response = get(client, source, Resource::Ballots)
        .send()
        .await
        .map_err(unavailable)?
        .error_for_status()
        .map_err(unavailable)?;
    response.json().await.map_err(unavailable)
}

async fn fetch_stats(
    client: &reqwest::Client,
    source: &DataSource,
) -> Result<HashMap<DivisionId, u64>, EngineError> {
    let response = get(client, source, Resource::Stats)
        .send()
        .await
        .map_err(unavailable)?
        .error_for_status()
        .map_err(unavailable)?;
    let rows: Vec<StatRow> = response.json().await.map_err(unavailable)?;
    Ok(stats_from_rows(rows))
}

fn unavailable(e: reqwest::Error) -> EngineError {
    EngineError::DataUnavailable(e.to_string())
}

#[derive(Debug, Deserialize)]
struct StatRow {
    division: DivisionId,
    #[serde(default)]
    count: Value,
}

fn stats_from_rows(rows: Vec<StatRow>) -> HashMap<DivisionId, u64> {
    rows.into_iter()
        .map(|row| (row.division, coerce_count(&row.count)))
        .collect()
}

/// Numeric and numeric-string counts coerce to a number; null,
/// absent, and anything else count as 0.
fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f.round() as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
