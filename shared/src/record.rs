use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::division::DivisionId;

/// One deficient mail-ballot record from the county list. Immutable
/// once loaded; consumers only filter and read.
///
/// The upstream rows are loosely typed (wards and zip codes arrive as
/// either strings or numbers depending on the export), so those fields
/// coerce on deserialization instead of failing the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallotRecord {
    pub id_number: String,
    pub name: String,
    #[serde(default, deserialize_with = "stringly")]
    pub ward: Option<String>,
    pub division: DivisionId,
    #[serde(default, deserialize_with = "year")]
    pub birth_year: Option<i32>,
    #[serde(default, deserialize_with = "stringly")]
    pub zip: Option<String>,
    #[serde(default)]
    pub ballot_status_reason: Option<String>,
    #[serde(default)]
    pub added: Option<DateTime<Utc>>,
}

fn stringly<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().map(|y| y as i32),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Sorted, deduplicated division set of a search result: the bridge
/// from record matches to a highlight set.
pub fn divisions_of(records: &[BallotRecord]) -> Vec<DivisionId> {
    let mut divisions: Vec<DivisionId> = records.iter().map(|r| r.division).collect();
    divisions.sort_unstable();
    divisions.dedup();
    divisions
}
