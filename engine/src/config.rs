use wardmap_shared::LngLat;

pub const CITY_CENTER: LngLat = LngLat::new(-75.1652, 39.9526);
pub const DEFAULT_ZOOM: f64 = 12.0;
/// Division count labels only render at or above this zoom.
pub const LABEL_MIN_ZOOM: f64 = 13.0;

/// Ceiling for camera fits so a single-division match doesn't zoom in
/// past street level.
pub const FIT_MAX_ZOOM: f64 = 16.0;
/// Base edge padding for camera fits, px.
pub const FIT_PADDING_PX: f64 = 50.0;

/// Name queries shorter than this return no results.
pub const MIN_NAME_QUERY_LEN: usize = 3;
pub const DEFAULT_RESULT_LIMIT: usize = 100;

pub const DEFAULT_BALLOTS_URL: &str =
    "https://codeforphilly.github.io/ballotcure/data/phila_ballots.json";
pub const DEFAULT_STATS_URL: &str =
    "https://codeforphilly.github.io/ballotcure/data/division_stats.json";

/// Backend REST resources (relative to the backend base URL).
pub const BALLOTS_RESOURCE: &str =
    "rest/v1/phila_ballots?select=id_number,name,ward,division,birth_year,zip,ballot_status_reason,added";
pub const STATS_RESOURCE: &str = "rest/v1/phila_ballots_stats?select=division,count";

pub fn ballots_url() -> String {
    std::env::var("BALLOTS_URL").unwrap_or_else(|_| DEFAULT_BALLOTS_URL.to_string())
}

pub fn stats_url() -> String {
    std::env::var("STATS_URL").unwrap_or_else(|_| DEFAULT_STATS_URL.to_string())
}

pub fn backend_base_url() -> Option<String> {
    std::env::var("BACKEND_URL").ok().filter(|v| !v.is_empty())
}

pub fn backend_service_key() -> Option<String> {
    std::env::var("BACKEND_SERVICE_KEY")
        .ok()
        .filter(|v| !v.is_empty())
}
