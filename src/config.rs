use crate::parse::DEFAULT_CHUNK_ROWS;

#[derive(Clone)]
pub struct Config {
    pub source_url: String,
    pub source_path: Option<String>,
    pub fetch_timeout_secs: u64,
    pub chunk_rows: usize,
    pub retry_max: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
    /// 0 = load once and exit; otherwise reload on this interval.
    pub refresh_secs: u64,
    pub probe_country: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            source_url: std::env::var("DATA_URL").unwrap_or_else(|_| "https://data.electricitymaps.com/co2-intensity/eu-hourly.csv".to_string()),
            source_path: std::env::var("DATA_PATH").ok(),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(30),
            chunk_rows: std::env::var("CHUNK_ROWS").ok().and_then(|v| v.parse().ok()).filter(|v| *v > 0).unwrap_or(DEFAULT_CHUNK_ROWS),
            retry_max: std::env::var("RETRY_MAX").ok().and_then(|v| v.parse().ok()).unwrap_or(2),
            retry_base_delay_ms: std::env::var("RETRY_BASE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(200),
            retry_max_delay_ms: std::env::var("RETRY_MAX_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(5000),
            refresh_secs: std::env::var("REFRESH_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(0),
            probe_country: std::env::var("PROBE_COUNTRY").ok(),
        }
    }
}
