use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_RESOLVER_BIN: &str = "yt-dlp";
/// Combined stdout + stderr cap for one resolver run.
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 5_120_000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_MAX_CONCURRENT: usize = 8;
pub const DEFAULT_YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
/// Data API keys are read from `YT_KEY_1` through `YT_KEY_<n>`.
pub const MAX_API_KEYS: usize = 3;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub resolver: ResolverConfig,
    pub search: SearchConfig,
    /// `true` unless `APP_ENV=production`.
    pub is_dev: bool,
}

/// Settings for the external resolver process.
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    pub program: String,
    pub max_output_bytes: usize,
    pub timeout: Duration,
    pub max_concurrent: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_RESOLVER_BIN.to_string(),
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            timeout: DEFAULT_TIMEOUT,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

/// YouTube Data API settings. Search is disabled when `api_keys` is empty.
#[derive(Clone)]
pub struct SearchConfig {
    pub api_base: String,
    pub api_keys: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_YOUTUBE_API_BASE.to_string(),
            api_keys: Vec::new(),
        }
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_base", &self.api_base)
            .field("api_keys", &format_args!("[{} redacted]", self.api_keys.len()))
            .finish()
    }
}

impl Config {
    /// Load configuration from the environment (and `.env` when present).
    ///
    /// Every variable is optional; malformed numbers fall back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let resolver = ResolverConfig {
            program: env::var("RESOLVER_BIN").unwrap_or_else(|_| DEFAULT_RESOLVER_BIN.to_string()),
            max_output_bytes: parse_var("RESOLVER_MAX_OUTPUT_BYTES")
                .unwrap_or(DEFAULT_MAX_OUTPUT_BYTES),
            timeout: parse_var("RESOLVER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            max_concurrent: parse_var::<usize>("RESOLVER_MAX_CONCURRENT")
                .unwrap_or(DEFAULT_MAX_CONCURRENT)
                .max(1),
        };

        let search = SearchConfig {
            api_base: env::var("YOUTUBE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_YOUTUBE_API_BASE.to_string()),
            api_keys: (1..=MAX_API_KEYS)
                .filter_map(|i| env::var(format!("YT_KEY_{i}")).ok())
                .filter(|key| !key.trim().is_empty())
                .collect(),
        };

        Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_PORT),
            resolver,
            search,
            is_dev: env::var("APP_ENV").as_deref() != Ok("production"),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
