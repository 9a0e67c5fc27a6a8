// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Snapshot data configuration
///
/// The defaults reproduce the producer's layout: timestamped
/// `ny_rare_birds_*.json` files dropped into the working directory.
#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Directory scanned for snapshot files
    pub dir: String,
    /// Snapshot file name prefix
    pub file_prefix: String,
    /// Snapshot file name suffix
    pub file_suffix: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            file_prefix: "ny_rare_birds_".to_string(),
            file_suffix: ".json".to_string(),
        }
    }
}

/// Routes configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    /// Paths served by the latest-snapshot responder. The `.php` path is a
    /// legacy alias the map page still requests.
    pub data_paths: Vec<String>,
    pub favicon_paths: Vec<String>,
    pub index_files: Vec<String>,
    /// Optional directory of static site assets (map page, scripts, styles).
    /// When unset, only the built-in landing page is served.
    #[serde(default)]
    pub site_dir: Option<String>,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            data_paths: vec![
                "/api/latest".to_string(),
                "/get_latest_data.php".to_string(),
            ],
            favicon_paths: vec!["/favicon.ico".to_string(), "/favicon.svg".to_string()],
            index_files: vec!["bird_map.html".to_string(), "index.html".to_string()],
            site_dir: None,
            health: HealthConfig::default(),
        }
    }
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
    pub backlog: i32,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub max_body_size: u64,
}
