use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub demand: DemandSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// Population floor applied when loading the reference set
    #[serde(default = "default_min_population")]
    pub min_population: u64,
    /// Optional override path for the reference dataset; the embedded
    /// set is used when absent
    pub path: Option<String>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            min_population: default_min_population(),
            path: None,
        }
    }
}

fn default_min_population() -> u64 {
    100_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    #[serde(default)]
    pub min_overlap_pct: f64,
    #[serde(default = "default_w_skill")]
    pub w_skill: f64,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_distance_km: default_max_distance_km(),
            min_overlap_pct: 0.0,
            w_skill: default_w_skill(),
            default_limit: default_limit(),
        }
    }
}

fn default_max_distance_km() -> f64 {
    5000.0
}
fn default_w_skill() -> f64 {
    0.5
}
fn default_limit() -> usize {
    crate::core::ranker::MAX_RESULTS
}

impl MatchingSettings {
    /// Ranking parameters for a run that supplies no overrides
    pub fn ranking_params(&self) -> crate::models::RankingParams {
        crate::models::RankingParams {
            max_distance_km: self.max_distance_km,
            min_overlap_pct: self.min_overlap_pct,
            w_skill: self.w_skill,
            limit: self.default_limit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_dir")]
    pub dir: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            dir: default_session_dir(),
        }
    }
}

fn default_session_dir() -> String {
    "sessions".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DemandSettings {
    /// Fixed demand seed. Unset in production (fresh market per session);
    /// set for reproducible demos and tests.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with NOMAD_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NOMAD_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("NOMAD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matching_settings() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.max_distance_km, 5000.0);
        assert_eq!(matching.w_skill, 0.5);
        assert_eq!(matching.default_limit, 200);
        assert_eq!(matching.min_overlap_pct, 0.0);
    }

    #[test]
    fn test_matching_settings_feed_ranking_params() {
        let matching = MatchingSettings {
            max_distance_km: 2500.0,
            min_overlap_pct: 15.0,
            w_skill: 0.7,
            default_limit: 50,
        };
        let params = matching.ranking_params();

        assert_eq!(params.max_distance_km, 2500.0);
        assert_eq!(params.min_overlap_pct, 15.0);
        assert_eq!(params.w_skill, 0.7);
        assert_eq!(params.limit, 50);
    }

    #[test]
    fn test_default_catalog_settings() {
        let catalog = CatalogSettings::default();
        assert_eq!(catalog.min_population, 100_000);
        assert!(catalog.path.is_none());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}
