//! [`Config`]-related definitions.

use std::{collections::BTreeMap, path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::domain::{comparison, country};
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Listing catalog configuration.
    pub catalog: Catalog,

    /// Listing search configuration.
    pub search: Search,

    /// Comparison configuration.
    pub comparison: Comparison,

    /// Country display names and their ISO 3166-1 alpha-2 codes, replacing
    /// the built-in table if not empty.
    pub countries: BTreeMap<String, String>,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }

    /// Builds the [`service::Config`] out of this [`Config`].
    #[must_use]
    pub fn service(&self) -> service::Config {
        let countries = if self.countries.is_empty() {
            country::Names::default()
        } else {
            country::Names::new(&self.countries)
        };
        service::Config {
            comparison_max_items: self.comparison.max_items,
            cached_comparisons: self.comparison.cached,
            countries,
            search: service::query::listings::Config {
                default_per_page: self.search.default_per_page,
                max_per_page: self.search.max_per_page,
            },
            reload_catalog: self
                .catalog
                .reload_interval
                .filter(|interval| !interval.is_zero())
                .map(|interval| service::task::reload_catalog::Config {
                    interval,
                }),
        }
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Listing catalog configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Catalog {
    /// Path to the JSON file exported by the upstream listing store.
    #[default(PathBuf::from("catalog.json"))]
    pub path: PathBuf,

    /// Interval of re-reading the catalog file, if it should be re-read.
    ///
    /// Zero disables re-reading.
    #[default(Some(time::Duration::from_secs(5 * 60)))]
    #[serde(with = "humantime_serde")]
    pub reload_interval: Option<time::Duration>,
}

/// Listing search configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Search {
    /// Number of listings on a page, if not requested explicitly.
    #[default(20)]
    pub default_per_page: usize,

    /// Maximum number of listings on a page.
    #[default(100)]
    pub max_per_page: usize,
}

/// Comparison configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Comparison {
    /// Maximum number of listings compared at once.
    #[default(comparison::DEFAULT_MAX_ITEMS)]
    pub max_items: usize,

    /// Maximum number of non-empty selections kept in memory.
    #[default(service::DEFAULT_CACHED_COMPARISONS)]
    pub cached: usize,

    /// Directory to persist comparison selections in.
    #[default(PathBuf::from("comparisons"))]
    pub storage_dir: PathBuf,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time;

    use super::Config;

    #[test]
    fn builds_service_config_with_defaults() {
        let config = Config::default().service();

        assert_eq!(config.comparison_max_items, 4);
        assert_eq!(config.search.default_per_page, 20);
        assert_eq!(config.search.max_per_page, 100);
        assert_eq!(config.cached_comparisons, 10_000);
        assert!(config.reload_catalog.is_some());
        assert_eq!(config.countries.normalize("Deutschland").to_string(), "DE");
    }

    #[test]
    fn replaces_country_names() {
        let config = Config {
            countries: [("Polska".to_owned(), "pl".to_owned())]
                .into_iter()
                .collect(),
            ..Config::default()
        }
        .service();

        assert_eq!(config.countries.len(), 1);
        assert_eq!(config.countries.normalize("polska").to_string(), "PL");
        assert_eq!(
            config.countries.normalize("Deutschland").to_string(),
            "DEUTSCHLAND",
        );
    }

    #[test]
    fn disables_catalog_reload_on_zero_interval() {
        let mut config = Config::default();
        config.catalog.reload_interval = Some(time::Duration::ZERO);

        assert!(config.service().reload_catalog.is_none());

        config.catalog.reload_interval = None;

        assert!(config.service().reload_catalog.is_none());
    }
}
