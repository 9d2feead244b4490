//! Catalog configuration.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use curator_error::{ConfigError, CuratorError, CuratorResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../curator.toml");

/// How seeded random ordering is rendered for the backing engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum RandomOrdering {
    /// Compose substrings of each row's hex id at seed-chosen positions
    #[default]
    Synthetic,
    /// Call an engine function that accepts a seed, e.g. `RAND`
    Native {
        /// Function name
        function: String,
    },
}

/// Settings for opening a [`crate::SqliteCatalog`].
///
/// # Examples
///
/// ```
/// use curator_database::{CatalogConfig, RandomOrdering};
///
/// let config = CatalogConfig::builder()
///     .database_url("catalog.db")
///     .random_ordering(RandomOrdering::Synthetic)
///     .build()
///     .unwrap();
/// assert_eq!(config.database_url(), "catalog.db");
/// assert!(*config.run_migrations());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(setter(into), default)]
#[serde(default)]
pub struct CatalogConfig {
    /// SQLite file path or `:memory:`
    database_url: String,
    /// Random-order rendering
    random_ordering: RandomOrdering,
    /// Apply embedded migrations on open
    run_migrations: bool,
    /// Substrings composed by the synthetic random strategy
    synthetic_key_segments: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_url: ":memory:".to_string(),
            random_ordering: RandomOrdering::Synthetic,
            run_migrations: true,
            synthetic_key_segments: 8,
        }
    }
}

impl CatalogConfig {
    /// Creates a new config builder.
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::default()
    }

    /// Load configuration from a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> CuratorResult<Self> {
        debug!("Loading catalog configuration from file");

        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                CuratorError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize::<Self>()
            .map_err(|e| {
                CuratorError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?
            .validated()
    }

    /// Load configuration with precedence: environment > ./curator.toml > bundled default.
    ///
    /// A `.env` file is read first if present. Environment variables use the
    /// `CURATOR_` prefix and `__` for nesting, e.g.
    /// `CURATOR_RANDOM_ORDERING__STRATEGY=native`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed.
    #[instrument]
    pub fn load() -> CuratorResult<Self> {
        debug!("Loading catalog configuration");
        let _ = dotenvy::dotenv();

        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::with_name("curator").required(false))
            .add_source(
                Environment::with_prefix("CURATOR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                CuratorError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize::<Self>()
            .map_err(|e| {
                CuratorError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?
            .validated()
    }

    /// Check values that deserialization alone cannot.
    ///
    /// # Errors
    ///
    /// Rejects an empty database url, zero synthetic segments and native
    /// function names that are not plain identifiers.
    pub fn validated(self) -> CuratorResult<Self> {
        if self.database_url.is_empty() {
            return Err(ConfigError::new("database_url must not be empty").into());
        }
        if self.synthetic_key_segments == 0 {
            return Err(ConfigError::new("synthetic_key_segments must be at least 1").into());
        }
        if let RandomOrdering::Native { function } = &self.random_ordering {
            if !is_identifier(function) {
                return Err(ConfigError::new(format!(
                    "Random function name '{}' contains invalid characters",
                    function
                ))
                .into());
            }
        }
        Ok(self)
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
