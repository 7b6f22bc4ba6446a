//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! [cursor]
//! max_token_len = 8192    # optional; unbounded when absent
//!
//! [cache]
//! prewarm_converters = true
//! shards = 16
//! ```

use serde::Deserialize;
use std::{fs, io, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// KeysetConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct KeysetConfig {
    pub cursor: CursorConfig,
    pub cache: CacheConfig,
}

impl KeysetConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cursor.max_token_len == Some(0) {
            return Err(ConfigError::Invalid(
                "cursor.max_token_len must be greater than zero".to_string(),
            ));
        }

        if let Some(shards) = self.cache.shards
            && (shards < 2 || !shards.is_power_of_two())
        {
            return Err(ConfigError::Invalid(format!(
                "cache.shards must be a power of two >= 2, got {shards}"
            )));
        }

        Ok(())
    }
}

///
/// CursorConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CursorConfig {
    /// Client tokens longer than this are rejected before base64 decoding.
    /// Opt-in: a row holding a long sorted value yields a long token, which
    /// a bound below that length would refuse on the next page.
    pub max_token_len: Option<usize>,
}

///
/// CacheConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Populate the converter cache for every supported kind at startup.
    pub prewarm_converters: bool,
    /// Shard count for the concurrent caches; `None` keeps the dashmap default.
    pub shards: Option<usize>,
}

///
/// TESTS
///
