//! Service configuration.
//!
//! `ServiceConfig` names the catalog and ledger files, the draw cooldown
//! and an optional RNG seed. It can be built in code or read from JSON:
//!
//! ```json
//! { "ledger_path": "data/users.json", "cooldown_secs": 600, "seed": 42 }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Default cooldown between successful draws (one hour).
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(60 * 60);

/// Configuration for a `CardService`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// JSON file holding the user ledger.
    pub ledger_path: PathBuf,

    /// JSON file holding the card catalog.
    pub catalog_path: PathBuf,

    /// Minimum time between two successful draws of one user.
    #[serde(rename = "cooldown_secs", with = "duration_secs")]
    pub cooldown: Duration,

    /// Seed for the draw RNG. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("user_data.json"),
            catalog_path: PathBuf::from("cards.json"),
            cooldown: DEFAULT_COOLDOWN,
            seed: None,
        }
    }
}

impl ServiceConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Set the ledger file.
    #[must_use]
    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    /// Set the catalog file.
    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    /// Set the draw cooldown.
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Use a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.ledger_path, PathBuf::from("user_data.json"));
        assert_eq!(config.catalog_path, PathBuf::from("cards.json"));
        assert_eq!(config.cooldown, DEFAULT_COOLDOWN);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder() {
        let config = ServiceConfig::default()
            .with_ledger_path("a.json")
            .with_catalog_path("b.json")
            .with_cooldown(Duration::from_secs(5))
            .with_seed(9);

        assert_eq!(config.ledger_path, PathBuf::from("a.json"));
        assert_eq!(config.catalog_path, PathBuf::from("b.json"));
        assert_eq!(config.cooldown, Duration::from_secs(5));
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_partial_json() {
        let config: ServiceConfig =
            serde_json::from_str(r#"{"cooldown_secs": 30, "seed": 1}"#).unwrap();

        assert_eq!(config.cooldown, Duration::from_secs(30));
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.catalog_path, PathBuf::from("cards.json"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"ledger_path": "users.json"}"#).unwrap();

        let config = ServiceConfig::load(&path).unwrap();
        assert_eq!(config.ledger_path, PathBuf::from("users.json"));
        assert_eq!(config.cooldown, DEFAULT_COOLDOWN);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ServiceConfig::load("/nonexistent/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
