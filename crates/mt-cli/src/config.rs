//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// Supplies setup-phase defaults; everything can be overridden per session.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Duration pre-selected for new topics, in minutes.
    pub default_duration_minutes: u32,

    /// Default participant count for `start` and `preview`.
    pub participants: Option<u32>,

    /// Default hourly rate per participant for `start` and `preview`.
    pub hourly_rate: Option<f64>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("default_duration_minutes", &self.default_duration_minutes)
            .field("participants", &self.participants)
            .field("hourly_rate", &self.hourly_rate)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_minutes: 15,
            participants: None,
            hourly_rate: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (MT_*)
        figment = figment.merge(Env::prefixed("MT_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for mt.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mt"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_without_any_files() {
        let config = Config::default();
        assert_eq!(config.default_duration_minutes, 15);
        assert!(config.participants.is_none());
        assert!(config.hourly_rate.is_none());
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact value read back from the file")]
    fn load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_duration_minutes = 30").unwrap();
        writeln!(file, "participants = 4").unwrap();
        writeln!(file, "hourly_rate = 120.5").unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.default_duration_minutes, 30);
        assert_eq!(config.participants, Some(4));
        assert_eq!(config.hourly_rate, Some(120.5));
    }

    #[test]
    fn missing_explicit_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.default_duration_minutes, 15);
    }
}
