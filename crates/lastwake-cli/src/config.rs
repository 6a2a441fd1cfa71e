//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use lastwake_core::MarkerSet;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The `journalctl` binary used to read the journal.
    pub journalctl: PathBuf,

    /// Show a spinner on stderr while the journal is scanned.
    pub progress: bool,

    /// Marker phrases for each power-state transition.
    pub markers: MarkerSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            journalctl: PathBuf::from("journalctl"),
            progress: true,
            markers: MarkerSet::default(),
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
        Self::figment(config_path).extract()
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (LASTWAKE_*, nested keys split on "__")
        figment.merge(Env::prefixed("LASTWAKE_").split("__"))
    }
}

/// Returns the platform-specific config directory for lastwake.
///
/// On Linux: `~/.config/lastwake`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("lastwake"))
}
