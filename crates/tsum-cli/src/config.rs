//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tsum_core::Layout;
use tsum_xlsx::ExportOptions;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Layout used when `--layout` is not given.
    pub layout: Layout,

    /// Number format for the date header cells of exported workbooks.
    pub date_format: String,

    /// Worksheet name of exported workbooks.
    pub sheet_name: String,
}

impl Default for Config {
    fn default() -> Self {
        let export = ExportOptions::default();
        Self {
            layout: Layout::default(),
            date_format: export.date_format,
            sheet_name: export.sheet_name,
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

        // Load from environment variables (TSUM_*)
        figment = figment.merge(Env::prefixed("TSUM_"));

        figment.extract()
    }

    /// Settings handed to the workbook writer.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            sheet_name: self.sheet_name.clone(),
            date_format: self.date_format.clone(),
        }
    }
}

/// Returns the platform-specific config directory for tsum.
///
/// On Linux: `~/.config/tsum`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tsum"))
}
