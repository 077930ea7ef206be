use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

/// Daily-bar provider endpoint settings, loaded from a TOML file.
#[derive(Deserialize, Clone)]
pub struct ProviderConfig {
    pub api_url: String,
    pub token: String,
    /// Rows per page when backfilling the full history.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    5000
}

impl ProviderConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            .add_source(File::new(path, FileFormat::Toml))
            .build()?;

        cfg.try_deserialize()
    }
}
