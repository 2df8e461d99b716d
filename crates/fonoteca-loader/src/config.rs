use fonoteca_config::{CONFIG_BACKEND, ConfigError};
use serde::{Deserialize, Serialize};

/// Configuración del loader (sección `[loader]` de `fonoteca.toml`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoaderConfig {
  /// URL base del archivo estático (donde vive `manifest.json`).
  #[serde(default = "default_base_url")]
  pub base_url: String,
}

fn default_base_url() -> String {
  "http://localhost:8080".to_string()
}

impl Default for LoaderConfig {
  fn default() -> Self {
    LoaderConfig { base_url: default_base_url() }
  }
}

impl LoaderConfig {
  pub fn load() -> Result<Self, ConfigError> {
    CONFIG_BACKEND.load_section_with_default("loader")
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    use fonoteca_config::ConfigBackend;
    CONFIG_BACKEND.save_section("loader", self)
  }
}
