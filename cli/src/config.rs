//! CLI configuration: TOML file as the base, flags and env on top.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

fn default_gateway_url() -> String {
    "https://wallet.bgeo.app".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./bgeo_data")
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Base URL of the gateway the tool talks to.
    pub gateway_url: String,
    /// API key forwarded on gateway passthrough calls.
    pub api_key: Option<String>,
    /// Directory the encrypted wallet record lives in.
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            api_key: None,
            data_dir: default_data_dir(),
        }
    }
}

/// Per-invocation values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub gateway_url: Option<String>,
    pub api_key: Option<String>,
    pub data_dir: Option<PathBuf>,
}

/// Load the effective configuration. File settings are used as the base;
/// CLI flags and env vars override them. A missing or unparsable file logs
/// a warning and falls back to defaults rather than aborting.
pub fn load(path: Option<&Path>, overrides: Overrides) -> AppConfig {
    let file_config: Option<AppConfig> = if let Some(path) = path {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(cfg) => {
                    tracing::info!("Loaded config from {}", path.display());
                    Some(cfg)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {e}, using defaults");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read config file {}: {e}, using defaults",
                    path.display()
                );
                None
            }
        }
    } else {
        None
    };

    let base = file_config.unwrap_or_default();
    AppConfig {
        gateway_url: overrides.gateway_url.unwrap_or(base.gateway_url),
        api_key: overrides.api_key.or(base.api_key),
        data_dir: overrides.data_dir.unwrap_or(base.data_dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bgeo.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_without_file_or_overrides() {
        let config = load(None, Overrides::default());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn file_settings_become_the_base() {
        let (_dir, path) = write_config(
            "gateway_url = \"http://localhost:3000\"\napi_key = \"k1\"\ndata_dir = \"/tmp/bgeo\"\n",
        );
        let config = load(Some(&path), Overrides::default());
        assert_eq!(config.gateway_url, "http://localhost:3000");
        assert_eq!(config.api_key.as_deref(), Some("k1"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/bgeo"));
    }

    #[test]
    fn overrides_beat_the_file() {
        let (_dir, path) = write_config("gateway_url = \"http://localhost:3000\"\n");
        let config = load(
            Some(&path),
            Overrides {
                gateway_url: Some("http://other:4000".into()),
                api_key: Some("k2".into()),
                data_dir: None,
            },
        );
        assert_eq!(config.gateway_url, "http://other:4000");
        assert_eq!(config.api_key.as_deref(), Some("k2"));
        assert_eq!(config.data_dir, default_data_dir());
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let (_dir, path) = write_config("gateway_url = [not toml");
        let config = load(Some(&path), Overrides::default());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load(Some(Path::new("/nonexistent/bgeo.toml")), Overrides::default());
        assert_eq!(config, AppConfig::default());
    }
}
