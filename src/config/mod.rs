//! Configuration loading
//!
//! Layers, lowest precedence first: built-in defaults, a config file
//! (`ndg.toml`, `.ndg.toml`, `.ndg.yml` in the working directory, or the file
//! given with `--config`), `NDG_*` environment variables, then CLI flags.

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

use anyhow::Result;
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::Config;

/// File names probed in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAMES: &[&str] = &["ndg.toml", ".ndg.toml", ".ndg.yml", ".ndg.yaml"];

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "NDG_";

pub fn load_config(anchor: &Path, explicit: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    let file = match explicit {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => discover_config_file(anchor),
    };

    if let Some(path) = file {
        debug!(path = %path.display(), "loading config file");
        figment = if is_yaml(&path) {
            figment.merge(Yaml::file(&path))
        } else {
            figment.merge(Toml::file(&path))
        };
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .map_err(|err| anyhow::anyhow!("Invalid configuration: {err}"))
}

fn discover_config_file(anchor: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES.iter().map(|name| anchor.join(name)).find(|path| path.is_file())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref(),
        Some("yml" | "yaml")
    )
}

#[cfg(test)]
mod tests {
    use super::load_config;
    use crate::domain::{BackendKind, Config, SegmenterKind};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_config_file() {
        let dir = TempDir::new().expect("temp dir");
        let config = load_config(dir.path(), None).expect("config");
        assert_eq!(config.model, Config::default().model);
        assert_eq!(config.backend, BackendKind::Ollama);
    }

    #[test]
    fn discovered_toml_overrides_defaults() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(
            dir.path().join("ndg.toml"),
            "model = \"llama2\"\nbackend = \"echo\"\ntimeout_secs = 90\n",
        )
        .expect("write config");

        let config = load_config(dir.path(), None).expect("config");
        assert_eq!(config.model, "llama2");
        assert_eq!(config.backend, BackendKind::Echo);
        assert_eq!(config.timeout_secs, Some(90));
        assert_eq!(config.delimiter, "def ");
    }

    #[test]
    fn explicit_yaml_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("custom.yml");
        fs::write(&path, "segmenter: syntax\ndelimiter: \"fn \"\nprogress: false\n")
            .expect("write config");

        let config = load_config(dir.path(), Some(&path)).expect("config");
        assert_eq!(config.segmenter, SegmenterKind::Syntax);
        assert_eq!(config.delimiter, "fn ");
        assert!(!config.progress);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let err = load_config(dir.path(), Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn unknown_backend_in_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("ndg.toml"), "backend = \"openai\"\n").expect("write config");
        let err = load_config(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }
}
