pub mod init;
mod schema;

pub use init::{run_init, write_config};
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/offmarket/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("offmarket"))
}

/// Get the default config file path (~/.config/offmarket/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/offmarket/config.yaml) and falls back to built-in defaults
///   when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                tracing::debug!(
                    path = %default_path.display(),
                    "no config file, using built-in defaults"
                );
                return Ok(Config::default());
            }
            default_path
        }
    };

    read_config(&config_path)
}

fn read_config(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_explicit_missing_config_errors() {
        let err = load_config(Some(PathBuf::from("/nonexistent/offmarket.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r##"
scale:
  fallback_color: "#000000"
"##
        )
        .unwrap();

        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        assert!(config.scoring.is_none());
        assert_eq!(
            config.scale_or_default().fallback_color.as_deref(),
            Some("#000000")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "scoring: [unclosed").unwrap();
        let err = load_config(Some(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "queries: []").unwrap();
        assert!(load_config(Some(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_validate_collects_across_sections() {
        let yaml = r##"
scoring:
  buyer:
    weights: { income: 1.0, employment: 1.0, establishments: 1.0 }
scale:
  colors:
    - { range: ">=0.5", color: "green" }
"##;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("scoring.buyer.weights"));
        assert!(errors[1].starts_with("scale.colors[0].color"));
    }
}
