use crate::converter::ConvertOptions;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

const CONFIG_NAMESPACE: &str = "wp2md";
const CONFIG_FILENAME: &str = "wp2md.toml";

#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub options: ConvertOptions,
    /// File the options came from, `None` when defaults are used
    pub path: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to determine configuration directory via XDG environment variables")]
    MissingConfigDir,
    #[error("failed to read config file at {path:?}: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config file at {path:?}: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
        path: PathBuf,
    },
}

/// Load conversion options.
///
/// An explicit path must exist. Without one the user config file is used when present,
/// otherwise the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = match resolve_config_path() {
        Ok(path) => path,
        Err(ConfigError::MissingConfigDir) => return Ok(defaults()),
        Err(err) => return Err(err),
    };

    if !path.exists() {
        log::debug!("no config file at {}, using defaults", path.display());
        return Ok(defaults());
    }

    read_config(&path)
}

fn defaults() -> ConfigLoadResult {
    ConfigLoadResult {
        options: ConvertOptions::default(),
        path: None,
    }
}

fn read_config(path: &Path) -> Result<ConfigLoadResult, ConfigError> {
    let config_text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        source,
        path: path.to_path_buf(),
    })?;

    let options: ConvertOptions =
        toml::from_str(&config_text).map_err(|source| ConfigError::Parse {
            source,
            path: path.to_path_buf(),
        })?;

    log::debug!("loaded config from {}", path.display());
    Ok(ConfigLoadResult {
        options,
        path: Some(path.to_path_buf()),
    })
}

pub fn resolve_config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_home_dir()?
        .join(CONFIG_NAMESPACE)
        .join(CONFIG_FILENAME))
}

fn config_home_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(dir));
    }

    #[cfg(windows)]
    if let Some(dir) = env::var_os("APPDATA") {
        return Ok(PathBuf::from(dir));
    }

    if let Some(home) = env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".config"));
    }

    Err(ConfigError::MissingConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "image_url_prefix = \"https://example.com/blog\"\nkeep_title = true\n",
        )
        .unwrap();

        let loaded = load_config(Some(path.as_path())).unwrap();
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.options.image_url_prefix, "https://example.com/blog");
        assert!(loaded.options.keep_title);
        assert_eq!(loaded.options.feature_credit, "Brandon Sanders");
    }

    #[test]
    fn test_explicit_config_missing() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "code_tags = \"[java]\"\n").unwrap();

        let err = load_config(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
