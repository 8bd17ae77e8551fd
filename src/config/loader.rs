use std::fs;
use std::path::{Path, PathBuf};

use super::core::PosturemapConfig;
use crate::errors::ConfigError;

pub const CONFIG_FILE_NAME: &str = ".posturemap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse TOML config contents. Values are validated when the file is resolved.
pub fn parse_config(contents: &str) -> Result<PosturemapConfig, ConfigError> {
    Ok(toml::from_str::<PosturemapConfig>(contents)?)
}

/// Load a config file the caller named explicitly; every failure is an error.
pub fn load_config_from_path(path: &Path) -> Result<PosturemapConfig, ConfigError> {
    let contents = read_config_file(path)?;
    let config = parse_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Missing files are silent; unreadable or malformed ones are logged and skipped.
pub(crate) fn try_load_config_from_path(path: &Path) -> Option<PosturemapConfig> {
    match load_config_from_path(path) {
        Ok(config) => Some(config),
        Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            None
        }
        Err(e) => {
            log::warn!("Ignoring config file {}: {}", path.display(), e);
            None
        }
    }
}

pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for the nearest `.posturemap.toml`.
pub fn discover_config(start: PathBuf) -> Option<(PathBuf, PosturemapConfig)> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path).map(|config| (path, config)))
}

/// Config for the current working directory, or defaults when none is found.
pub fn load_config() -> PosturemapConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return PosturemapConfig::default();
        }
    };

    match discover_config(current) {
        Some((path, config)) => {
            log::info!("Using config {}", path.display());
            config
        }
        None => {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            PosturemapConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThresholdPreset;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(indoc! {r#"
            preset = "strict"
            min_visibility = 0.6

            [thresholds.forward_head_ratio]
            normal = [-0.1, 0.1]
            mild = [-0.2, 0.2]
            moderate = [-0.3, 0.3]

            [weights]
            forward_head_ratio = 4.0

            [smoothing]
            window = 5
            method = "exponential"
        "#})
        .unwrap();

        assert_eq!(config.preset, Some(ThresholdPreset::Strict));
        assert_eq!(config.min_visibility, Some(0.6));
        assert!(config
            .thresholds
            .as_ref()
            .is_some_and(|t| t.contains_key("forward_head_ratio")));
        assert_eq!(config.smoothing.map(|s| s.window), Some(5));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = parse_config("min_visibility = \"high\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_walks_up_to_parent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("session").join("frames");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "min_visibility = 0.7\n").unwrap();

        let (path, config) = discover_config(nested).unwrap();
        assert_eq!(path, temp.path().join(CONFIG_FILE_NAME));
        assert_eq!(config.min_visibility, Some(0.7));
    }

    #[test]
    fn test_malformed_file_is_skipped_during_discovery() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "this is not toml = =").unwrap();
        assert!(try_load_config_from_path(&temp.path().join(CONFIG_FILE_NAME)).is_none());
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config_from_path(&temp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_ancestors_respect_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }
}
