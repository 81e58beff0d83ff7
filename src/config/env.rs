//! `.env` file loading

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load `.env` from the current directory if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    /// Load an env file if it exists. Variables already present in the
    /// process environment are not overridden.
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path).map_err(|e| {
                AppError::config(format!("Failed to load {}: {}", path.display(), e))
            })?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No {} file found, using defaults and CLI arguments", path.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_env_file_sets_missing_variables() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "# comment").unwrap();
        writeln!(temp_file, "SPEEDTEST_ENV_LOADER_CHECK=loaded").unwrap();

        EnvManager::load_env_file_from(temp_file.path(), false).unwrap();
        assert_eq!(std::env::var("SPEEDTEST_ENV_LOADER_CHECK").unwrap(), "loaded");
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let result = EnvManager::load_env_file_from(Path::new("/nonexistent/.env.speedtest"), true);
        assert!(result.is_ok());
    }

    #[test]
    fn test_malformed_env_file_is_config_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "NOT A VALID LINE").unwrap();

        let error = EnvManager::load_env_file_from(temp_file.path(), false).unwrap_err();
        assert_eq!(error.category(), "CONFIG");
    }
}
