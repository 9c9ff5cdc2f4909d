use std::env;
use std::path::PathBuf;

use crate::utils::logging::DEFAULT_LOG_FILE;

pub const DEFAULT_DATA_FILE: &str = "data_corrupted.txt";
pub const DEFAULT_BROKEN_PATH: &str = "/invalid/path/to/force/error.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub broken_path: PathBuf,
    /// When set, the matrix demo uses a random N x N matrix instead of the fixed one.
    pub matrix_size: Option<usize>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            broken_path: PathBuf::from(DEFAULT_BROKEN_PATH),
            matrix_size: None,
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any key lookup; unset or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let path_var = |name: &str, default: PathBuf| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default)
        };

        Self {
            data_file: path_var("LAB_DATA_FILE", defaults.data_file),
            log_file: path_var("LAB_LOG_FILE", defaults.log_file),
            broken_path: path_var("LAB_BROKEN_PATH", defaults.broken_path),
            matrix_size: lookup("LAB_MATRIX_SIZE")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|&n| n > 0),
        }
    }
}
