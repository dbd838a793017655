use crate::errors::{AppError, AppResult};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "truehome.sqlite3";
const DEFAULT_LOG_FILTER: &str = "truehome_dedup=info";

/// Runtime configuration. The database path comes from `--db`, then
/// `TRUEHOME_DB_PATH`, then the default; clap resolves the first two.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    pub fn new(db_path: PathBuf) -> AppResult<Self> {
        if db_path.as_os_str().is_empty() {
            return Err(AppError::Config("database path is empty".to_string()));
        }

        Ok(Self {
            db_path,
            log_filter: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_db_path_is_rejected() {
        let err = Config::new(PathBuf::new()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "unexpected error: {err}");
    }

    #[test]
    fn db_path_is_kept_as_given() {
        let config = Config::new(PathBuf::from("data/homes.sqlite3")).unwrap();
        assert_eq!(config.db_path, PathBuf::from("data/homes.sqlite3"));
        assert!(!config.log_filter.is_empty());
    }
}
