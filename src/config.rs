//! Runtime configuration from environment variables.
use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::data::Language;
use crate::parallel::WorkerPool;

pub const DEFAULT_DATA_DIR: &str = "data";

/// Settings shared by every command. Flags on the command line override them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub language: Language,
    pub fallback: Language,
    /// Batch worker threads; 0 means Rayon's default.
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            language: Language::En,
            fallback: Language::En,
            workers: 0,
        }
    }
}

impl Config {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TRAILBLAZE_DATA_DIR` - table directory (default: `data`)
    /// - `TRAILBLAZE_LANG` - output language (default: `en`)
    /// - `TRAILBLAZE_FALLBACK_LANG` - language used when a text is missing (default: `en`)
    /// - `TRAILBLAZE_WORKERS` - batch worker threads (default: all cores)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [Config::from_env] with a caller-supplied variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("TRAILBLAZE_DATA_DIR").filter(|dir| !dir.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(language) = read_var::<Language, _>(&lookup, "TRAILBLAZE_LANG") {
            config.language = language;
        }
        if let Some(fallback) = read_var::<Language, _>(&lookup, "TRAILBLAZE_FALLBACK_LANG") {
            config.fallback = fallback;
        }
        if let Some(workers) = read_var::<usize, _>(&lookup, "TRAILBLAZE_WORKERS") {
            config.workers = workers;
        }

        config
    }

    pub fn worker_pool(&self) -> WorkerPool {
        WorkerPool::with_workers(self.workers)
    }
}

fn read_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment variable");
            None
        }
    }
}
