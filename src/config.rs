/// Runtime configuration: database location and share base URL.
use std::path::PathBuf;

use anyhow::{Context, Result};
use url::Url;

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "SWATCHR_DB_PATH";

/// Environment variable overriding the share base URL.
pub const BASE_URL_ENV: &str = "SWATCHR_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://swatchr.app/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    /// Origin and path that share links are built on.
    pub base_url: Url,
}

impl Config {
    /// Resolves configuration from CLI flags, then the environment, then defaults.
    pub fn resolve(db_path: Option<PathBuf>, base_url: Option<String>) -> Result<Self> {
        Self::resolve_with(db_path, base_url, |name| std::env::var(name).ok())
    }

    fn resolve_with(
        db_path: Option<PathBuf>,
        base_url: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let db_path = db_path
            .or_else(|| non_empty(lookup(DB_PATH_ENV)).map(PathBuf::from))
            .unwrap_or_else(default_db_path);
        let raw_url = base_url
            .or_else(|| non_empty(lookup(BASE_URL_ENV)))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut base_url =
            Url::parse(raw_url.trim()).with_context(|| format!("Invalid base URL '{raw_url}'"))?;
        base_url.set_query(None);
        base_url.set_fragment(None);
        Ok(Self { db_path, base_url })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Returns the default database path inside the user's data directory.
/// Falls back to `./swatchr.db` when no data dir is found.
pub fn default_db_path() -> PathBuf {
    match dirs::data_local_dir() {
        Some(data_dir) => data_dir.join("swatchr").join("swatchr.db"),
        None => PathBuf::from("swatchr.db"),
    }
}
