//! Application configuration. Storage, seeding, access-gate policy.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Default timeout for fetching a thumbnail over HTTP.
pub const DEFAULT_MEDIA_TIMEOUT_SECS: u64 = 10;

/// Exact email domains admitted by the access gate when none are configured.
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &[
    "gmail.com",
    "hotmail.com",
    "outlook.com",
    "yahoo.com",
    "icloud.com",
    "live.com",
];

/// Domain fragments admitted when none are configured. ".com" also admits ".com.br".
pub const DEFAULT_ALLOWED_FRAGMENTS: &[&str] = &[".com"];

/// File name of the JSON catalog inside `data_dir`.
pub const CATALOG_FILE_NAME: &str = "catalog.json";

/// Where the catalog is kept between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// `{data_dir}/catalog.json`.
    Json,
    /// Process memory only; lost on exit.
    Memory,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageKind::Json),
            "memory" => Ok(StorageKind::Memory),
            other => Err(format!("unknown storage '{}' (expected json or memory)", other)),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding catalog.json. Read from MEDIA_CATALOG_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// "json" (default) or "memory". Read from MEDIA_CATALOG_STORAGE.
    #[serde(default)]
    pub storage: Option<String>,

    /// Start from the built-in catalog when storage is empty (default true).
    /// Read from MEDIA_CATALOG_SEED_DEFAULTS.
    #[serde(default)]
    pub seed_defaults: Option<bool>,

    // ─────────────────────────────────────────────────────────────────────────
    // Access gate
    // ─────────────────────────────────────────────────────────────────────────
    /// Comma-separated exact domains. Read from MEDIA_CATALOG_ALLOWED_DOMAINS.
    #[serde(default)]
    pub allowed_domains: Option<String>,

    /// Comma-separated domain fragments (e.g. ".com"). Read from MEDIA_CATALOG_ALLOWED_DOMAIN_FRAGMENTS.
    #[serde(default)]
    pub allowed_domain_fragments: Option<String>,

    /// Thumbnail fetch timeout. Read from MEDIA_CATALOG_MEDIA_TIMEOUT_SECS.
    #[serde(default)]
    pub media_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Sources, lowest priority first: optional file named by MEDIA_CATALOG_CONFIG, then env.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("MEDIA_CATALOG_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("MEDIA_CATALOG"));
        c.build()?.try_deserialize()
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or("./data"))
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir_or_default().join(CATALOG_FILE_NAME)
    }

    /// Storage backend. Defaults to JSON when unset.
    pub fn storage_or_default(&self) -> Result<StorageKind, String> {
        self.storage
            .as_deref()
            .map(StorageKind::from_str)
            .unwrap_or(Ok(StorageKind::Json))
    }

    pub fn seed_defaults_or_default(&self) -> bool {
        self.seed_defaults.unwrap_or(true)
    }

    pub fn allowed_domains_or_default(&self) -> Vec<String> {
        split_list(self.allowed_domains.as_deref(), DEFAULT_ALLOWED_DOMAINS)
    }

    pub fn allowed_domain_fragments_or_default(&self) -> Vec<String> {
        split_list(
            self.allowed_domain_fragments.as_deref(),
            DEFAULT_ALLOWED_FRAGMENTS,
        )
    }

    pub fn media_timeout_secs_or_default(&self) -> u64 {
        self.media_timeout_secs.unwrap_or(DEFAULT_MEDIA_TIMEOUT_SECS)
    }
}

/// Splits a comma-separated list, dropping blanks. Falls back to `default` when unset.
/// An explicitly empty value means an empty list.
fn split_list(raw: Option<&str>, default: &[&str]) -> Vec<String> {
    match raw {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.catalog_path(), PathBuf::from("./data").join("catalog.json"));
        assert_eq!(cfg.storage_or_default(), Ok(StorageKind::Json));
        assert!(cfg.seed_defaults_or_default());
        assert_eq!(cfg.allowed_domains_or_default().len(), 6);
        assert_eq!(cfg.allowed_domain_fragments_or_default(), vec![".com"]);
        assert_eq!(cfg.media_timeout_secs_or_default(), 10);
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig {
            storage: Some("Memory".into()),
            allowed_domains: Some(" example.org, ,corp.io ".into()),
            allowed_domain_fragments: Some(String::new()),
            ..AppConfig::default()
        };
        assert_eq!(cfg.storage_or_default(), Ok(StorageKind::Memory));
        assert_eq!(cfg.allowed_domains_or_default(), vec!["example.org", "corp.io"]);
        assert!(cfg.allowed_domain_fragments_or_default().is_empty());
    }

    #[test]
    fn test_bad_storage() {
        let cfg = AppConfig {
            storage: Some("sqlite".into()),
            ..AppConfig::default()
        };
        assert!(cfg.storage_or_default().is_err());
    }
}
