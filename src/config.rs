use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

pub const API_KEY_VAR: &str = "API_KEY_SEARCH_GOOGLE";
pub const SEARCH_ENGINE_ID_VAR: &str = "SEARCH_ENGINE_ID";

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
pub const DEFAULT_LANGUAGE: &str = "lang_es";
pub const DEFAULT_OUTPUT_FILE: &str = "resultados.json";
pub const DEFAULT_QUERY: &str = "\"MySQL dump\" filetype:sql intext:-- Host";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set and non-empty (environment or .env file)")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub search_engine_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("search_engine_id", &self.search_engine_id)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub query: String,
    pub language: String,
    pub timeout: Duration,
}

/// Which result offsets to request: `start_offset`, `start_offset + page_size`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_count: u32,
    pub page_size: u32,
    pub start_offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_count: 3,
            page_size: 10,
            start_offset: 1,
        }
    }
}

impl Pagination {
    /// Stops early rather than wrap when an offset would not fit in a `u32`.
    pub fn offsets(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.page_count).map_while(move |page| {
            page.checked_mul(self.page_size)?
                .checked_add(self.start_offset)
        })
    }
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub search: SearchConfig,
    pub pagination: Pagination,
    pub output: OutputConfig,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required(&lookup, API_KEY_VAR)?;
        let search_engine_id = required(&lookup, SEARCH_ENGINE_ID_VAR)?;
        let timeout_secs = positive(&lookup, "SEARCH_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        let config = Self {
            credentials: Credentials {
                api_key,
                search_engine_id,
            },
            search: SearchConfig {
                endpoint: optional(&lookup, "SEARCH_API_URL")
                    .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
                query: optional(&lookup, "SEARCH_QUERY").unwrap_or_else(|| DEFAULT_QUERY.to_string()),
                language: optional(&lookup, "SEARCH_LANGUAGE")
                    .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            pagination: Pagination {
                page_count: positive(&lookup, "SEARCH_PAGE_COUNT", 3)?,
                page_size: positive(&lookup, "SEARCH_PAGE_SIZE", 10)?,
                start_offset: positive(&lookup, "SEARCH_START_OFFSET", 1)?,
            },
            output: OutputConfig {
                path: optional(&lookup, "SEARCH_OUTPUT_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            },
        };
        info!("API key and search engine id loaded");
        Ok(config)
    }
}

fn optional<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Credentials are passed through verbatim; only an absent or empty value is rejected.
fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(var))
}

fn positive<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Default,
{
    let Some(raw) = optional(lookup, var) else {
        return Ok(default);
    };
    match raw.parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_credentials_fail_closed() {
        let cases: Vec<(Vec<(&str, &str)>, &str)> = vec![
            (vec![], API_KEY_VAR),
            (vec![(SEARCH_ENGINE_ID_VAR, "cx")], API_KEY_VAR),
            (vec![(API_KEY_VAR, "key")], SEARCH_ENGINE_ID_VAR),
            (vec![(API_KEY_VAR, ""), (SEARCH_ENGINE_ID_VAR, "cx")], API_KEY_VAR),
            (vec![(API_KEY_VAR, "key"), (SEARCH_ENGINE_ID_VAR, "")], SEARCH_ENGINE_ID_VAR),
            (vec![(API_KEY_VAR, ""), (SEARCH_ENGINE_ID_VAR, "")], API_KEY_VAR),
        ];

        for (pairs, missing) in cases {
            let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert_eq!(err, ConfigError::MissingVar(missing), "pairs: {:?}", pairs);
        }
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(lookup_from(&[(API_KEY_VAR, "key"), (SEARCH_ENGINE_ID_VAR, "cx")]))
                .unwrap();

        assert_eq!(config.credentials.api_key, "key");
        assert_eq!(config.credentials.search_engine_id, "cx");
        assert_eq!(config.search.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.search.language, "lang_es");
        assert_eq!(config.search.query, DEFAULT_QUERY);
        assert_eq!(config.search.timeout, Duration::from_secs(10));
        assert_eq!(config.pagination, Pagination::default());
        assert_eq!(config.output.path, PathBuf::from("resultados.json"));
    }

    #[test]
    fn test_any_non_empty_key_accepted() {
        let config =
            Config::from_lookup(lookup_from(&[(API_KEY_VAR, "x"), (SEARCH_ENGINE_ID_VAR, "y")]))
                .unwrap();
        assert_eq!(config.credentials.api_key, "x");
    }

    #[test]
    fn test_credentials_kept_verbatim() {
        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, " abc "),
            (SEARCH_ENGINE_ID_VAR, " "),
        ]))
        .unwrap();
        assert_eq!(config.credentials.api_key, " abc ");
        assert_eq!(config.credentials.search_engine_id, " ");
    }

    #[test]
    fn test_overrides_and_invalid_numbers() {
        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "key"),
            (SEARCH_ENGINE_ID_VAR, "cx"),
            ("SEARCH_PAGE_COUNT", "5"),
            ("SEARCH_PAGE_SIZE", "20"),
            ("SEARCH_LANGUAGE", "lang_en"),
            ("SEARCH_OUTPUT_FILE", "out/dump.json"),
        ]))
        .unwrap();
        assert_eq!(config.pagination.page_count, 5);
        assert_eq!(config.pagination.page_size, 20);
        assert_eq!(config.search.language, "lang_en");
        assert_eq!(config.output.path, PathBuf::from("out/dump.json"));

        for (var, value) in [("SEARCH_PAGE_SIZE", "0"), ("SEARCH_TIMEOUT_SECS", "soon")] {
            let err = Config::from_lookup(lookup_from(&[
                (API_KEY_VAR, "key"),
                (SEARCH_ENGINE_ID_VAR, "cx"),
                (var, value),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{var}={value}");
        }
    }

    #[test]
    fn test_default_offsets() {
        let offsets: Vec<u32> = Pagination::default().offsets().collect();
        assert_eq!(offsets, vec![1, 11, 21]);
    }

    #[test]
    fn test_offsets_stop_before_overflow() {
        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "key"),
            (SEARCH_ENGINE_ID_VAR, "cx"),
            ("SEARCH_PAGE_SIZE", "4294967295"),
        ]))
        .unwrap();
        assert_eq!(config.pagination.offsets().collect::<Vec<_>>(), vec![1]);

        let near_max = Pagination {
            page_count: 3,
            page_size: 10,
            start_offset: u32::MAX - 15,
        };
        assert_eq!(
            near_max.offsets().collect::<Vec<_>>(),
            vec![u32::MAX - 15, u32::MAX - 5]
        );
    }

    #[test]
    fn test_credentials_debug_redacts_key() {
        let creds = Credentials {
            api_key: "AIza-secret".into(),
            search_engine_id: "cx".into(),
        };
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("AIza-secret"));
        assert!(rendered.contains("cx"));
    }
}
