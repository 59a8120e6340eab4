//! Application Configuration
//!
//! Values are baked in at build time from `TASKLINE_*` environment variables
//! and provided to the component tree through context.

use log::LevelFilter;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_PAGE_SIZE: u32 = 6;
pub const DEFAULT_DASHBOARD_PROJECTS: u32 = 6;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 300;

/// GitHub OAuth app settings; the login button is hidden without them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubOAuth {
    pub client_id: String,
    pub authorize_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub dashboard_projects: u32,
    pub search_debounce_ms: u32,
    pub log_level: LevelFilter,
    pub github: Option<GithubOAuth>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            dashboard_projects: DEFAULT_DASHBOARD_PROJECTS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            log_level: LevelFilter::Info,
            github: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "TASKLINE_API_BASE_URL" => option_env!("TASKLINE_API_BASE_URL"),
                "TASKLINE_PAGE_SIZE" => option_env!("TASKLINE_PAGE_SIZE"),
                "TASKLINE_DASHBOARD_PROJECTS" => option_env!("TASKLINE_DASHBOARD_PROJECTS"),
                "TASKLINE_SEARCH_DEBOUNCE_MS" => option_env!("TASKLINE_SEARCH_DEBOUNCE_MS"),
                "TASKLINE_LOG_LEVEL" => option_env!("TASKLINE_LOG_LEVEL"),
                "TASKLINE_GITHUB_CLIENT_ID" => option_env!("TASKLINE_GITHUB_CLIENT_ID"),
                "TASKLINE_GITHUB_AUTH_URL" => option_env!("TASKLINE_GITHUB_AUTH_URL"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let api_base_url = get("TASKLINE_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let github = match (get("TASKLINE_GITHUB_CLIENT_ID"), get("TASKLINE_GITHUB_AUTH_URL")) {
            (Some(client_id), Some(authorize_url)) => Some(GithubOAuth {
                client_id,
                authorize_url,
            }),
            _ => None,
        };

        Self {
            api_base_url,
            page_size: positive(get("TASKLINE_PAGE_SIZE"), "TASKLINE_PAGE_SIZE", defaults.page_size),
            dashboard_projects: positive(
                get("TASKLINE_DASHBOARD_PROJECTS"),
                "TASKLINE_DASHBOARD_PROJECTS",
                defaults.dashboard_projects,
            ),
            search_debounce_ms: get("TASKLINE_SEARCH_DEBOUNCE_MS")
                .and_then(|raw| parse_or_warn(&raw, "TASKLINE_SEARCH_DEBOUNCE_MS"))
                .unwrap_or(defaults.search_debounce_ms),
            log_level: get("TASKLINE_LOG_LEVEL")
                .and_then(|raw| parse_or_warn(&raw, "TASKLINE_LOG_LEVEL"))
                .unwrap_or(defaults.log_level),
            github,
        }
    }
}

fn parse_or_warn<T: std::str::FromStr>(raw: &str, key: &str) -> Option<T> {
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("[config] ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

fn positive(raw: Option<String>, key: &str, default: u32) -> u32 {
    raw.and_then(|raw| parse_or_warn::<u32>(&raw, key))
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), AppConfig::default());
        assert_eq!(AppConfig::default().api_base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("TASKLINE_API_BASE_URL", "https://tasks.example.com/api/"),
            ("TASKLINE_PAGE_SIZE", "9"),
            ("TASKLINE_SEARCH_DEBOUNCE_MS", "0"),
            ("TASKLINE_LOG_LEVEL", "debug"),
        ]);
        assert_eq!(cfg.api_base_url, "https://tasks.example.com/api");
        assert_eq!(cfg.page_size, 9);
        assert_eq!(cfg.search_debounce_ms, 0);
        assert_eq!(cfg.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let cfg = config(&[("TASKLINE_PAGE_SIZE", "0"), ("TASKLINE_DASHBOARD_PROJECTS", "lots")]);
        assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(cfg.dashboard_projects, DEFAULT_DASHBOARD_PROJECTS);
    }

    #[test]
    fn test_github_needs_both_values() {
        assert!(config(&[("TASKLINE_GITHUB_CLIENT_ID", "abc")]).github.is_none());
        let cfg = config(&[
            ("TASKLINE_GITHUB_CLIENT_ID", "abc"),
            ("TASKLINE_GITHUB_AUTH_URL", "https://github.com/login/oauth/authorize"),
        ]);
        assert_eq!(cfg.github.unwrap().client_id, "abc");
    }
}
