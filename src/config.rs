//! Engine configuration
//!
//! Endpoint priority list and the filtering policy, loaded once at process
//! start and read-only afterwards.

use crate::error::{QuerierError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Built-in endpoint priority list; index 0 is tried first.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://wikit.unitreaty.org/apiv1/graphql",
    "https://wikittest.unitreaty.org/apiv1/graphql",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerierConfig {
    /// Ordered API endpoints, highest priority first.
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// Author names excluded from every result set.
    #[serde(default)]
    pub banned_authors: Vec<String>,

    /// Article titles excluded from search results.
    #[serde(default)]
    pub banned_titles: Vec<String>,
}

fn default_endpoints() -> Vec<String> {
    DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect()
}

impl Default for QuerierConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            banned_authors: Vec::new(),
            banned_titles: Vec::new(),
        }
    }
}

impl QuerierConfig {
    /// Load configuration from a JSON file, then apply environment
    /// overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QuerierError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let mut config: QuerierConfig = serde_json::from_str(&contents)
            .map_err(|e| QuerierError::Config(format!("invalid config {}: {}", path.display(), e)))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Defaults plus environment overrides, for hosts that run without a
    /// config file.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// `WIKIT_ENDPOINTS` replaces the endpoint list (comma-separated,
    /// priority order).
    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var("WIKIT_ENDPOINTS") {
            let endpoints: Vec<String> = raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !endpoints.is_empty() {
                self.endpoints = endpoints;
            }
        }
    }

    pub fn filter_policy(&self) -> FilterPolicy {
        FilterPolicy {
            banned_authors: self.banned_authors.iter().cloned().collect(),
            banned_titles: self.banned_titles.iter().cloned().collect(),
        }
    }
}

/// Exclusion predicate over authors and titles. Never a ranking signal.
#[derive(Debug, Clone, Default)]
pub struct FilterPolicy {
    pub banned_authors: HashSet<String>,
    pub banned_titles: HashSet<String>,
}

impl FilterPolicy {
    pub fn is_banned_author(&self, name: &str) -> bool {
        self.banned_authors.contains(name)
    }

    pub fn is_banned_title(&self, title: &str) -> bool {
        self.banned_titles.contains(title)
    }
}
