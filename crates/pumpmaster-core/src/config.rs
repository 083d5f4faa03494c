use serde::{Deserialize, Serialize};

fn default_page_size() -> usize {
    10
}

fn default_page_size_options() -> Vec<usize> {
    vec![10, 20, 50, 100]
}

fn default_latency() -> bool {
    true
}

/// Console settings loaded from `config.toml`. Every field has a
/// default so a missing or partial file still yields a usable config.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    #[serde(default)]
    pub fixture: FixtureConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct FixtureConfig {
    /// Simulate network latency on fixture-backed calls.
    #[serde(default = "default_latency")]
    pub latency: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            fixture: FixtureConfig::default(),
        }
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            latency: default_latency(),
        }
    }
}
