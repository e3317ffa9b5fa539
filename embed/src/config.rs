use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Builder-style construction config for the bundled providers.
///
/// Empty strings and zero values fall back to the provider's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedConfig {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub dimension: usize,
    #[serde(default)]
    pub base_url: String,
    /// Per-request HTTP timeout in seconds. 0 means no timeout.
    #[serde(default)]
    pub timeout_secs: u64,
}

impl EmbedConfig {
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_dimension(mut self, dim: usize) -> Self {
        self.dimension = dim;
        self
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    pub(crate) fn model_or(&self, default: &str) -> String {
        if self.model.is_empty() {
            default.to_string()
        } else {
            self.model.clone()
        }
    }

    pub(crate) fn dimension_or(&self, default: usize) -> usize {
        if self.dimension == 0 { default } else { self.dimension }
    }

    pub(crate) fn base_url_or(&self, default: &str) -> String {
        let url = if self.base_url.is_empty() {
            default
        } else {
            self.base_url.as_str()
        };
        url.trim_end_matches('/').to_string()
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
