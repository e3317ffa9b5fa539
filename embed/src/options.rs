use serde::{Deserialize, Serialize};

use crate::metadata::{MetaValue, Metadata};

/// Per-request options, interpreted by the provider.
///
/// `EmbedOptions::none()` (also the `Default`) asks the provider to use its
/// configured defaults. Keys in `extra` that a provider does not recognize
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedOptions {
    /// Model override for this request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Output dimensionality override for this request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<usize>,

    /// Provider-specific settings.
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub extra: Metadata,
}

impl EmbedOptions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.model.is_none() && self.dimensions.is_none() && self.extra.is_empty()
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    pub fn with_dimensions(mut self, dim: usize) -> Self {
        self.dimensions = Some(dim);
        self
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<MetaValue>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_sentinel() {
        assert!(EmbedOptions::none().is_none());
        assert!(EmbedOptions::default().is_none());
        assert!(!EmbedOptions::none().with_dimensions(256).is_none());
        assert!(!EmbedOptions::none().with_extra("user", "u-1").is_none());
    }

    #[test]
    fn test_builder() {
        let opts = EmbedOptions::none()
            .with_model("text-embedding-3-large")
            .with_dimensions(1024);
        assert_eq!(opts.model.as_deref(), Some("text-embedding-3-large"));
        assert_eq!(opts.dimensions, Some(1024));
        assert_eq!(
            serde_json::to_string(&opts).unwrap(),
            r#"{"model":"text-embedding-3-large","dimensions":1024}"#
        );
    }
}
