use crate::batch::call_in_batches;
use crate::config::EmbedConfig;
use crate::error::EmbedError;
use crate::model::EmbeddingModel;
use crate::openai_compat::{call_embedding_api, check_inputs, Defaults, Endpoint};
use crate::request::EmbedRequest;
use crate::response::EmbedResponse;

/// DashScope embedding models.
pub const MODEL_DASHSCOPE_V4: &str = "text-embedding-v4";
pub const MODEL_DASHSCOPE_V3: &str = "text-embedding-v3";
pub const MODEL_DASHSCOPE_V2: &str = "text-embedding-v2";
pub const MODEL_DASHSCOPE_V1: &str = "text-embedding-v1";

const DASHSCOPE_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";
const DASHSCOPE_MAX_BATCH: usize = 10;
const DASHSCOPE_DEFAULT_DIM: usize = 1024;

const DASHSCOPE_DEFAULTS: Defaults = Defaults {
    base_url: DASHSCOPE_BASE_URL,
    model: MODEL_DASHSCOPE_V4,
    dimensions: DASHSCOPE_DEFAULT_DIM,
};

/// DashScope embedder using Aliyun DashScope's OpenAI-compatible API.
///
/// Requests larger than 10 texts are split into several API calls.
pub struct DashScope {
    ep: Endpoint,
}

impl DashScope {
    pub fn new(api_key: &str) -> Self {
        Self::with_config(api_key, EmbedConfig::default())
    }

    pub fn with_config(api_key: &str, cfg: EmbedConfig) -> Self {
        Self {
            ep: Endpoint::new(api_key, &cfg, DASHSCOPE_DEFAULTS),
        }
    }

    pub fn model(&self) -> &str {
        &self.ep.model
    }

    pub fn dimension(&self) -> usize {
        self.ep.dimensions
    }
}

#[async_trait::async_trait]
impl EmbeddingModel for DashScope {
    async fn call(&self, request: EmbedRequest) -> Result<EmbedResponse, EmbedError> {
        check_inputs(&request)?;
        call_in_batches(request, DASHSCOPE_MAX_BATCH, |sub| async move {
            call_embedding_api(&self.ep, &sub).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let e = DashScope::new("sk-test");
        assert_eq!(e.model(), MODEL_DASHSCOPE_V4);
        assert_eq!(e.dimension(), DASHSCOPE_DEFAULT_DIM);
    }

    #[test]
    fn test_zero_dimension_falls_back() {
        let e = DashScope::with_config(
            "sk-test",
            EmbedConfig::default().with_model(MODEL_DASHSCOPE_V3).with_dimension(0),
        );
        assert_eq!(e.model(), MODEL_DASHSCOPE_V3);
        assert_eq!(e.dimension(), DASHSCOPE_DEFAULT_DIM);
    }

    #[tokio::test]
    async fn test_empty_request_skips_network() {
        let e = DashScope::with_config("sk-test", EmbedConfig::default().with_base_url("http://127.0.0.1:9"));
        let resp = e.call(EmbedRequest::from_texts(&[])).await.unwrap();
        assert!(resp.is_empty());

        let err = e.embed_batch(&["ok", ""]).await.unwrap_err();
        assert!(matches!(err, EmbedError::EmptyInput(1)));
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_dimensions() {
        let api_key = std::env::var("DASHSCOPE_API_KEY").expect("DASHSCOPE_API_KEY required");
        let e = DashScope::with_config(&api_key, EmbedConfig::default().with_dimension(512));
        assert_eq!(e.dimensions().await.unwrap(), 512);

        let texts: Vec<String> = (0..12).map(|i| format!("sentence number {i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let resp = e.embed_for_response(&refs).await.unwrap();
        assert_eq!(resp.len(), 12);
        assert!(resp.metadata().contains_key("usage"));
    }
}
