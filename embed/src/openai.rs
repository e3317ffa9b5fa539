use crate::batch::call_in_batches;
use crate::config::EmbedConfig;
use crate::error::EmbedError;
use crate::model::EmbeddingModel;
use crate::openai_compat::{call_embedding_api, check_inputs, Defaults, Endpoint};
use crate::request::EmbedRequest;
use crate::response::EmbedResponse;

/// OpenAI embedding models.
pub const MODEL_OPENAI_3_SMALL: &str = "text-embedding-3-small";
pub const MODEL_OPENAI_3_LARGE: &str = "text-embedding-3-large";
pub const MODEL_OPENAI_ADA_002: &str = "text-embedding-ada-002";

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_MAX_BATCH: usize = 2048;
const OPENAI_DEFAULT_DIM: usize = 1536;

const OPENAI_DEFAULTS: Defaults = Defaults {
    base_url: OPENAI_BASE_URL,
    model: MODEL_OPENAI_3_SMALL,
    dimensions: OPENAI_DEFAULT_DIM,
};

/// OpenAI embedder using the OpenAI embeddings API.
///
/// Also works with any OpenAI-compatible provider (e.g. SiliconFlow)
/// via `with_config` and `EmbedConfig::with_base_url`.
pub struct OpenAI {
    ep: Endpoint,
}

impl OpenAI {
    pub fn new(api_key: &str) -> Self {
        Self::with_config(api_key, EmbedConfig::default())
    }

    pub fn with_config(api_key: &str, cfg: EmbedConfig) -> Self {
        Self {
            ep: Endpoint::new(api_key, &cfg, OPENAI_DEFAULTS),
        }
    }

    pub fn model(&self) -> &str {
        &self.ep.model
    }

    /// Configured output dimensionality, sent with every request.
    pub fn dimension(&self) -> usize {
        self.ep.dimensions
    }
}

#[async_trait::async_trait]
impl EmbeddingModel for OpenAI {
    async fn call(&self, request: EmbedRequest) -> Result<EmbedResponse, EmbedError> {
        check_inputs(&request)?;
        call_in_batches(request, OPENAI_MAX_BATCH, |sub| async move {
            call_embedding_api(&self.ep, &sub).await
        })
        .await
    }
}
