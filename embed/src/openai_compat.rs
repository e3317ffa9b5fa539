use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EmbedConfig;
use crate::error::EmbedError;
use crate::metadata::{MetaValue, Metadata};
use crate::request::EmbedRequest;
use crate::response::EmbedResponse;

/// OpenAI-compatible embedding request body.
#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
    dimensions: usize,
    encoding_format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
}

/// OpenAI-compatible embedding response.
#[derive(Deserialize)]
struct WireResponse {
    data: Vec<WireData>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct WireData {
    index: usize,
    embedding: Vec<f64>,
}

#[derive(Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: i64,
    #[serde(default)]
    total_tokens: i64,
}

/// Connection settings shared by the OpenAI-compatible providers.
pub(crate) struct Endpoint {
    client: Client,
    api_key: String,
    base_url: String,
    pub(crate) model: String,
    pub(crate) dimensions: usize,
    timeout: Option<Duration>,
}

impl Endpoint {
    pub(crate) fn new(api_key: &str, cfg: &EmbedConfig, defaults: Defaults) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: cfg.base_url_or(defaults.base_url),
            model: cfg.model_or(defaults.model),
            dimensions: cfg.dimension_or(defaults.dimensions),
            timeout: cfg.timeout(),
        }
    }
}

/// Provider defaults applied when the config leaves a field empty.
pub(crate) struct Defaults {
    pub base_url: &'static str,
    pub model: &'static str,
    pub dimensions: usize,
}

/// The embeddings endpoints reject empty strings; fail before sending.
pub(crate) fn check_inputs(request: &EmbedRequest) -> Result<(), EmbedError> {
    match request.inputs().iter().position(|t| t.is_empty()) {
        Some(i) => Err(EmbedError::EmptyInput(i)),
        None => Ok(()),
    }
}

/// Call an OpenAI-compatible embedding API endpoint.
///
/// Both DashScope and OpenAI use the same request/response format.
/// The only differences are base_url, model name, and max batch size
/// (handled by the caller). `request.options()` overrides model and
/// dimensions; an `extra["user"]` string is forwarded as the end-user id.
pub(crate) async fn call_embedding_api(
    ep: &Endpoint,
    request: &EmbedRequest,
) -> Result<EmbedResponse, EmbedError> {
    let opts = request.options();
    let model = opts.model.as_deref().unwrap_or(&ep.model);
    let dimensions = opts.dimensions.unwrap_or(ep.dimensions);

    let url = format!("{}/embeddings", ep.base_url);
    let body = WireRequest {
        model,
        input: request.input_strs(),
        dimensions,
        encoding_format: "float",
        user: opts.extra.get("user").and_then(MetaValue::as_str),
    };

    debug!(%url, model, dimensions, inputs = request.len(), "embed: request");

    let mut builder = ep.client.post(&url).bearer_auth(&ep.api_key).json(&body);
    if let Some(timeout) = ep.timeout {
        builder = builder.timeout(timeout);
    }

    let resp = builder
        .send()
        .await
        .map_err(|e| EmbedError::Api(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        warn!(%status, model, "embed: request failed");
        return Err(EmbedError::Api(format!("HTTP {status}: {body}")));
    }

    let data: WireResponse = resp
        .json()
        .await
        .map_err(|e| EmbedError::Api(e.to_string()))?;

    into_response(request, data)
}

/// Map a wire response onto `request`.
fn into_response(request: &EmbedRequest, data: WireResponse) -> Result<EmbedResponse, EmbedError> {
    let batch_size = request.len();

    // Fill results by index (API may return out of order).
    let mut vecs: Vec<Option<Vec<f32>>> = vec![None; batch_size];
    for item in data.data {
        let slot = vecs.get_mut(item.index).ok_or(EmbedError::UnexpectedIndex {
            index: item.index,
            batch_size,
        })?;
        if slot.is_some() {
            return Err(EmbedError::DuplicateIndex(item.index));
        }
        *slot = Some(item.embedding.iter().map(|&v| v as f32).collect());
    }

    // Verify all slots are filled.
    let vecs = vecs
        .into_iter()
        .enumerate()
        .map(|(i, v)| v.ok_or(EmbedError::MissingIndex(i)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut metadata = Metadata::new();
    if let Some(model) = data.model {
        metadata.insert("model".into(), model.into());
    }
    if let Some(usage) = data.usage {
        let mut u = Metadata::new();
        u.insert("prompt_tokens".into(), usage.prompt_tokens.into());
        u.insert("total_tokens".into(), usage.total_tokens.into());
        metadata.insert("usage".into(), u.into());
    }

    EmbedResponse::from_vectors(request, vecs, metadata)
}
