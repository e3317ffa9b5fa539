//! Embedding of richer content objects through a text extractor.

use serde::{Deserialize, Serialize};

use crate::error::EmbedError;
use crate::metadata::Metadata;
use crate::model::EmbeddingModel;

/// TextExtractor reduces a content object to the text that gets embedded.
pub trait TextExtractor<D: ?Sized>: Send + Sync {
    fn extract(&self, doc: &D) -> Result<String, EmbedError>;
}

impl<D, F> TextExtractor<D> for F
where
    D: ?Sized,
    F: Fn(&D) -> String + Send + Sync,
{
    fn extract(&self, doc: &D) -> Result<String, EmbedError> {
        Ok(self(doc))
    }
}

/// Document is a titled text with free-form attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default)]
    pub body: String,

    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub attributes: Metadata,
}

impl Document {
    pub fn new(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            attributes: Metadata::new(),
        }
    }
}

/// TitleBody joins a document's non-empty title and body with a blank line.
pub struct TitleBody;

impl TextExtractor<Document> for TitleBody {
    fn extract(&self, doc: &Document) -> Result<String, EmbedError> {
        let parts: Vec<&str> = [doc.title.trim(), doc.body.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            return Err(EmbedError::InvalidArgument(
                "document has neither title nor body".into(),
            ));
        }
        Ok(parts.join("\n\n"))
    }
}

/// Extract the text of `doc` and embed it.
///
/// The model is not called if extraction fails.
pub async fn embed_document<M, X, D>(model: &M, extractor: &X, doc: &D) -> Result<Vec<f32>, EmbedError>
where
    M: EmbeddingModel + ?Sized,
    X: TextExtractor<D> + ?Sized,
    D: ?Sized,
{
    let text = extractor.extract(doc)?;
    model.embed(&text).await
}
