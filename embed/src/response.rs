use serde::{Deserialize, Serialize};

use crate::error::EmbedError;
use crate::metadata::Metadata;
use crate::request::EmbedRequest;

/// VectorResult is one embedding and its position in the originating request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorResult {
    /// Zero-based position of the input this vector was computed for.
    pub index: usize,

    pub embedding: Vec<f32>,

    /// Per-item provider facts, e.g. token usage for this input.
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl VectorResult {
    pub fn new(index: usize, embedding: Vec<f32>) -> Self {
        Self {
            index,
            embedding,
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// EmbedResponse is the output envelope of a provider call.
///
/// A response can only be built through [`EmbedResponse::for_request`] or
/// [`EmbedResponse::from_vectors`], which check that there is exactly one
/// result per input, that `results[i].index == i`, and that every vector has
/// the same non-zero length. Holding an `EmbedResponse` therefore means the
/// call completed in full.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedResponse {
    results: Vec<VectorResult>,

    #[serde(skip_serializing_if = "Metadata::is_empty")]
    metadata: Metadata,
}

impl EmbedResponse {
    pub fn for_request(
        request: &EmbedRequest,
        results: Vec<VectorResult>,
        metadata: Metadata,
    ) -> Result<Self, EmbedError> {
        validate(request.len(), &results)?;
        Ok(Self { results, metadata })
    }

    /// Build a response from bare vectors in input order.
    pub fn from_vectors(
        request: &EmbedRequest,
        vectors: Vec<Vec<f32>>,
        metadata: Metadata,
    ) -> Result<Self, EmbedError> {
        let results = vectors
            .into_iter()
            .enumerate()
            .map(|(i, v)| VectorResult::new(i, v))
            .collect();
        Self::for_request(request, results, metadata)
    }

    pub(crate) fn empty() -> Self {
        Self {
            results: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    pub fn results(&self) -> &[VectorResult] {
        &self.results
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Vector length shared by all results, `None` for an empty response.
    pub fn dimension(&self) -> Option<usize> {
        self.results.first().map(|r| r.embedding.len())
    }

    pub fn into_results(self) -> Vec<VectorResult> {
        self.results
    }

    pub fn into_vectors(self) -> Vec<Vec<f32>> {
        self.results.into_iter().map(|r| r.embedding).collect()
    }

    pub fn into_parts(self) -> (Vec<VectorResult>, Metadata) {
        (self.results, self.metadata)
    }
}

fn validate(want: usize, results: &[VectorResult]) -> Result<(), EmbedError> {
    if results.len() != want {
        return Err(EmbedError::CountMismatch {
            got: results.len(),
            want,
        });
    }

    let dim = match results.first() {
        Some(r) => r.embedding.len(),
        None => return Ok(()),
    };

    for (position, r) in results.iter().enumerate() {
        if r.index != position {
            return Err(EmbedError::IndexMismatch {
                position,
                index: r.index,
            });
        }
        if r.embedding.is_empty() {
            return Err(EmbedError::EmptyVector(position));
        }
        if r.embedding.len() != dim {
            return Err(EmbedError::DimensionMismatch {
                index: position,
                got: r.embedding.len(),
                want: dim,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(n: usize) -> EmbedRequest {
        let texts: Vec<String> = (0..n).map(|i| format!("t{i}")).collect();
        EmbedRequest::new(texts, Default::default())
    }

    #[test]
    fn test_from_vectors_assigns_indices() {
        let resp =
            EmbedResponse::from_vectors(&req(2), vec![vec![1.0, 0.0], vec![0.0, 1.0]], Metadata::new())
                .unwrap();
        assert_eq!(resp.len(), 2);
        assert_eq!(resp.results()[0].index, 0);
        assert_eq!(resp.results()[1].index, 1);
        assert_eq!(resp.results()[0].embedding, vec![1.0, 0.0]);
        assert_eq!(resp.dimension(), Some(2));
    }

    #[test]
    fn test_short_response_rejected() {
        let err = EmbedResponse::from_vectors(&req(2), vec![vec![1.0]], Metadata::new()).unwrap_err();
        assert!(matches!(err, EmbedError::CountMismatch { got: 1, want: 2 }));
        assert!(err.is_provider());
    }

    #[test]
    fn test_out_of_order_rejected() {
        let results = vec![VectorResult::new(1, vec![0.1]), VectorResult::new(0, vec![0.2])];
        let err = EmbedResponse::for_request(&req(2), results, Metadata::new()).unwrap_err();
        assert!(matches!(err, EmbedError::IndexMismatch { position: 0, index: 1 }));
    }

    #[test]
    fn test_ragged_dimensions_rejected() {
        let err = EmbedResponse::from_vectors(
            &req(3),
            vec![vec![1.0, 2.0], vec![1.0, 2.0], vec![1.0]],
            Metadata::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EmbedError::DimensionMismatch { index: 2, got: 1, want: 2 }
        ));
    }

    #[test]
    fn test_empty_vector_rejected() {
        let err = EmbedResponse::from_vectors(&req(1), vec![vec![]], Metadata::new()).unwrap_err();
        assert!(matches!(err, EmbedError::EmptyVector(0)));
    }

    #[test]
    fn test_empty_request_empty_response() {
        let resp = EmbedResponse::from_vectors(&req(0), vec![], Metadata::new()).unwrap();
        assert!(resp.is_empty());
        assert_eq!(resp.dimension(), None);
    }

    #[test]
    fn test_serialize() {
        let mut meta = Metadata::new();
        meta.insert("model".into(), "m".into());
        let resp = EmbedResponse::from_vectors(&req(1), vec![vec![0.5]], meta).unwrap();
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"results":[{"index":0,"embedding":[0.5]}],"metadata":{"model":"m"}}"#
        );
    }
}
