use std::sync::Arc;

use tracing::debug;

use crate::error::EmbedError;
use crate::request::EmbedRequest;
use crate::response::EmbedResponse;

/// Placeholder text embedded by [`EmbeddingModel::dimensions`].
pub const PROBE_TEXT: &str = "dimension probe";

/// EmbeddingModel converts text into dense float32 vectors.
///
/// Providers implement [`call`](EmbeddingModel::call); every other method is
/// derived from it. A provider may override a derived method (for example to
/// answer `dimensions` from its configuration) but must keep its semantics,
/// or return [`EmbedError::Unsupported`].
///
/// Implementations must be safe for concurrent use (Send + Sync).
#[async_trait::async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Embed every input of `request`.
    ///
    /// Either the response holds one result per input, in input order, or
    /// the call fails as a whole.
    async fn call(&self, request: EmbedRequest) -> Result<EmbedResponse, EmbedError>;

    /// Return the embedding vector for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut vecs = self.embed_batch(&[text]).await?;
        if vecs.len() != 1 {
            return Err(EmbedError::CountMismatch {
                got: vecs.len(),
                want: 1,
            });
        }
        Ok(vecs.swap_remove(0))
    }

    /// Return embedding vectors for multiple texts, in input order.
    /// An empty slice returns an empty list without calling the provider.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(self.embed_for_response(texts).await?.into_vectors())
    }

    /// Like `embed_batch` but keeps the per-result and response metadata.
    async fn embed_for_response(&self, texts: &[&str]) -> Result<EmbedResponse, EmbedError> {
        let request = EmbedRequest::from_texts(texts);
        if request.is_empty() {
            return Ok(EmbedResponse::empty());
        }

        let want = request.len();
        let resp = self.call(request).await?;
        if resp.len() != want {
            return Err(EmbedError::CountMismatch {
                got: resp.len(),
                want,
            });
        }
        Ok(resp)
    }

    /// Return the dimensionality of the output vectors under the default
    /// options. Performs a real provider call on every invocation.
    async fn dimensions(&self) -> Result<usize, EmbedError> {
        let dim = self.embed(PROBE_TEXT).await?.len();
        debug!(dim, "embed: dimension probe");
        Ok(dim)
    }
}

macro_rules! forward_embedding_model {
    ([$($gen:tt)*] $ty:ty) => {
        #[async_trait::async_trait]
        impl<$($gen)*> EmbeddingModel for $ty
        where
            M: EmbeddingModel + ?Sized,
        {
            async fn call(&self, request: EmbedRequest) -> Result<EmbedResponse, EmbedError> {
                (**self).call(request).await
            }

            async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
                (**self).embed(text).await
            }

            async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
                (**self).embed_batch(texts).await
            }

            async fn embed_for_response(
                &self,
                texts: &[&str],
            ) -> Result<EmbedResponse, EmbedError> {
                (**self).embed_for_response(texts).await
            }

            async fn dimensions(&self) -> Result<usize, EmbedError> {
                (**self).dimensions().await
            }
        }
    };
}

forward_embedding_model!([M] Arc<M>);
forward_embedding_model!([M] Box<M>);
forward_embedding_model!(['a, M] &'a M);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Metadata;
    use crate::options::EmbedOptions;

    /// Embeds each text as [len, first byte].
    struct Shape;

    #[async_trait::async_trait]
    impl EmbeddingModel for Shape {
        async fn call(&self, request: EmbedRequest) -> Result<EmbedResponse, EmbedError> {
            let vecs = request
                .inputs()
                .iter()
                .map(|t| vec![t.len() as f32, t.as_bytes()[0] as f32])
                .collect();
            EmbedResponse::from_vectors(&request, vecs, Metadata::new())
        }
    }

    #[tokio::test]
    async fn test_embed_matches_batch() {
        let single = Shape.embed("hello").await.unwrap();
        let batch = Shape.embed_batch(&["hello"]).await.unwrap();
        assert_eq!(single, batch[0]);
        assert_eq!(single, vec![5.0, b'h' as f32]);
    }

    #[tokio::test]
    async fn test_dimensions_probe() {
        assert_eq!(Shape.dimensions().await.unwrap(), 2);
        assert_eq!(
            Shape.dimensions().await.unwrap(),
            Shape.embed(PROBE_TEXT).await.unwrap().len()
        );
    }

    #[tokio::test]
    async fn test_shared_forwarding() {
        let shared: Arc<dyn EmbeddingModel> = Arc::new(Shape);
        let vecs = shared.embed_batch(&["ab", "c"]).await.unwrap();
        assert_eq!(vecs, vec![vec![2.0, b'a' as f32], vec![1.0, b'c' as f32]]);

        let boxed: Box<dyn EmbeddingModel> = Box::new(Shape);
        assert_eq!(boxed.dimensions().await.unwrap(), 2);

        let borrowed = &Shape;
        assert_eq!(borrowed.embed("z").await.unwrap(), vec![1.0, b'z' as f32]);
    }

    #[tokio::test]
    async fn test_call_with_options() {
        let req = EmbedRequest::new(["xy"], EmbedOptions::none().with_model("m"));
        let resp = Shape.call(req).await.unwrap();
        assert_eq!(resp.results()[0].embedding, vec![2.0, b'x' as f32]);
    }
}
