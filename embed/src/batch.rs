use std::future::Future;

use tracing::debug;

use crate::error::EmbedError;
use crate::metadata::{merge_summing, Metadata};
use crate::request::EmbedRequest;
use crate::response::EmbedResponse;

/// Run `f` over chunks of at most `max_batch` inputs and join the results
/// into one response for `request`.
///
/// Chunks run sequentially and keep the request's options. Result indices
/// are shifted back to positions in the original request. Integer metadata
/// values (token usage) are summed across chunks; other values from later
/// chunks replace earlier ones. The first failing chunk fails the whole call.
/// An empty request yields an empty response without invoking `f`.
pub async fn call_in_batches<F, Fut>(
    request: EmbedRequest,
    max_batch: usize,
    mut f: F,
) -> Result<EmbedResponse, EmbedError>
where
    F: FnMut(EmbedRequest) -> Fut,
    Fut: Future<Output = Result<EmbedResponse, EmbedError>>,
{
    if max_batch == 0 {
        return Err(EmbedError::InvalidArgument(
            "max batch size must be positive".into(),
        ));
    }
    if request.is_empty() {
        return EmbedResponse::for_request(&request, Vec::new(), Metadata::new());
    }
    if request.len() <= max_batch {
        return f(request).await;
    }

    debug!(
        inputs = request.len(),
        max_batch,
        chunks = request.len().div_ceil(max_batch),
        "embed: splitting request"
    );

    let mut results = Vec::with_capacity(request.len());
    let mut metadata = Metadata::new();
    for chunk in request.inputs().chunks(max_batch) {
        let sub = EmbedRequest::new(chunk.iter().cloned(), request.options().clone());
        let offset = results.len();
        let (chunk_results, chunk_meta) = f(sub).await?.into_parts();
        if chunk_results.len() != chunk.len() {
            return Err(EmbedError::CountMismatch {
                got: chunk_results.len(),
                want: chunk.len(),
            });
        }
        results.extend(chunk_results.into_iter().map(|mut r| {
            r.index += offset;
            r
        }));
        merge_summing(&mut metadata, chunk_meta);
    }

    EmbedResponse::for_request(&request, results, metadata)
}
