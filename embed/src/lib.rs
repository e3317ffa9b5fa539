//! Provider-independent text embedding.
//!
//! [`EmbeddingModel`] is the contract every provider implements: one
//! primitive [`call`](EmbeddingModel::call) taking an [`EmbedRequest`] and
//! returning an [`EmbedResponse`], plus derived conveniences (`embed`,
//! `embed_batch`, `embed_for_response`, `dimensions`).

pub mod batch;
pub mod config;
pub mod dashscope;
pub mod document;
pub mod error;
pub mod metadata;
pub mod model;
pub mod openai;
pub(crate) mod openai_compat;
pub mod options;
pub mod request;
pub mod response;

pub use batch::call_in_batches;
pub use config::EmbedConfig;
pub use dashscope::DashScope;
pub use document::{embed_document, Document, TextExtractor, TitleBody};
pub use error::{EmbedError, ErrorKind};
pub use metadata::{MetaValue, Metadata};
pub use model::{EmbeddingModel, PROBE_TEXT};
pub use openai::OpenAI;
pub use options::EmbedOptions;
pub use request::EmbedRequest;
pub use response::{EmbedResponse, VectorResult};
