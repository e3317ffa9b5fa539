use thiserror::Error;

/// Coarse classification of an [`EmbedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed malformed input. Detected before any provider call.
    InvalidArgument,
    /// The backing service failed or returned an inconsistent response.
    Provider,
    /// The provider declined an operation it chose to override.
    Unsupported,
}

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("embed: empty text at index {0}")]
    EmptyInput(usize),

    #[error("embed: invalid argument: {0}")]
    InvalidArgument(String),

    #[error("embed: API error: {0}")]
    Api(String),

    #[error("embed: result count mismatch: got {got}, want {want}")]
    CountMismatch { got: usize, want: usize },

    #[error("embed: result at position {position} has index {index}")]
    IndexMismatch { position: usize, index: usize },

    #[error("embed: missing embedding for index {0}")]
    MissingIndex(usize),

    #[error("embed: duplicate embedding for index {0}")]
    DuplicateIndex(usize),

    #[error("embed: unexpected embedding index {index} for batch size {batch_size}")]
    UnexpectedIndex { index: usize, batch_size: usize },

    #[error("embed: empty vector at index {0}")]
    EmptyVector(usize),

    #[error("embed: dimension mismatch at index {index}: got {got}, want {want}")]
    DimensionMismatch { index: usize, got: usize, want: usize },

    #[error("embed: unsupported operation: {0}")]
    Unsupported(String),
}

impl EmbedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EmbedError::EmptyInput(_) | EmbedError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            EmbedError::Unsupported(_) => ErrorKind::Unsupported,
            EmbedError::Api(_)
            | EmbedError::CountMismatch { .. }
            | EmbedError::IndexMismatch { .. }
            | EmbedError::MissingIndex(_)
            | EmbedError::DuplicateIndex(_)
            | EmbedError::UnexpectedIndex { .. }
            | EmbedError::EmptyVector(_)
            | EmbedError::DimensionMismatch { .. } => ErrorKind::Provider,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    pub fn is_provider(&self) -> bool {
        self.kind() == ErrorKind::Provider
    }

    pub fn is_unsupported(&self) -> bool {
        self.kind() == ErrorKind::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(EmbedError::EmptyInput(0).kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            EmbedError::CountMismatch { got: 1, want: 2 }.kind(),
            ErrorKind::Provider
        );
        assert_eq!(EmbedError::MissingIndex(3).kind(), ErrorKind::Provider);
        assert_eq!(EmbedError::DuplicateIndex(0).kind(), ErrorKind::Provider);
        assert!(EmbedError::Unsupported("dimensions".into()).is_unsupported());
        assert!(EmbedError::Api("HTTP 500".into()).is_provider());
    }

    #[test]
    fn test_display_prefix() {
        let err = EmbedError::DimensionMismatch { index: 1, got: 3, want: 4 };
        assert_eq!(err.to_string(), "embed: dimension mismatch at index 1: got 3, want 4");
    }
}
