use serde::Serialize;

use crate::options::EmbedOptions;

/// EmbedRequest is the input envelope of a single provider call: an ordered
/// list of texts plus one options value.
///
/// Inputs cannot be modified after construction. Texts are opaque; limits on
/// their content are up to the provider. An empty list is allowed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedRequest {
    inputs: Vec<String>,
    options: EmbedOptions,
}

impl EmbedRequest {
    pub fn new<I, S>(inputs: I, options: EmbedOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            options,
        }
    }

    /// Build a request for `texts` with default options.
    pub fn from_texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().copied(), EmbedOptions::none())
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn options(&self) -> &EmbedOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Borrow the inputs as `&str` slices, e.g. for a wire body.
    pub fn input_strs(&self) -> Vec<&str> {
        self.inputs.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order_and_duplicates() {
        let req = EmbedRequest::from_texts(&["b", "a", "b"]);
        assert_eq!(req.inputs(), &["b", "a", "b"]);
        assert_eq!(req.len(), 3);
        assert!(req.options().is_none());
    }

    #[test]
    fn test_empty_list_allowed() {
        let req = EmbedRequest::from_texts(&[]);
        assert!(req.is_empty());
    }

    #[test]
    fn test_text_is_opaque() {
        let req = EmbedRequest::from_texts(&["", " ", "\t\n"]);
        assert_eq!(req.inputs(), &["", " ", "\t\n"]);
    }

    #[test]
    fn test_options_attached() {
        let req = EmbedRequest::new(vec!["x".to_string()], EmbedOptions::none().with_dimensions(8));
        assert_eq!(req.options().dimensions, Some(8));
    }
}
