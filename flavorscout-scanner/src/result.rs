use serde::{Deserialize, Serialize};

/// Outcome of one traversal: the best description found for a term, if any.
/// A description is never present without the URL it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub term: String,
    pub description: Option<String>,
    pub source_url: Option<String>,
}

impl ExtractionResult {
    pub fn found(term: impl Into<String>, description: String, source_url: String) -> Self {
        Self {
            term: term.into(),
            description: Some(description),
            source_url: Some(source_url),
        }
    }

    pub fn not_found(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            description: None,
            source_url: None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.description.is_some()
    }
}
