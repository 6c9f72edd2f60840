use crate::tagger::Lexicon;
use flavorscout_scanner::ExtractionResult;
use serde::{Deserialize, Serialize};

/// Rendered description when no page matched.
pub const DESCRIPTION_SENTINEL: &str = "not found";

/// Rendered source when no page matched.
pub const SOURCE_SENTINEL: &str = "N/A";

/// One exported row: a flavor with its description, derived tags and the
/// page the description came from. Sentinels stand in for absent values so
/// every input term yields exactly one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub flavor: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub categories: Vec<String>,
    pub source: String,
}

impl ResultRecord {
    /// Tag the extraction's description (if any) and substitute sentinels
    /// for the not-found case.
    pub fn from_extraction(extraction: ExtractionResult, lexicon: &Lexicon) -> Self {
        let tags = extraction
            .description
            .as_deref()
            .map(|description| lexicon.tag(description))
            .unwrap_or_default();

        let mut keywords = Vec::new();
        let mut categories = Vec::new();
        for tag in tags {
            keywords.push(tag.term);
            let category = tag.category.as_str().to_string();
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        Self {
            flavor: extraction.term,
            description: extraction
                .description
                .unwrap_or_else(|| DESCRIPTION_SENTINEL.to_string()),
            keywords,
            categories,
            source: extraction
                .source_url
                .unwrap_or_else(|| SOURCE_SENTINEL.to_string()),
        }
    }

    pub fn keywords_joined(&self) -> String {
        self.keywords.join(", ")
    }

    pub fn categories_joined(&self) -> String {
        self.categories.join(", ")
    }
}
