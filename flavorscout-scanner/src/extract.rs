use crate::page::PageDocument;

/// Class-attribute substrings that mark a block as a likely description
/// container on storefront templates.
pub const DEFAULT_CLASS_HINTS: &[&str] = &[
    "description",
    "product-description",
    "product_desc",
    "desc",
    "detail",
];

/// Minimum collapsed text length, in characters, for a class-hinted block.
const MIN_BLOCK_LEN: usize = 40;

/// Minimum collapsed text length, in characters, for a bare paragraph.
const MIN_PARAGRAPH_LEN: usize = 60;

/// Heuristic description extractor. Pure function of the parsed page.
#[derive(Debug, Clone)]
pub struct Extractor {
    class_hints: Vec<String>,
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            class_hints: DEFAULT_CLASS_HINTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the class-hint allow-list. Hints are matched as
    /// case-insensitive substrings of the class attribute.
    pub fn with_class_hints(mut self, hints: Vec<String>) -> Self {
        self.class_hints = hints;
        self
    }

    /// Best-guess description for a page. Ordered heuristic, first hit wins:
    /// meta description verbatim, then a class-hinted block over 40 chars,
    /// then any paragraph over 60 chars.
    pub fn extract_description(&self, page: &PageDocument) -> Option<String> {
        if let Some(meta) = &page.meta_description {
            return Some(meta.clone());
        }

        for block in &page.blocks {
            let classes = block.classes.to_lowercase();
            let hinted = self
                .class_hints
                .iter()
                .any(|hint| classes.contains(&hint.to_lowercase()));
            if hinted && block.text.chars().count() > MIN_BLOCK_LEN {
                return Some(block.text.clone());
            }
        }

        page.paragraphs
            .iter()
            .find(|text| text.chars().count() > MIN_PARAGRAPH_LEN)
            .cloned()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}
