use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Controlled category a keyword classifies into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fruit,
    Cool,
    Sweet,
    Creamy,
    Tobacco,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fruit => "fruit",
            Category::Cool => "cool",
            Category::Sweet => "sweet",
            Category::Creamy => "creamy",
            Category::Tobacco => "tobacco",
            Category::Other => "other",
        }
    }
}

/// One keyword hit: the canonical dictionary term and its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub term: String,
    pub category: Category,
}

/// The fixed term -> category dictionary the default lexicon is built from.
const DEFAULT_TERMS: &[(&str, Category)] = &[
    ("mango", Category::Fruit),
    ("peach", Category::Fruit),
    ("apple", Category::Fruit),
    ("strawberry", Category::Fruit),
    ("raspberry", Category::Fruit),
    ("blueberry", Category::Fruit),
    ("berry", Category::Fruit),
    ("banana", Category::Fruit),
    ("grape", Category::Fruit),
    ("watermelon", Category::Fruit),
    ("melon", Category::Fruit),
    ("cherry", Category::Fruit),
    ("lemon", Category::Fruit),
    ("lime", Category::Fruit),
    ("orange", Category::Fruit),
    ("pineapple", Category::Fruit),
    ("kiwi", Category::Fruit),
    ("guava", Category::Fruit),
    ("lychee", Category::Fruit),
    ("ice", Category::Cool),
    ("cool", Category::Cool),
    ("menthol", Category::Cool),
    ("mint", Category::Cool),
    ("frost", Category::Cool),
    ("chill", Category::Cool),
    ("arctic", Category::Cool),
    ("sweet", Category::Sweet),
    ("sugar", Category::Sweet),
    ("candy", Category::Sweet),
    ("honey", Category::Sweet),
    ("caramel", Category::Sweet),
    ("bubblegum", Category::Sweet),
    ("syrup", Category::Sweet),
    ("cream", Category::Creamy),
    ("milk", Category::Creamy),
    ("custard", Category::Creamy),
    ("vanilla", Category::Creamy),
    ("yogurt", Category::Creamy),
    ("butter", Category::Creamy),
    ("cheesecake", Category::Creamy),
    ("tobacco", Category::Tobacco),
    ("cigar", Category::Tobacco),
    ("smoke", Category::Tobacco),
    ("salt", Category::Other),
    ("spice", Category::Other),
    ("herbal", Category::Other),
    ("coffee", Category::Other),
    ("cola", Category::Other),
];

/// Immutable stem -> (canonical term, category) lookup, built once and
/// shared by reference with every tagging call.
#[derive(Debug, Clone)]
pub struct Lexicon {
    stems: HashMap<String, (String, Category)>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::from_terms(DEFAULT_TERMS)
    }

    /// Build a lexicon from an explicit term -> category table. Keys are
    /// stemmed with the same reduction applied to description tokens, so
    /// morphological variants of a dictionary term resolve to it.
    pub fn from_terms(terms: &[(&str, Category)]) -> Self {
        let stems = terms
            .iter()
            .map(|(term, category)| (stem(term), (term.to_string(), *category)))
            .collect();
        Self { stems }
    }

    /// Distinct (canonical term, category) pairs whose stems occur in the
    /// description, in discovery order. Empty input yields an empty set.
    pub fn tag(&self, description: &str) -> Vec<Tag> {
        let mut tags: Vec<Tag> = Vec::new();

        for token in description
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            if let Some((term, category)) = self.stems.get(&stem(token))
                && !tags.iter().any(|tag| &tag.term == term)
            {
                tags.push(Tag {
                    term: term.clone(),
                    category: *category,
                });
            }
        }

        tags
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic suffix-stripping reduction. Not full Porter, but the same
/// family: strip derivational/inflectional endings, then a final e/y, so
/// variants like "icy", "iced" and "ice" share one stem.
pub fn stem(token: &str) -> String {
    let mut word = token.to_lowercase();

    if word.len() > 5 && word.ends_with("ness") {
        word.truncate(word.len() - 4);
    }

    if word.len() > 4 && word.ends_with("ing") {
        word.truncate(word.len() - 3);
    } else if word.len() > 3 && word.ends_with("ed") {
        word.truncate(word.len() - 2);
    }

    if word.len() > 3 && word.ends_with("ies") {
        word.truncate(word.len() - 3);
        word.push('y');
    } else if word.len() > 3 && word.ends_with("es") {
        word.truncate(word.len() - 2);
    } else if word.len() > 2 && word.ends_with('s') && !word.ends_with("ss") {
        word.truncate(word.len() - 1);
    }

    if word.len() > 2 && (word.ends_with('e') || word.ends_with('y')) {
        word.truncate(word.len() - 1);
    }

    word
}
