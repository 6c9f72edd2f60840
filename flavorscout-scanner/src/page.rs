use crate::error::{Result, ScrapeError};
use scraper::{Html, Selector};
use url::Url;

/// Normalized base URL a traversal starts from: scheme + host, trailing
/// slash stripped. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOrigin {
    base: Url,
    normalized: String,
}

impl SeedOrigin {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let base = Url::parse(trimmed)
            .map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

        match base.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ScrapeError::InvalidUrl(format!(
                    "unsupported scheme '{}' in {}",
                    other, trimmed
                )));
            }
        }

        let normalized = base.as_str().trim_end_matches('/').to_string();
        Ok(Self { base, normalized })
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn url(&self) -> &Url {
        &self.base
    }

    /// Whether a resolved URL stays on this origin. The prefix must end at
    /// a path or query boundary, so `http://shop.example.evil` does not
    /// pass for `http://shop.example`.
    pub fn contains(&self, url: &str) -> bool {
        match url.strip_prefix(&self.normalized) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }

    /// Search-probe URL for the fallback path: `{origin}/search?q={term}`.
    pub fn search_url(&self, term: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/search", self.normalized))
            .map_err(|e| ScrapeError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("q", term);
        Ok(url)
    }
}

impl std::fmt::Display for SeedOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.normalized)
    }
}

/// An outbound link found on a page, already resolved to an absolute URL.
#[derive(Debug, Clone)]
pub struct PageLink {
    pub url: String,
    pub text: String,
}

/// A block-level element carrying a class attribute, with its collapsed text.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub classes: String,
    pub text: String,
}

/// Parsed snapshot of one fetched page. Ephemeral: owned by the fetch step
/// that produced it and discarded once the step decides what to do next.
#[derive(Debug, Clone)]
pub struct PageDocument {
    pub url: String,
    pub meta_description: Option<String>,
    pub text: String,
    pub blocks: Vec<TextBlock>,
    pub paragraphs: Vec<String>,
    pub links: Vec<PageLink>,
}

impl PageDocument {
    pub fn parse(html: &str, page_url: &Url) -> Self {
        let document = Html::parse_document(html);

        let meta_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
        let meta_description = document
            .select(&meta_selector)
            .filter_map(|el| el.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
            .map(str::to_string);

        let block_selector = Selector::parse("div[class], section[class], article[class], span[class]").unwrap();
        let blocks = document
            .select(&block_selector)
            .filter_map(|el| {
                let classes = el.value().attr("class")?.to_string();
                let text = collapse_whitespace(&el.text().collect::<String>());
                Some(TextBlock { classes, text })
            })
            .collect();

        let paragraph_selector = Selector::parse("p").unwrap();
        let paragraphs = document
            .select(&paragraph_selector)
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .collect();

        let link_selector = Selector::parse("a[href]").unwrap();
        let links = document
            .select(&link_selector)
            .filter_map(|el| {
                let href = el.value().attr("href")?;
                let url = resolve_href(page_url, href)?;
                let text = collapse_whitespace(&el.text().collect::<String>());
                Some(PageLink { url, text })
            })
            .collect();

        Self {
            url: page_url.as_str().to_string(),
            meta_description,
            text: visible_text(&document),
            blocks,
            paragraphs,
            links,
        }
    }

    /// Case-insensitive check for the target term in the page's visible text.
    pub fn mentions(&self, term: &str) -> bool {
        self.text.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Resolve an href against the page it appeared on. Skips non-navigational
/// schemes and strips fragments.
fn resolve_href(base: &Url, href: &str) -> Option<String> {
    if href.is_empty()
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with('#')
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    resolved.set_fragment(None);

    Some(resolved.to_string())
}

/// Text content of the page with script/style/noscript subtrees excluded.
fn visible_text(document: &Html) -> String {
    let mut out = String::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "script" | "style" | "noscript"))
        });
        if !hidden {
            out.push_str(text);
            out.push(' ');
        }
    }

    collapse_whitespace(&out)
}

/// Collapse internal whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
