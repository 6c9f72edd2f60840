use crate::error::{Result, ScrapeError};
use crate::extract::Extractor;
use crate::page::{PageDocument, SeedOrigin};
use crate::result::ExtractionResult;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};

/// URL path substrings that mark a link as worth following on storefront
/// templates.
pub const DEFAULT_PATH_HINTS: &[&str] = &["product", "collection", "flavour", "liquid", "shop"];

const DEFAULT_MAX_PAGES: usize = 64;
const DEFAULT_MAX_FRONTIER: usize = 256;

/// Bounded breadth-first discovery of the page matching a target term on a
/// single seed origin. One traversal owns its visited/frontier sets; only
/// the HTTP client is shared with other traversals.
pub struct Traversal {
    client: Client,
    extractor: Extractor,
    path_hints: Vec<String>,
    max_pages: usize,
    max_frontier: usize,
}

impl Traversal {
    pub fn new() -> Self {
        Self::with_timeout(8)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Flavorscout/0.1 (https://github.com/trapdoorsec/flavorscout)")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self::from_client(client)
    }

    /// Build a traversal around an existing client. Used by the resolver so
    /// every term shares one connection pool.
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            extractor: Extractor::new(),
            path_hints: DEFAULT_PATH_HINTS.iter().map(|s| s.to_string()).collect(),
            max_pages: DEFAULT_MAX_PAGES,
            max_frontier: DEFAULT_MAX_FRONTIER,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_max_frontier(mut self, max_frontier: usize) -> Self {
        self.max_frontier = max_frontier;
        self
    }

    pub fn with_path_hints(mut self, hints: Vec<String>) -> Self {
        self.path_hints = hints;
        self
    }

    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Locate the page on `origin` that best matches `term` and pull a
    /// description out of it. Falls back to a search probe once the frontier
    /// is exhausted. Fetch failures skip the URL and never abort the term.
    pub async fn find_page(&self, origin: &SeedOrigin, term: &str) -> ExtractionResult {
        info!("Searching {} for '{}'", origin, term);

        let term_lower = term.to_lowercase();
        let slug = term_lower.replace(' ', "-");

        // Insertion-ordered frontier with a membership set alongside, so
        // identical inputs always walk the site in the same order.
        let mut visited: HashSet<String> = HashSet::new();
        let mut queued: HashSet<String> = HashSet::new();
        let mut frontier: VecDeque<String> = VecDeque::new();

        let start = origin.url().as_str().to_string();
        queued.insert(start.clone());
        frontier.push_back(start);

        while visited.len() < self.max_pages {
            let Some(url) = frontier.pop_front() else {
                break;
            };
            queued.remove(&url);
            visited.insert(url.clone());

            let page = match self.fetch_page(&url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!("Skipping {}: {}", url, e);
                    continue;
                }
            };

            if page.mentions(term)
                && let Some(description) = self.extractor.extract_description(&page)
            {
                info!("Found '{}' at {}", term, page.url);
                return ExtractionResult::found(term, description, page.url);
            }

            for link in &page.links {
                if !origin.contains(&link.url)
                    || visited.contains(&link.url)
                    || queued.contains(&link.url)
                {
                    continue;
                }
                if frontier.len() >= self.max_frontier {
                    debug!("Frontier cap reached on {}", origin);
                    break;
                }

                let href_lower = link.url.to_lowercase();
                let anchor_match = link.text.to_lowercase().contains(&term_lower)
                    || href_lower.contains(&slug);
                let path_hinted = self.path_hints.iter().any(|hint| href_lower.contains(hint));

                if anchor_match || path_hinted {
                    debug!("Queuing {}", link.url);
                    queued.insert(link.url.clone());
                    frontier.push_back(link.url.clone());
                }
            }
        }

        match self.fallback_probe(origin, term).await {
            Some(result) => result,
            None => {
                info!("No match for '{}' on {}", term, origin);
                ExtractionResult::not_found(term)
            }
        }
    }

    /// One-shot search-query probe: `{origin}/search?q={term}`, follow the
    /// first same-origin `/product/` link, extract from the target page.
    async fn fallback_probe(&self, origin: &SeedOrigin, term: &str) -> Option<ExtractionResult> {
        let search_url = match origin.search_url(term) {
            Ok(url) => url,
            Err(e) => {
                warn!("Cannot build search probe for {}: {}", origin, e);
                return None;
            }
        };

        debug!("Fallback probe: {}", search_url);
        let listing = match self.fetch_page(search_url.as_str()).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Search probe failed on {}: {}", origin, e);
                return None;
            }
        };

        let candidate = listing
            .links
            .iter()
            .find(|link| origin.contains(&link.url) && link.url.contains("/product/"))?;

        let page = match self.fetch_page(&candidate.url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Skipping probe candidate {}: {}", candidate.url, e);
                return None;
            }
        };

        let description = self.extractor.extract_description(&page)?;
        info!("Found '{}' via search probe at {}", term, page.url);
        Some(ExtractionResult::found(term, description, page.url))
    }

    async fn fetch_page(&self, url: &str) -> Result<PageDocument> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::BadStatus(status.as_u16(), url.to_string()));
        }

        let final_url = response.url().clone();
        let body = response.text().await?;

        Ok(PageDocument::parse(&body, &final_url))
    }
}

impl Default for Traversal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn html_response(body: impl Into<Vec<u8>>) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/html")
            .set_body_bytes(body.into())
    }

    async fn origin_of(server: &MockServer) -> SeedOrigin {
        SeedOrigin::parse(&server.uri()).unwrap()
    }

    /// Root links to a hinted product page carrying a meta description.
    #[tokio::test]
    async fn test_finds_product_via_traversal() {
        let server = MockServer::start().await;

        let root = r#"<html><body><a href="/product/mango">Mango Ice</a></body></html>"#;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html_response(root))
            .mount(&server)
            .await;

        let product = r#"<html><head><meta name="description" content="A cool mango ice flavor"></head><body>Mango</body></html>"#;
        Mock::given(method("GET"))
            .and(path("/product/mango"))
            .respond_with(html_response(product))
            .mount(&server)
            .await;

        let origin = origin_of(&server).await;
        let result = Traversal::new().find_page(&origin, "mango").await;

        assert!(result.is_found());
        assert_eq!(result.description.as_deref(), Some("A cool mango ice flavor"));
        assert!(result.source_url.unwrap().ends_with("/product/mango"));
    }

    /// Cross-origin links are never followed, even with a path hint.
    #[tokio::test]
    async fn test_cross_origin_links_not_followed() {
        let server = MockServer::start().await;
        let elsewhere = MockServer::start().await;

        let root = format!(
            r#"<html><body><a href="{}/product/peach">Peach</a></body></html>"#,
            elsewhere.uri()
        );
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html_response(root))
            .mount(&server)
            .await;

        // The off-origin server must receive no traffic at all.
        Mock::given(method("GET"))
            .respond_with(html_response("<html></html>"))
            .expect(0)
            .mount(&elsewhere)
            .await;

        let origin = origin_of(&server).await;
        let result = Traversal::new().find_page(&origin, "peach").await;

        assert!(!result.is_found());
        assert_eq!(result.source_url, None);
    }

    /// Links without a path hint or matching anchor are ignored.
    #[tokio::test]
    async fn test_unhinted_links_ignored() {
        let server = MockServer::start().await;

        let root = r#"<html><body><a href="/about">About us</a></body></html>"#;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html_response(root))
            .mount(&server)
            .await;

        let about = r#"<html><body><p>Our mango story goes back decades and decades of family craft.</p></body></html>"#;
        Mock::given(method("GET"))
            .and(path("/about"))
            .respond_with(html_response(about))
            .expect(0)
            .mount(&server)
            .await;

        let origin = origin_of(&server).await;
        let result = Traversal::new().find_page(&origin, "mango").await;

        assert!(!result.is_found());
    }

    /// An anchor whose text matches the term is followed even off the hint
    /// list.
    #[tokio::test]
    async fn test_anchor_text_match_is_followed() {
        let server = MockServer::start().await;

        let root = r#"<html><body><a href="/pages/mango-info">Mango Ice</a></body></html>"#;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html_response(root))
            .mount(&server)
            .await;

        let info = r#"<html><head><meta name="description" content="Ripe mango with a menthol kick"></head><body>mango</body></html>"#;
        Mock::given(method("GET"))
            .and(path("/pages/mango-info"))
            .respond_with(html_response(info))
            .mount(&server)
            .await;

        let origin = origin_of(&server).await;
        let result = Traversal::new().find_page(&origin, "mango").await;

        assert!(result.is_found());
        assert!(result.source_url.unwrap().ends_with("/pages/mango-info"));
    }

    /// A failing URL is skipped; traversal continues with the rest of the
    /// frontier.
    #[tokio::test]
    async fn test_fetch_failure_is_local() {
        let server = MockServer::start().await;

        let root = r#"<html><body>
            <a href="/product/broken">Mango broken</a>
            <a href="/product/mango">Mango good</a>
        </body></html>"#;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html_response(root))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/product/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let product = r#"<html><head><meta name="description" content="A cool mango ice flavor"></head><body>mango</body></html>"#;
        Mock::given(method("GET"))
            .and(path("/product/mango"))
            .respond_with(html_response(product))
            .mount(&server)
            .await;

        let origin = origin_of(&server).await;
        let result = Traversal::new().find_page(&origin, "mango").await;

        assert!(result.is_found());
        assert!(result.source_url.unwrap().ends_with("/product/mango"));
    }

    /// Frontier exhaustion falls through to the search probe.
    #[tokio::test]
    async fn test_fallback_probe_after_exhaustion() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html_response("<html><body>Nothing here</body></html>"))
            .mount(&server)
            .await;

        let listing = r#"<html><body><a href="/product/mango-ice">Mango Ice</a></body></html>"#;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "mango"))
            .respond_with(html_response(listing))
            .mount(&server)
            .await;

        let product = r#"<html><body><div class="product-description">Sun-ripened mango rounded off with an icy menthol exhale.</div></body></html>"#;
        Mock::given(method("GET"))
            .and(path("/product/mango-ice"))
            .respond_with(html_response(product))
            .mount(&server)
            .await;

        let origin = origin_of(&server).await;
        let result = Traversal::new().find_page(&origin, "mango").await;

        assert!(result.is_found());
        assert!(result.source_url.unwrap().ends_with("/product/mango-ice"));
    }

    /// The page cap stops traversal even with a live frontier.
    #[tokio::test]
    async fn test_max_pages_bound() {
        let server = MockServer::start().await;

        let root = r#"<html><body><a href="/product/mango">Mango</a></body></html>"#;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html_response(root))
            .mount(&server)
            .await;

        let product = r#"<html><head><meta name="description" content="A cool mango ice flavor"></head><body>mango</body></html>"#;
        Mock::given(method("GET"))
            .and(path("/product/mango"))
            .respond_with(html_response(product))
            .expect(0)
            .mount(&server)
            .await;

        let origin = origin_of(&server).await;
        let result = Traversal::new()
            .with_max_pages(1)
            .find_page(&origin, "mango")
            .await;

        assert!(!result.is_found());
    }

    /// With several candidate pages matching the term, repeated runs
    /// against the same static site pick the same one every time.
    #[tokio::test]
    async fn test_candidate_choice_is_stable() {
        let server = MockServer::start().await;

        let root = r#"<html><body>
            <a href="/product/mango-a">Mango A</a>
            <a href="/product/mango-b">Mango B</a>
        </body></html>"#;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html_response(root))
            .mount(&server)
            .await;

        for slug in ["mango-a", "mango-b"] {
            let product = format!(
                r#"<html><head><meta name="description" content="Mango {} blend"></head><body>mango</body></html>"#,
                slug
            );
            Mock::given(method("GET"))
                .and(path(format!("/product/{}", slug)))
                .respond_with(html_response(product))
                .mount(&server)
                .await;
        }

        let origin = origin_of(&server).await;
        let first = Traversal::new().find_page(&origin, "mango").await;
        assert!(first.is_found());

        for _ in 0..5 {
            let again = Traversal::new().find_page(&origin, "mango").await;
            assert_eq!(again.source_url, first.source_url);
            assert_eq!(again.description, first.description);
        }
    }

    /// Total miss yields the not-found terminal state, not an error.
    #[tokio::test]
    async fn test_total_miss() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html_response("<html><body>Empty shop</body></html>"))
            .mount(&server)
            .await;

        let origin = origin_of(&server).await;
        let result = Traversal::new().find_page(&origin, "durian").await;

        assert_eq!(result.description, None);
        assert_eq!(result.source_url, None);
        assert_eq!(result.term, "durian");
    }
}
