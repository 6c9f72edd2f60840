use crate::record::ResultRecord;
use crate::tagger::Lexicon;
use flavorscout_scanner::{ExtractionResult, SeedOrigin, Traversal};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, info};

/// Callback for reporting per-term completion.
pub type ProgressCallback = Arc<dyn Fn(&ResultRecord) + Send + Sync>;

const DEFAULT_CONCURRENCY: usize = 4;

/// Runs one traversal per target term, a bounded number at a time, and
/// turns each outcome into a tagged record. Output order matches input term
/// order regardless of completion order; crawl state is task-local, only
/// the HTTP client (inside the shared traversal) is reused across terms.
pub struct Resolver {
    traversal: Traversal,
    lexicon: Lexicon,
    concurrency: usize,
    progress_callback: Option<ProgressCallback>,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            traversal: Traversal::new(),
            lexicon: Lexicon::new(),
            concurrency: DEFAULT_CONCURRENCY,
            progress_callback: None,
        }
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Resolve every term against the seed origins. One record per term, in
    /// input order. A term that matches nowhere still yields a record with
    /// sentinel values; it never aborts its siblings.
    pub async fn resolve(&self, origins: &[SeedOrigin], terms: &[String]) -> Vec<ResultRecord> {
        info!(
            "Resolving {} terms across {} seed origins",
            terms.len(),
            origins.len()
        );

        futures::stream::iter(terms)
            .map(|term| self.resolve_term(origins, term))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Try seed origins in caller order; first Found wins.
    async fn resolve_term(&self, origins: &[SeedOrigin], term: &str) -> ResultRecord {
        let mut extraction = ExtractionResult::not_found(term);

        for origin in origins {
            let result = self.traversal.find_page(origin, term).await;
            if result.is_found() {
                extraction = result;
                break;
            }
            debug!("'{}' not on {}, trying next origin", term, origin);
        }

        let record = ResultRecord::from_extraction(extraction, &self.lexicon);
        if let Some(callback) = &self.progress_callback {
            callback(&record);
        }
        record
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
