pub mod error;
pub mod extract;
pub mod page;
pub mod result;
pub mod traversal;

pub use error::ScrapeError;
pub use page::{PageDocument, SeedOrigin};
pub use result::ExtractionResult;
pub use traversal::Traversal;
