// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    load_flavors_from_file,
    load_flavors_from_source,
    load_sites_from_file,
    load_sites_from_source,
    parse_site_line,
};
