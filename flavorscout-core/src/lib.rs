pub mod export;
pub mod record;
pub mod resolve;
pub mod tagger;

pub use export::ExportCache;
pub use record::ResultRecord;
pub use resolve::Resolver;
pub use tagger::{Category, Lexicon, Tag};

pub fn print_banner() {
    println!(
        r#"
  __ _                                          _
 / _| | __ ___   _____  _ __ ___  ___ ___  _   _| |_
| |_| |/ _` \ \ / / _ \| '__/ __|/ __/ _ \| | | | __|
|  _| | (_| |\ V / (_) | |  \__ \ (_| (_) | |_| | |_
|_| |_|\__,_| \_/ \___/|_|  |___/\___\___/ \__,_|\__|

  flavorscout v{} - storefront flavor enrichment
"#,
        env!("CARGO_PKG_VERSION")
    );
}
