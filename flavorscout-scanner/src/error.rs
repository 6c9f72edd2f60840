use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP status {0} for {1}")]
    BadStatus(u16, String),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
