#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("Request failed")]
    Http(#[from] reqwest::Error),

    #[error("Failed to write csv output")]
    Csv(#[from] csv::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}
