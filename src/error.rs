use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The page could not be fetched: transport failure, timeout or a
    /// non-success HTTP status.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The page or the CSV did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Chart error: {0}")]
    Chart(String),
}

impl Error {
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}
