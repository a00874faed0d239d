use thiserror::Error;

/// Errors surfaced by snapshot reads and configuration loading.
///
/// Search, enrichment and description resolution never hand these to their
/// callers; they log them and fall back to empty results or placeholders.
#[derive(Debug, Error)]
pub enum Error {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("snapshot store is not available")]
    StoreUnavailable,

    #[error("snapshot connection lock was poisoned")]
    StorePoisoned,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
