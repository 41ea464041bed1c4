use std::path::PathBuf;

/// Failure to produce a usable dataset. Always fatal for initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read dataset from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid price {price} for item '{item}' at store '{store}'")]
    InvalidPrice {
        store: String,
        item: String,
        price: f64,
    },
}
