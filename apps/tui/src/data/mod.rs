use std::path::Path;
use store_prices_core::{Catalog, Dataset, LoadError};

/// Reads and validates the dataset file. Any failure is fatal for startup.
pub async fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "dataset read");
    Dataset::from_slice(&bytes)
}

pub async fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let dataset = load_dataset(path).await?;
    Ok(Catalog::new(dataset))
}
