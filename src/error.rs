use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no row with id {0}")]
    UnknownRow(u32),
}

/// Failure to read an imported snapshot file. Existing table state is left
/// untouched when any of these occur.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("`rows` must be a list")]
    RowsNotAList,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read store file: {0}")]
    Io(#[from] std::io::Error),
    #[error("store file is not a valid snapshot: {0}")]
    Corrupt(#[from] serde_json::Error),
}
