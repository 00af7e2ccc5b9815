use std::path;

/// Errors raised while constructing a store or inside its `try_*` operations.
///
/// The public `DataStore` operations catch everything here and convert it to
/// a `bool`/`Option` result plus a reported diagnostic; only construction
/// surfaces a `StoreError` to callers directly.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Store root ({path}) could not be created: {source}")]
    RootPathInvalid {
        path: path::PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {index} is missing column \"{column}\"")]
    MissingColumn { index: usize, column: String },
}
