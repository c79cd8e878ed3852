use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read project snapshot {}", .path.display())]
    ReadSnapshot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse project snapshot {}", .path.display())]
    ParseSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode project export")]
    EncodeExport(#[from] serde_json::Error),
}
