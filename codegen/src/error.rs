use std::path::PathBuf;

use riscv_encoding::EncodingError;

/// Code generation errors
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("Failed to write {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Failed to render output: {0}")]
    Fmt(#[from] std::fmt::Error),
}
