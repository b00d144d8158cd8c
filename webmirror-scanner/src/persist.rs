use crate::error::{Result, ScanError};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Creates or truncates `output_root/filename` and writes `bytes` in full.
/// Intermediate directories are not created.
pub async fn persist(output_root: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = output_root.join(filename);
    let io_error = |source: std::io::Error| ScanError::IoError {
        path: path.clone(),
        source,
    };

    let mut file = File::create(&path).await.map_err(io_error)?;
    file.write_all(bytes).await.map_err(io_error)?;
    file.flush().await.map_err(io_error)?;

    Ok(path)
}
