/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::constants::DEFAULT_DOWNLOAD_FILENAME;
use crate::error::ApiError;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Saves a downloaded blob into `dir` and returns the final path
///
/// Only the last component of `filename` is used, and `"download"` when it is
/// missing or empty. The bytes are staged in a temporary file that is either
/// renamed into place or deleted when it goes out of scope, so no staging
/// file survives a failed save.
pub fn save_blob(dir: &Path, filename: Option<&str>, blob: &Bytes) -> Result<PathBuf, ApiError> {
    let name = filename
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_FILENAME.to_string());

    std::fs::create_dir_all(dir)?;
    let target = dir.join(name);

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    if let Err(e) = staged.write_all(blob).and_then(|()| staged.flush()) {
        warn!("Failed to stage download for {}: {}", target.display(), e);
        return Err(e.into());
    }
    staged
        .persist(&target)
        .map_err(|e| ApiError::from(e.error))?;

    debug!("Saved {} bytes to {}", blob.len(), target.display());
    Ok(target)
}
