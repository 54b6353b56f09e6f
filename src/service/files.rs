//! Filesystem side of the upload endpoints.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::RngCore;
use tokio::fs;
use tracing::debug;

use crate::error::GatewayError;

/// Random suffix bytes in generated filenames (4 bytes = 8 hex chars).
const SUFFIX_BYTES: usize = 4;

/// Stores uploaded blobs under `<root>/<kind>/`, one directory per declared
/// file type.
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
}

/// Outcome of a successful save.
#[derive(Debug)]
pub struct SavedFile {
    pub filename: String,
    pub path: PathBuf,
    pub size: i64,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write a blob under `<root>/<kind>/` with a collision-resistant name:
    /// `<unix-ts>_<8 hex chars><original extension>`.
    pub async fn save(
        &self,
        kind: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<SavedFile, GatewayError> {
        let filename = generate_filename(original_name);
        let dir = self.root.join(kind);
        fs::create_dir_all(&dir).await?;

        let path = dir.join(&filename);
        fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "file stored");

        Ok(SavedFile {
            filename,
            path,
            size: bytes.len() as i64,
        })
    }

    /// Remove a previously stored blob by its recorded path.
    pub async fn remove(&self, path: &str) -> Result<(), GatewayError> {
        fs::remove_file(path).await?;
        Ok(())
    }
}

/// A declared upload type doubles as a directory name, so it must be a plain
/// path segment. Empty strings and separators are rejected upstream as
/// `BadRequest`.
pub fn valid_kind(kind: &str) -> bool {
    !kind.is_empty()
        && kind
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn generate_filename(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    let mut suffix = [0u8; SUFFIX_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut suffix);

    format!("{}_{}{}", Utc::now().timestamp(), hex::encode(suffix), ext)
}
