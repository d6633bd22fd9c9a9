//! Chapter source resolution
//!
//! Maps a rendered chapter path back to its markdown source and reads
//! the file modification time used for cache validation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::book::path_utils::{sanitize_request_path, source_candidates};
use crate::shared::errors::{AppError, Result};
use crate::shared::logging;

/// Resolve a rendered chapter path to an existing markdown source file.
///
/// `chapter_1/index.html` tries `chapter_1/index.md` then
/// `chapter_1/README.md`. The request path is sanitized first so it can
/// never escape `src_dir`.
pub fn resolve_source(src_dir: &Path, request_path: &str) -> Result<PathBuf> {
    let clean = sanitize_request_path(request_path)?;
    for candidate in source_candidates(&clean) {
        let path = src_dir.join(&candidate);
        if path.is_file() {
            logging::log_path_operation("source_resolve", request_path, &candidate);
            return Ok(path);
        }
    }
    Err(AppError::ChapterNotFound(clean))
}

/// Modification time of a source file, if the filesystem reports one
pub async fn source_mtime(path: &Path) -> Option<DateTime<Utc>> {
    let metadata = tokio::fs::metadata(path).await.ok()?;
    metadata.modified().ok().map(DateTime::<Utc>::from)
}
