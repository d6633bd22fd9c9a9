//! Book source trait and layout detection
//!
//! Provides a common interface over the two supported layouts: books
//! organized by a SUMMARY.md and bare directories of markdown files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::book::config::load_book_config;
use crate::book::flat_book::FlatBook;
use crate::book::summary_book::SummaryBook;
use crate::domain::models::{BookMeta, Toc};
use crate::shared::constants::SUMMARY_FILE;
use crate::shared::errors::{AppError, Result};

/// Supported book layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Navigation driven by SUMMARY.md
    #[default]
    Summary,
    /// Navigation derived from the directory tree
    Flat,
}

impl SourceKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceKind::Summary => "summary",
            SourceKind::Flat => "flat",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Trait for book sources
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Layout kind of this source
    fn kind(&self) -> SourceKind;

    /// Book root, where book.toml lives
    fn root(&self) -> &Path;

    /// Directory containing the markdown sources
    fn src_dir(&self) -> PathBuf;

    /// Book metadata from configuration
    fn meta(&self) -> BookMeta;

    /// Build the navigation tree from the current on-disk state
    async fn toc(&self) -> Result<Toc>;
}

impl std::fmt::Debug for dyn BookSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookSource")
            .field("kind", &self.kind())
            .field("root", &self.root())
            .finish()
    }
}

/// Detect the layout of the book rooted at `root`.
///
/// A SUMMARY.md in the configured source directory (or directly in the
/// root) selects the summary layout; anything else falls back to a flat
/// scan of the markdown files.
pub fn detect_book(root: &Path) -> Result<Box<dyn BookSource>> {
    if !root.is_dir() {
        return Err(AppError::BookNotFound(root.display().to_string()));
    }

    let config = load_book_config(root)?;
    let configured_src = root.join(&config.src_dir);

    if configured_src.join(SUMMARY_FILE).is_file() {
        tracing::debug!(root = %root.display(), "Detected summary book");
        return Ok(Box::new(SummaryBook::new(
            root.to_path_buf(),
            configured_src,
            config.meta,
        )));
    }

    // Some books keep SUMMARY.md next to book.toml without a src/ level.
    if root.join(SUMMARY_FILE).is_file() {
        tracing::debug!(root = %root.display(), "Detected summary book (no src dir)");
        return Ok(Box::new(SummaryBook::new(
            root.to_path_buf(),
            root.to_path_buf(),
            config.meta,
        )));
    }

    let scan_dir = if configured_src.is_dir() {
        configured_src
    } else {
        root.to_path_buf()
    };
    tracing::debug!(root = %root.display(), scan = %scan_dir.display(), "Detected flat book");
    Ok(Box::new(FlatBook::new(
        root.to_path_buf(),
        scan_dir,
        config.meta,
    )))
}
