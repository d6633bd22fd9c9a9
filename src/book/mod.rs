//! Book pipeline
//!
//! Everything between the filesystem and the API surface: configuration,
//! layout detection, SUMMARY.md parsing, chapter loading and rendering.

pub mod config;
pub mod flat_book;
pub mod loader;
pub mod path_utils;
pub mod render;
pub mod source;
pub mod summary;
pub mod summary_book;

pub use config::{load_book_config, BookConfig};
pub use source::{detect_book, BookSource, SourceKind};

use std::path::{Path, PathBuf};

use crate::domain::models::{BookMeta, ChapterContent, Toc};
use crate::shared::constants::DEFAULT_DOC;
use crate::shared::errors::{AppError, Result};
use crate::shared::logging;
use crate::shared::utils::href::normalize_page_path;

/// An opened book: layout, metadata, navigation tree and chapter access.
///
/// Opening reads configuration plus one summary parse or directory scan.
/// Request handlers open per request and always see the current on-disk
/// state.
pub struct Book {
    source: Box<dyn BookSource>,
    toc: Toc,
}

impl Book {
    pub async fn open(root: &Path) -> Result<Self> {
        logging::log_book_open_start(root);
        let source = detect_book(root).inspect_err(|e| {
            logging::log_book_open_error(root, &e.to_string());
        })?;
        let toc = source.toc().await.inspect_err(|e| {
            logging::log_book_open_error(root, &e.to_string());
        })?;
        let book = Self { source, toc };
        logging::log_book_open_result(root, book.kind().display_name(), book.toc.walk().len());
        Ok(book)
    }

    pub fn kind(&self) -> SourceKind {
        self.source.kind()
    }

    pub fn meta(&self) -> BookMeta {
        self.source.meta()
    }

    pub fn toc(&self) -> &Toc {
        &self.toc
    }

    pub fn src_dir(&self) -> PathBuf {
        self.source.src_dir()
    }

    /// Resolve a request path to its page path and markdown source file.
    ///
    /// The path is normalized like a browser URL, so `""`, `"/"` and
    /// `"guide/"` resolve to their default documents. A root index
    /// request with no matching source falls back to the first chapter,
    /// mirroring the sidebar's active-entry alias.
    pub fn resolve_page(&self, request_path: &str) -> Result<(String, PathBuf)> {
        let normalized = normalize_page_path(request_path);
        match loader::resolve_source(&self.src_dir(), &normalized) {
            Ok(source) => Ok((normalized, source)),
            Err(AppError::ChapterNotFound(_)) if normalized == DEFAULT_DOC => {
                let first = self
                    .toc
                    .first_chapter()
                    .and_then(|entry| entry.path.clone())
                    .ok_or(AppError::ChapterNotFound(normalized))?;
                let source = loader::resolve_source(&self.src_dir(), &first)?;
                Ok((first, source))
            }
            Err(e) => Err(e),
        }
    }

    /// Load and render the chapter at `request_path`.
    pub async fn chapter(&self, request_path: &str) -> Result<ChapterContent> {
        let (page, source) = self.resolve_page(request_path)?;
        self.render_source(&page, &source).await
    }

    /// Render an already-resolved source file as the chapter at `page`.
    pub async fn render_source(&self, page: &str, source: &Path) -> Result<ChapterContent> {
        let markdown = tokio::fs::read_to_string(source).await?;
        let modified = loader::source_mtime(source).await;

        let page_dir = page.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        let html = render::render_markdown(&markdown, page_dir);

        let title = self
            .toc
            .find(page)
            .map(|entry| entry.title.clone())
            .or_else(|| render::extract_title(&markdown))
            .unwrap_or_else(|| page.to_string());

        let src_dir = self.src_dir();
        let source_path = source
            .strip_prefix(&src_dir)
            .map(|rel| rel.to_string_lossy().to_string())
            .unwrap_or_else(|_| source.to_string_lossy().to_string());

        Ok(ChapterContent {
            path: page.to_string(),
            source_path,
            title,
            html,
            modified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_book() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("book-{}", uuid::Uuid::new_v4()));
        let src = dir.join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(
            dir.join("book.toml"),
            "[book]\ntitle = \"Test Book\"\n",
        )
        .unwrap();
        std::fs::write(
            src.join("SUMMARY.md"),
            "# Summary\n\n- [Intro](intro.md)\n- [Usage](guide/usage.md)\n- [Draft]()\n",
        )
        .unwrap();
        std::fs::write(src.join("intro.md"), "# Welcome\n\nSee [usage](guide/usage.md).\n").unwrap();
        std::fs::create_dir_all(src.join("guide")).unwrap();
        std::fs::write(src.join("guide/usage.md"), "# Usage\n").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_open_detects_summary_layout() {
        let dir = temp_book();
        let book = Book::open(&dir).await.unwrap();
        assert_eq!(book.kind(), SourceKind::Summary);
        assert_eq!(book.meta().title, "Test Book");
        assert_eq!(book.toc().reading_order().len(), 2);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_chapter_renders_with_toc_title() {
        let dir = temp_book();
        let book = Book::open(&dir).await.unwrap();
        let chapter = book.chapter("intro.html").await.unwrap();
        // Navigation title wins over the markdown heading
        assert_eq!(chapter.title, "Intro");
        assert_eq!(chapter.source_path, "intro.md");
        assert!(chapter.html.contains(r#"href="/guide/usage.html""#));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_root_request_falls_back_to_first_chapter() {
        let dir = temp_book();
        let book = Book::open(&dir).await.unwrap();
        let chapter = book.chapter("/").await.unwrap();
        assert_eq!(chapter.path, "intro.html");
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_directory_url_resolves_default_doc() {
        let dir = temp_book();
        std::fs::write(dir.join("src/guide/README.md"), "# Guide Index\n").unwrap();
        let book = Book::open(&dir).await.unwrap();
        let chapter = book.chapter("guide/").await.unwrap();
        assert_eq!(chapter.path, "guide/index.html");
        assert_eq!(chapter.source_path, "guide/README.md");
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_missing_chapter_is_not_found() {
        let dir = temp_book();
        let book = Book::open(&dir).await.unwrap();
        let err = book.chapter("missing.html").await.unwrap_err();
        assert!(matches!(err, AppError::ChapterNotFound(_)));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
