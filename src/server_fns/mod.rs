//! Server functions for Dioxus Fullstack
//! These functions run on the server and are callable from the client

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::models::{ChapterContent, FoldConfig, Toc};

// ============================================================
// Render Cache (server-side only)
// ============================================================
mod cache {
    use chrono::{DateTime, Utc};
    use dashmap::DashMap;
    use once_cell::sync::Lazy;

    use crate::domain::models::ChapterContent;

    /// Cached render with the source mtime it was produced from
    pub struct CachedChapter {
        pub chapter: ChapterContent,
        pub modified: Option<DateTime<Utc>>,
    }

    /// Global cache for rendered chapters (thread-safe).
    /// Entries are validated against the source file mtime instead of a
    /// TTL, so edits show up immediately while unchanged files never
    /// re-render.
    pub static CHAPTER_CACHE: Lazy<DashMap<String, CachedChapter>> = Lazy::new(DashMap::new);

    /// Get from cache if the source file is unchanged
    pub fn get_cached(page: &str, modified: Option<DateTime<Utc>>) -> Option<ChapterContent> {
        if let Some(entry) = CHAPTER_CACHE.get(page) {
            if entry.modified.is_some() && entry.modified == modified {
                return Some(entry.chapter.clone());
            }
            // Stale (or mtime unavailable), drop the entry
            drop(entry);
            CHAPTER_CACHE.remove(page);
        }
        None
    }

    /// Insert into cache
    pub fn set_cached(page: &str, chapter: ChapterContent, modified: Option<DateTime<Utc>>) {
        CHAPTER_CACHE.insert(page.to_string(), CachedChapter { chapter, modified });
    }
}

/// Response type for book metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookResponse {
    pub title: String,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub default_theme: Option<String>,
    pub layout: String,
    pub chapter_count: usize,
}

/// Response type for the navigation tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TocResponse {
    pub toc: Toc,
    pub fold: FoldConfig,
}

/// Get book metadata for the navbar and theme initialization
#[server]
pub async fn get_book() -> Result<BookResponse, ServerFnError> {
    use crate::book::Book;

    let config = crate::config::get();
    let book = Book::open(&config.book_dir)
        .await
        .map_err(|e| ServerFnError::new(e))?;

    let meta = book.meta();
    Ok(BookResponse {
        title: meta.title,
        authors: meta.authors,
        description: meta.description,
        language: meta.language,
        default_theme: meta.default_theme,
        layout: book.kind().to_string(),
        chapter_count: book.toc().walk().len(),
    })
}

/// Get the navigation tree together with its folding configuration
#[server]
pub async fn get_toc() -> Result<TocResponse, ServerFnError> {
    use crate::book::Book;

    let config = crate::config::get();
    let book = Book::open(&config.book_dir)
        .await
        .map_err(|e| ServerFnError::new(e))?;

    Ok(TocResponse {
        fold: book.meta().fold,
        toc: book.toc().clone(),
    })
}

/// Load and render a single chapter by its page path
/// CACHED: unchanged source files are served from the render cache
#[server]
pub async fn get_chapter(path: String) -> Result<Option<ChapterContent>, ServerFnError> {
    use crate::book::{loader, Book};
    use crate::shared::errors::AppError;
    use crate::shared::logging;

    logging::log_chapter_load_start(&path);

    let config = crate::config::get();
    let book = Book::open(&config.book_dir)
        .await
        .map_err(|e| ServerFnError::new(e))?;

    let (page, source) = match book.resolve_page(&path) {
        Ok(resolved) => resolved,
        Err(AppError::ChapterNotFound(page)) => {
            tracing::warn!("Chapter not found: {}", page);
            return Ok(None);
        }
        Err(e) => return Err(ServerFnError::new(e)),
    };

    let modified = loader::source_mtime(&source).await;
    if let Some(cached) = cache::get_cached(&page, modified) {
        logging::log_chapter_cache_hit(&page);
        return Ok(Some(cached));
    }

    match book.render_source(&page, &source).await {
        Ok(chapter) => {
            logging::log_chapter_load_success(&page, chapter.html.len());
            cache::set_cached(&page, chapter.clone(), modified);
            Ok(Some(chapter))
        }
        Err(AppError::ChapterNotFound(page)) => {
            tracing::warn!("Chapter not found: {}", page);
            Ok(None)
        }
        Err(e) => {
            logging::log_chapter_load_error(&page, &e.to_string());
            Err(ServerFnError::new(e))
        }
    }
}
