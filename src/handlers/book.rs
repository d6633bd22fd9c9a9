use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::book::Book;
use crate::domain::models::{FoldConfig, Toc};

#[derive(Debug, Serialize)]
pub struct BookInfoResponse {
    pub title: String,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub default_theme: Option<String>,
    pub layout: String,
    pub chapter_count: usize,
}

#[derive(Debug, Serialize)]
pub struct TocApiResponse {
    pub toc: Toc,
    pub fold: FoldConfig,
}

/// GET /api/book
/// Book metadata for external consumers
pub async fn book_info_handler() -> Result<Json<BookInfoResponse>, StatusCode> {
    let config = crate::config::get();
    let book = Book::open(&config.book_dir).await.map_err(|e| {
        tracing::error!("Failed to open book: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let meta = book.meta();
    let response = BookInfoResponse {
        title: meta.title,
        authors: meta.authors,
        description: meta.description,
        language: meta.language,
        default_theme: meta.default_theme,
        layout: book.kind().to_string(),
        chapter_count: book.toc().walk().len(),
    };

    Ok(Json(response))
}

/// GET /api/toc
/// The navigation tree with its folding configuration
pub async fn toc_handler() -> Result<Json<TocApiResponse>, StatusCode> {
    let config = crate::config::get();
    let book = Book::open(&config.book_dir).await.map_err(|e| {
        tracing::error!("Failed to open book: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let response = TocApiResponse {
        fold: book.meta().fold,
        toc: book.toc().clone(),
    };

    Ok(Json(response))
}
