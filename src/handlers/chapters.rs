use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sha2::{Digest, Sha256};

use crate::book::Book;
use crate::domain::models::ChapterContent;
use crate::shared::errors::AppError;

/// GET /api/chapters/{*path}
/// Load and render one chapter. Responses carry an ETag derived from
/// the rendered content; a matching If-None-Match yields 304.
pub async fn get_chapter_handler(
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let decoded = urlencoding::decode(&path)
        .map_err(|_| StatusCode::BAD_REQUEST)?
        .into_owned();

    let config = crate::config::get();
    let book = Book::open(&config.book_dir).await.map_err(|e| {
        tracing::error!("Failed to open book: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let chapter = match book.chapter(&decoded).await {
        Ok(chapter) => chapter,
        Err(AppError::ChapterNotFound(page)) => {
            tracing::debug!("Chapter not found: {}", page);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(AppError::InvalidPath(path)) => {
            tracing::debug!("Rejected chapter path: {}", path);
            return Err(StatusCode::BAD_REQUEST);
        }
        Err(e) => {
            tracing::error!("Failed to load chapter {}: {}", decoded, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let etag = chapter_etag(&chapter);
    let matched = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == etag)
        .unwrap_or(false);
    if matched {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok(([(header::ETAG, etag)], Json(chapter)).into_response())
}

/// Strong ETag over the fields a client would render
fn chapter_etag(chapter: &ChapterContent) -> String {
    let mut hasher = Sha256::new();
    hasher.update(chapter.title.as_bytes());
    hasher.update([0u8]);
    hasher.update(chapter.html.as_bytes());
    let digest = hasher.finalize();
    let hex: String = digest.iter().map(|byte| format!("{:02x}", byte)).collect();
    format!("\"{}\"", hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(title: &str, html: &str) -> ChapterContent {
        ChapterContent {
            path: "intro.html".to_string(),
            source_path: "intro.md".to_string(),
            title: title.to_string(),
            html: html.to_string(),
            modified: None,
        }
    }

    #[test]
    fn test_etag_stable_for_same_content() {
        let a = chapter_etag(&chapter("Intro", "<h1>Intro</h1>"));
        let b = chapter_etag(&chapter("Intro", "<h1>Intro</h1>"));
        assert_eq!(a, b);
        assert!(a.starts_with('"') && a.ends_with('"'));
    }

    #[test]
    fn test_etag_changes_with_content_or_title() {
        let base = chapter_etag(&chapter("Intro", "<h1>Intro</h1>"));
        assert_ne!(base, chapter_etag(&chapter("Intro", "<h1>Changed</h1>")));
        assert_ne!(base, chapter_etag(&chapter("Renamed", "<h1>Intro</h1>")));
    }
}
