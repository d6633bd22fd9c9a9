//! Structured logging module for the book reader
//!
//! Provides consistent, contextual logging across the application.
//! Uses tracing spans for operation tracking and structured fields.

use std::path::Path;

/// Log levels for different operations
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    BookOpen,
    SummaryParse,
    ChapterLoad,
    ChapterRender,
    Watch,
    PathResolve,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::BookOpen => "book_open",
            LogOperation::SummaryParse => "summary_parse",
            LogOperation::ChapterLoad => "chapter_load",
            LogOperation::ChapterRender => "chapter_render",
            LogOperation::Watch => "watch",
            LogOperation::PathResolve => "path_resolve",
        }
    }
}

/// Log book open start. Books are opened per request, so this stays at
/// debug level.
pub fn log_book_open_start(root: &Path) {
    tracing::debug!(
        operation = LogOperation::BookOpen.as_str(),
        root = %root.display(),
        "Opening book"
    );
}

/// Log book open result
pub fn log_book_open_result(root: &Path, layout: &str, chapter_count: usize) {
    tracing::debug!(
        operation = LogOperation::BookOpen.as_str(),
        root = %root.display(),
        layout = layout,
        chapter_count = chapter_count,
        "Book opened"
    );
}

/// Log book open failure
pub fn log_book_open_error(root: &Path, error: &str) {
    tracing::error!(
        operation = LogOperation::BookOpen.as_str(),
        root = %root.display(),
        error = error,
        "Failed to open book"
    );
}

/// Log summary parse failure
pub fn log_summary_parse_error(path: &Path, error: &str) {
    tracing::error!(
        operation = LogOperation::SummaryParse.as_str(),
        summary = %path.display(),
        error = error,
        "Failed to parse summary"
    );
}

/// Log chapter load attempt
pub fn log_chapter_load_start(page: &str) {
    tracing::debug!(
        operation = LogOperation::ChapterLoad.as_str(),
        page = page,
        "Loading chapter"
    );
}

/// Log chapter load success
pub fn log_chapter_load_success(page: &str, html_bytes: usize) {
    tracing::info!(
        operation = LogOperation::ChapterLoad.as_str(),
        page = page,
        html_bytes = html_bytes,
        "Chapter loaded"
    );
}

/// Log chapter load failure
pub fn log_chapter_load_error(page: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::ChapterLoad.as_str(),
        page = page,
        error = error,
        "Failed to load chapter"
    );
}

/// Log chapter cache hit (mtime unchanged since last render)
pub fn log_chapter_cache_hit(page: &str) {
    tracing::debug!(
        operation = LogOperation::ChapterRender.as_str(),
        page = page,
        cache_hit = true,
        "Serving cached render"
    );
}

/// Log watcher start
pub fn log_watch_start(dir: &Path) {
    tracing::info!(
        operation = LogOperation::Watch.as_str(),
        dir = %dir.display(),
        "Watching book sources"
    );
}

/// Log a batch of file change events
pub fn log_watch_changes(change_count: usize) {
    tracing::debug!(
        operation = LogOperation::Watch.as_str(),
        change_count = change_count,
        "Source files changed"
    );
}

/// Log watcher failure
pub fn log_watch_error(error: &str) {
    tracing::warn!(
        operation = LogOperation::Watch.as_str(),
        error = error,
        "Watcher error"
    );
}

/// Log reload notification to connected clients
pub fn log_reload_notify(connection_id: &str) {
    tracing::debug!(
        operation = LogOperation::Watch.as_str(),
        connection_id = connection_id,
        "Notified client to reload"
    );
}

/// Log path resolution
pub fn log_path_operation(operation: &str, input: &str, output: &str) {
    tracing::trace!(
        operation = LogOperation::PathResolve.as_str(),
        path_operation = operation,
        input = input,
        output = output,
        "Path resolution"
    );
}

/// Macro for creating structured log context
#[macro_export]
macro_rules! log_context {
    ($book:expr) => {
        tracing::info_span!("book_reader", book = $book)
    };
    ($book:expr, $page:expr) => {
        tracing::info_span!("book_reader", book = $book, page = $page)
    };
}
