//! SSE handler for live reload on source changes
//! Watches the book sources and tells connected clients to refetch

use axum::response::{
    sse::{Event, KeepAlive, Sse},
    IntoResponse,
};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::path::Path;
use std::time::Duration;
use tokio_stream::wrappers::ReceiverStream;

use crate::book::detect_book;
use crate::shared::constants::{RELOAD_DEBOUNCE_MS, SSE_KEEP_ALIVE_SECS};
use crate::shared::logging;

/// SSE event data for reload notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadEvent {
    pub event_type: String,
    /// Monotonic per-connection change counter
    pub generation: u64,
    pub changed_paths: usize,
}

/// Editor droppings and VCS noise that must not trigger reloads
static IGNORE_PATTERNS: Lazy<Vec<glob::Pattern>> = Lazy::new(|| {
    ["**/.git/**", "**/*.tmp", "**/*.swp", "**/*~", "**/.#*"]
        .iter()
        .filter_map(|pattern| glob::Pattern::new(pattern).ok())
        .collect()
});

/// SSE endpoint that watches the book sources for changes
/// GET /api/reload
pub async fn reload_events_handler() -> impl IntoResponse {
    let connection_id = uuid::Uuid::new_v4().to_string();
    tracing::info!("Live reload subscription started: {}", connection_id);

    // Create channel for SSE events
    let (tx, rx) = tokio::sync::mpsc::channel::<Result<Event, Infallible>>(100);

    // Spawn file watcher task
    tokio::spawn(async move {
        watch_book_sources(tx, connection_id).await;
    });

    Sse::new(ReceiverStream::new(rx)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(SSE_KEEP_ALIVE_SECS))
            .text("ping"),
    )
}

/// Watch the book source directory and send reload events
async fn watch_book_sources(
    tx: tokio::sync::mpsc::Sender<Result<Event, Infallible>>,
    connection_id: String,
) {
    let config = crate::config::get();
    let src_dir = match detect_book(&config.book_dir) {
        Ok(source) => source.src_dir(),
        Err(e) => {
            tracing::error!("Cannot watch book sources: {}", e);
            let _ = tx
                .send(Ok(Event::default().event("error").data(e.to_string())))
                .await;
            return;
        }
    };

    logging::log_watch_start(&src_dir);

    let mut generation = 0u64;

    // Send initial connection event
    let connected = ReloadEvent {
        event_type: "connected".to_string(),
        generation,
        changed_paths: 0,
    };
    let _ = tx
        .send(Ok(Event::default()
            .event("connected")
            .data(serde_json::to_string(&connected).unwrap_or_default())))
        .await;

    // Create file watcher channel
    let (watcher_tx, mut watcher_rx) = tokio::sync::mpsc::channel(100);

    // Create file watcher
    let mut watcher = match RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| {
            let _ = watcher_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_millis(500)),
    ) {
        Ok(watcher) => watcher,
        Err(e) => {
            tracing::error!("Failed to create file watcher: {}", e);
            return;
        }
    };

    // Watch the source tree
    if let Err(e) = watcher.watch(&src_dir, RecursiveMode::Recursive) {
        tracing::error!("Failed to watch {}: {}", src_dir.display(), e);
        return;
    }

    // Also watch the book root for book.toml edits
    if config.book_dir != src_dir {
        let _ = watcher.watch(&config.book_dir, RecursiveMode::NonRecursive);
    }

    // Process file change events
    loop {
        tokio::select! {
            Some(event_result) = watcher_rx.recv() => {
                match event_result {
                    Ok(event) => {
                        if !is_relevant(&event) {
                            continue;
                        }

                        // Let the write settle, then fold follow-up events
                        // into one notification.
                        tokio::time::sleep(Duration::from_millis(RELOAD_DEBOUNCE_MS)).await;
                        let mut changed_paths = event.paths.len();
                        while let Ok(more) = watcher_rx.try_recv() {
                            if let Ok(more) = more {
                                if is_relevant(&more) {
                                    changed_paths += more.paths.len();
                                }
                            }
                        }

                        generation += 1;
                        logging::log_watch_changes(changed_paths);

                        let reload = ReloadEvent {
                            event_type: "reload".to_string(),
                            generation,
                            changed_paths,
                        };
                        let json = serde_json::to_string(&reload).unwrap_or_default();
                        if tx.send(Ok(Event::default().event("message").data(json))).await.is_err() {
                            tracing::debug!("Reload client disconnected");
                            break;
                        }
                        logging::log_reload_notify(&connection_id);
                    }
                    Err(e) => {
                        logging::log_watch_error(&e.to_string());
                    }
                }
            }
            _ = tokio::time::sleep(Duration::from_secs(30)) => {
                // Heartbeat doubles as disconnect detection
                let heartbeat = ReloadEvent {
                    event_type: "heartbeat".to_string(),
                    generation,
                    changed_paths: 0,
                };
                let json = serde_json::to_string(&heartbeat).unwrap_or_default();
                if tx.send(Ok(Event::default().event("heartbeat").data(json))).await.is_err() {
                    tracing::debug!("Reload client disconnected");
                    break;
                }
            }
        }
    }

    tracing::info!("Live reload watcher stopped: {}", connection_id);
}

/// Content-changing event on at least one non-ignored path
fn is_relevant(event: &notify::Event) -> bool {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return false;
    }
    event.paths.iter().any(|path| !is_ignored(path))
}

fn is_ignored(path: &Path) -> bool {
    IGNORE_PATTERNS
        .iter()
        .any(|pattern| pattern.matches_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_droppings_ignored() {
        assert!(is_ignored(Path::new("/book/src/.intro.md.swp")));
        assert!(is_ignored(Path::new("/book/src/intro.md~")));
        assert!(is_ignored(Path::new("/book/.git/index.lock")));
        assert!(is_ignored(Path::new("/book/src/.#intro.md")));
    }

    #[test]
    fn test_markdown_changes_not_ignored() {
        assert!(!is_ignored(Path::new("/book/src/intro.md")));
        assert!(!is_ignored(Path::new("/book/src/guide/setup.md")));
        assert!(!is_ignored(Path::new("/book/book.toml")));
    }

    fn event_with_path(kind: EventKind, path: &str) -> notify::Event {
        let mut event = notify::Event::new(kind);
        event.paths.push(path.into());
        event
    }

    #[test]
    fn test_relevant_event_kinds() {
        use notify::event::{AccessKind, ModifyKind};

        let modify = event_with_path(EventKind::Modify(ModifyKind::Any), "/book/src/intro.md");
        assert!(is_relevant(&modify));

        let access = event_with_path(EventKind::Access(AccessKind::Any), "/book/src/intro.md");
        assert!(!is_relevant(&access));

        let swap = event_with_path(EventKind::Modify(ModifyKind::Any), "/book/src/.intro.md.swp");
        assert!(!is_relevant(&swap));
    }
}
