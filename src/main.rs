//! Markdown Book Reader - Main Entry Point
//!
//! This file configures the server with Axum routes and Dioxus application.
//! Uses dioxus::serve() pattern for dx serve compatibility.

use markdown_book_reader::app::App;

// Server entry point - NO #[tokio::main], dioxus::serve() creates its own runtime
#[cfg(feature = "server")]
fn main() {
    // IMPORTANT: Use dioxus::server::axum, NOT axum directly
    use dioxus::server::axum::routing::get;
    use tower_http::services::ServeDir;

    // Set panic hook to print full backtrace
    std::panic::set_hook(Box::new(|panic_info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        eprintln!("\n=== PANIC CAUGHT ===");
        eprintln!("Panic info: {}", panic_info);
        eprintln!("Backtrace:\n{}", backtrace);
        eprintln!("=== END PANIC ===\n");
    }));

    // Initialize tracing BEFORE dioxus::serve
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Markdown Book Reader...");

    use markdown_book_reader::handlers::{
        book_info_handler,
        get_chapter_handler,
        reload_events_handler,
        toc_handler,
    };
    use markdown_book_reader::shared::constants::{BOOK_ASSETS_PATH, RELOAD_EVENTS_PATH};

    // NO #[tokio::main] - dioxus::serve creates its own runtime
    dioxus::serve(|| {
        async move {
            let config = markdown_book_reader::config::get();
            tracing::info!("Serving book from {}", config.book_dir.display());

            // Raw book files (images, includes) are served straight from
            // the source tree
            let book_src = match markdown_book_reader::book::detect_book(&config.book_dir) {
                Ok(source) => source.src_dir(),
                Err(e) => {
                    tracing::warn!("Book not readable yet ({}), still serving the UI", e);
                    config.book_dir.join("src")
                }
            };

            // Get the base Dioxus router
            // NOTE: Axum 0.8 uses {param} syntax instead of :param
            let router = dioxus::server::router(App)
                // Book metadata and navigation tree (stateless)
                .route("/api/book", get(book_info_handler))
                .route("/api/toc", get(toc_handler))
                // Rendered chapters, ETag-validated
                .route("/api/chapters/{*path}", get(get_chapter_handler))
                // SSE endpoint for source-change notifications
                .route(RELOAD_EVENTS_PATH, get(reload_events_handler))
                .nest_service(BOOK_ASSETS_PATH, ServeDir::new(&book_src));

            Ok(router)
        }
    });
}

// WASM entry point (browser) - no server feature
#[cfg(all(not(feature = "server"), target_arch = "wasm32"))]
fn main() {
    // Log to browser console to confirm WASM loaded
    web_sys::console::log_1(&"[WASM] Markdown Book Reader - WASM initialized!".into());
    dioxus::launch(App);
}

// Native client (desktop) - no server feature, not WASM
#[cfg(all(not(feature = "server"), not(target_arch = "wasm32")))]
fn main() {
    dioxus::launch(App);
}
