//! Standalone API server (without Dioxus frontend)
//! Use this for API-only testing or backend development.
//!
//! Run with: cargo run --bin server -- --book-dir ./demo-book

use axum::{routing::get, Router};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use markdown_book_reader::config::{self, AppConfig};
use markdown_book_reader::handlers::{
    book_info_handler,
    get_chapter_handler,
    reload_events_handler,
    toc_handler,
};
use markdown_book_reader::shared::constants::{BOOK_ASSETS_PATH, RELOAD_EVENTS_PATH};

#[derive(Parser)]
#[command(name = "server")]
#[command(about = "Markdown book API server (no frontend)")]
struct Args {
    /// Book root directory (where book.toml lives)
    #[arg(long, default_value = ".")]
    book_dir: PathBuf,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 3001)]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    config::init(AppConfig {
        book_dir: args.book_dir,
        host: args.host,
        port: args.port,
    });
    let app_config = config::get();

    tracing::info!(
        "Starting Markdown Book API Server (standalone), book at {}",
        app_config.book_dir.display()
    );

    let book_src = match markdown_book_reader::book::detect_book(&app_config.book_dir) {
        Ok(source) => source.src_dir(),
        Err(e) => {
            tracing::error!("Cannot open book: {}", e);
            std::process::exit(1);
        }
    };

    // Build the application with routes
    // NOTE: Axum 0.8 uses {param} syntax instead of :param
    let app = Router::new()
        .route("/api/book", get(book_info_handler))
        .route("/api/toc", get(toc_handler))
        .route("/api/chapters/{*path}", get(get_chapter_handler))
        .route(RELOAD_EVENTS_PATH, get(reload_events_handler))
        .nest_service(BOOK_ASSETS_PATH, ServeDir::new(&book_src))
        .layer(CorsLayer::permissive());

    // Run the server
    let addr: SocketAddr = match format!("{}:{}", app_config.host, app_config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid listen address: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Server running on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
