//! Shared constants used across client and server

/// Default document a directory URL resolves to ("/" -> "/index.html")
pub const DEFAULT_DOC: &str = "index.html";
pub const SUMMARY_FILE: &str = "SUMMARY.md";

/// sessionStorage key holding the sidebar scroll offset between navigations
pub const SIDEBAR_SCROLL_KEY: &str = "sidebar-scroll";

/// localStorage key for the selected theme
pub const THEME_KEY: &str = "theme";

/// localStorage key for sidebar visibility (hamburger state)
pub const SIDEBAR_VISIBLE_KEY: &str = "sidebar-visible";

/// DOM id of the sidebar scroll container
pub const SIDEBAR_ID: &str = "sidebar";

/// SSE endpoint streaming reload events while book sources change
pub const RELOAD_EVENTS_PATH: &str = "/api/reload";

/// Mount point for raw book assets (images, includes)
pub const BOOK_ASSETS_PATH: &str = "/book-assets";

/// SSE keep-alive interval in seconds
pub const SSE_KEEP_ALIVE_SECS: u64 = 15;

/// Debounce window for file-watcher reload events, in milliseconds
pub const RELOAD_DEBOUNCE_MS: u64 = 300;
