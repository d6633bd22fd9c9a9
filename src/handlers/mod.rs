pub mod book;
pub mod chapters;

/// SSE handler for live reload on source changes
pub mod reload;

pub use book::{book_info_handler, toc_handler};
pub use chapters::get_chapter_handler;
pub use reload::reload_events_handler;
