// Domain models (business entities)
// Pure Rust, no framework dependencies

pub mod book;
pub mod chapter;
pub mod sidebar;
pub mod toc;

pub use book::{BookMeta, FoldConfig};
pub use chapter::{ChapterContent, ChapterRef};
pub use sidebar::SidebarState;
pub use toc::{is_ancestor, EntryPath, SectionNumber, Toc, TocEntry, TocItem};
