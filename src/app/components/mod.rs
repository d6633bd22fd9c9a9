pub mod chapter_view;
pub mod common;
pub mod theme_selector;
pub mod theme_toggle;

pub use chapter_view::ChapterView;
pub use common::{ChapterLoading, EmptyState, ErrorMessage, LoadingText};
pub use theme_selector::ThemeSelector;
pub use theme_toggle::ThemeToggle;
