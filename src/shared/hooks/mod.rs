// Custom Dioxus hooks
pub mod use_live_reload;
pub mod use_sidebar_scroll;
pub mod use_sidebar_visible;
pub mod use_theme;

pub use use_live_reload::use_live_reload;
pub use use_sidebar_scroll::{persist_sidebar_scroll, use_sidebar_scroll};
pub use use_sidebar_visible::{save_sidebar_visible, use_sidebar_visible};
pub use use_theme::{apply_theme_css, save_theme, use_theme, Theme};
