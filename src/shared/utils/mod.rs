// Utility functions
// Link rules, page-path normalization, helpers

pub mod href;

pub use href::{is_external, is_fragment, normalize_page_path, resolve_relative};
