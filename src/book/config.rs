//! book.toml loading
//!
//! Only the tables the reader cares about are modeled; unknown keys are
//! ignored so books written for other toolchains still open.

use std::path::Path;

use serde::Deserialize;

use crate::domain::models::{BookMeta, FoldConfig};
use crate::shared::errors::Result;

/// Parsed book configuration: metadata plus the source directory
#[derive(Debug, Clone, PartialEq)]
pub struct BookConfig {
    pub meta: BookMeta,
    /// Markdown source directory relative to the book root
    pub src_dir: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawBookToml {
    #[serde(default)]
    book: RawBookTable,
    #[serde(default)]
    output: RawOutputTable,
}

#[derive(Debug, Default, Deserialize)]
struct RawBookTable {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    description: Option<String>,
    language: Option<String>,
    src: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOutputTable {
    #[serde(default)]
    html: RawHtmlTable,
}

#[derive(Debug, Default, Deserialize)]
struct RawHtmlTable {
    #[serde(rename = "default-theme")]
    default_theme: Option<String>,
    #[serde(default)]
    fold: RawFoldTable,
}

#[derive(Debug, Default, Deserialize)]
struct RawFoldTable {
    enable: Option<bool>,
    level: Option<u8>,
}

/// Parse book.toml contents. `fallback_title` is used when `[book] title`
/// is absent (the reader derives it from the directory name).
pub fn parse_book_toml(contents: &str, fallback_title: &str) -> Result<BookConfig> {
    let raw: RawBookToml = toml::from_str(contents)
        .map_err(|e| crate::shared::errors::AppError::Config(e.to_string()))?;

    let meta = BookMeta {
        title: raw
            .book
            .title
            .unwrap_or_else(|| fallback_title.to_string()),
        authors: raw.book.authors,
        description: raw.book.description,
        language: raw.book.language,
        default_theme: raw.output.html.default_theme,
        fold: FoldConfig {
            enable: raw.output.html.fold.enable.unwrap_or(false),
            level: raw.output.html.fold.level.unwrap_or(0),
        },
    };

    Ok(BookConfig {
        meta,
        src_dir: raw.book.src.unwrap_or_else(|| "src".to_string()),
    })
}

/// Load the configuration for the book rooted at `root`.
/// A missing book.toml yields defaults with the directory name as title.
pub fn load_book_config(root: &Path) -> Result<BookConfig> {
    let fallback_title = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("Untitled Book");

    let config_path = root.join("book.toml");
    if !config_path.exists() {
        tracing::debug!(root = %root.display(), "No book.toml, using defaults");
        return Ok(BookConfig {
            meta: BookMeta {
                title: fallback_title.to_string(),
                ..BookMeta::default()
            },
            src_dir: "src".to_string(),
        });
    }

    let contents = std::fs::read_to_string(&config_path)?;
    parse_book_toml(&contents, fallback_title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_book_toml(
            r#"
            [book]
            title = "Widget Guide"
            authors = ["A. Author"]
            description = "All about widgets"
            language = "en"
            src = "docs"

            [output.html]
            default-theme = "ayu"

            [output.html.fold]
            enable = true
            level = 1
            "#,
            "fallback",
        )
        .unwrap();

        assert_eq!(config.meta.title, "Widget Guide");
        assert_eq!(config.meta.authors, vec!["A. Author".to_string()]);
        assert_eq!(config.meta.default_theme.as_deref(), Some("ayu"));
        assert!(config.meta.fold.enable);
        assert_eq!(config.meta.fold.level, 1);
        assert_eq!(config.src_dir, "docs");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_book_toml("", "my-book").unwrap();
        assert_eq!(config.meta.title, "my-book");
        assert_eq!(config.src_dir, "src");
        assert!(!config.meta.fold.enable);
        assert_eq!(config.meta.default_theme, None);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse_book_toml(
            r#"
            [book]
            title = "T"

            [output.html.search]
            enable = true

            [preprocessor.links]
            "#,
            "fallback",
        )
        .unwrap();
        assert_eq!(config.meta.title, "T");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(parse_book_toml("[book\ntitle=", "x").is_err());
    }
}
