//! Source/output path mapping for book files
//!
//! Markdown sources map to the output paths used in URLs and toc entries:
//! `README.md` becomes `index.html`, any other `*.md` swaps its extension.
//! Requests arrive percent-decoded; anything that could escape the book
//! directory is rejected before touching the filesystem.

use crate::shared::errors::{AppError, Result};

/// Map a markdown source path (relative to the book src dir) to its output
/// path. Non-markdown files keep their path unchanged.
pub fn source_to_output(source: &str) -> String {
    let normalized = source.replace('\\', "/");
    let Some(stripped) = normalized.strip_suffix(".md") else {
        return normalized;
    };

    if stripped == "README" {
        return "index.html".to_string();
    }
    if let Some(dir) = stripped.strip_suffix("README") {
        if dir.ends_with('/') {
            return format!("{}index.html", dir);
        }
    }
    format!("{}.html", stripped)
}

/// Candidate markdown sources for an output path, in lookup order.
/// `chapter_1/index.html` may come from `chapter_1/index.md` or
/// `chapter_1/README.md`.
pub fn source_candidates(output: &str) -> Vec<String> {
    let Some(stem) = output.strip_suffix(".html") else {
        return vec![output.to_string()];
    };

    let mut candidates = vec![format!("{}.md", stem)];
    if let Some(dir) = stem.strip_suffix("index") {
        candidates.push(format!("{}README.md", dir));
    }
    candidates
}

/// Validate a request path: relative, forward slashes, no `.`/`..` segments,
/// no empty segments. Returns the cleaned path.
pub fn sanitize_request_path(path: &str) -> Result<String> {
    let cleaned = path.trim_start_matches('/');

    if cleaned.is_empty() {
        return Err(AppError::InvalidPath(path.to_string()));
    }
    if cleaned.contains('\\') || cleaned.contains('\0') {
        return Err(AppError::InvalidPath(path.to_string()));
    }
    for segment in cleaned.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(AppError::InvalidPath(path.to_string()));
        }
    }

    Ok(cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readme_maps_to_index() {
        assert_eq!(source_to_output("README.md"), "index.html");
        assert_eq!(source_to_output("chapter_1/README.md"), "chapter_1/index.html");
    }

    #[test]
    fn test_markdown_swaps_extension() {
        assert_eq!(source_to_output("introduction.md"), "introduction.html");
        assert_eq!(source_to_output("chapter_4/button.md"), "chapter_4/button.html");
        // A file merely ending in README keeps its own name
        assert_eq!(source_to_output("NOT-README.md"), "NOT-README.html");
    }

    #[test]
    fn test_non_markdown_passes_through() {
        assert_eq!(source_to_output("images/logo.png"), "images/logo.png");
    }

    #[test]
    fn test_candidates_cover_readme_alias() {
        assert_eq!(
            source_candidates("chapter_1/index.html"),
            vec!["chapter_1/index.md", "chapter_1/README.md"]
        );
        assert_eq!(source_candidates("intro.html"), vec!["intro.md"]);
        assert_eq!(source_candidates("index.html"), vec!["index.md", "README.md"]);
    }

    #[test]
    fn test_sanitize_rejects_traversal() {
        assert!(sanitize_request_path("../etc/passwd").is_err());
        assert!(sanitize_request_path("a/../../b.html").is_err());
        assert!(sanitize_request_path("a//b.html").is_err());
        assert!(sanitize_request_path("a/./b.html").is_err());
        assert!(sanitize_request_path("").is_err());
        assert!(sanitize_request_path("a\\b.html").is_err());
    }

    #[test]
    fn test_sanitize_accepts_clean_paths() {
        assert_eq!(sanitize_request_path("/chapter_1/index.html").unwrap(), "chapter_1/index.html");
        assert_eq!(sanitize_request_path("intro.html").unwrap(), "intro.html");
    }
}
