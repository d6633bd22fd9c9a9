//! Link and page-path rules shared by the sidebar and the chapter renderer
//!
//! Book-internal hrefs are stored relative to the book root. Fragment
//! references and absolute external URLs always pass through untouched;
//! everything else resolves to a root-absolute reader URL.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::shared::constants::DEFAULT_DOC;

/// Matches absolute external URLs: "https://x", "mailto+tag://x", "//cdn/x"
static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[a-z+]+:)?//").expect("valid scheme regex"));

/// A fragment reference within the current page ("#section")
pub fn is_fragment(href: &str) -> bool {
    href.starts_with('#')
}

/// An absolute URL with a scheme (or protocol-relative), never rewritten
pub fn is_external(href: &str) -> bool {
    SCHEME_RE.is_match(href)
}

/// Normalize the current page path for comparison against toc entry paths.
///
/// Strips the leading slash and any fragment/query suffix. A path that is
/// empty or ends with `/` is a directory URL and resolves to the default
/// document, so `chapter_1/` and `chapter_1/index.html` compare equal.
pub fn normalize_page_path(path: &str) -> String {
    let mut page = path.trim_start_matches('/');
    if let Some(idx) = page.find(['#', '?']) {
        page = &page[..idx];
    }
    if page.is_empty() {
        return DEFAULT_DOC.to_string();
    }
    if page.ends_with('/') {
        return format!("{}{}", page, DEFAULT_DOC);
    }
    page.to_string()
}

/// Resolve an href written relative to `base_dir` into a book-root-relative
/// path, folding `.` and `..` segments. `..` never climbs above the root.
///
/// Any fragment suffix is preserved: resolving `"../b.html#x"` against
/// `"a"` yields `"b.html#x"`.
pub fn resolve_relative(base_dir: &str, href: &str) -> String {
    let (path_part, fragment) = match href.find('#') {
        Some(idx) => (&href[..idx], &href[idx..]),
        None => (href, ""),
    };

    let mut segments: Vec<&str> = base_dir
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    for part in path_part.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("{}{}", segments.join("/"), fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_detection() {
        assert!(is_fragment("#installation"));
        assert!(is_fragment("#top"));
        assert!(!is_fragment("intro.html#setup"));
    }

    #[test]
    fn test_external_detection() {
        assert!(is_external("https://docs.rs/dioxus"));
        assert!(is_external("//cdn.example.com/x.png"));
        assert!(is_external("git+ssh://host/repo"));
        // A bare scheme-less host path is still book-relative
        assert!(!is_external("docs.rs/thing"));
        assert!(!is_external("chapter_1/index.html"));
    }

    #[test]
    fn test_directory_url_resolves_to_default_doc() {
        assert_eq!(normalize_page_path("chapter_1/"), "chapter_1/index.html");
        assert_eq!(normalize_page_path("/"), "index.html");
        assert_eq!(normalize_page_path(""), "index.html");
    }

    #[test]
    fn test_normalize_strips_prefix_and_suffix() {
        assert_eq!(normalize_page_path("/intro.html"), "intro.html");
        assert_eq!(normalize_page_path("intro.html#usage"), "intro.html");
        assert_eq!(normalize_page_path("intro.html?hl=1"), "intro.html");
        assert_eq!(normalize_page_path("chapter_1/index.html"), "chapter_1/index.html");
    }

    #[test]
    fn test_resolve_relative_folds_dots() {
        assert_eq!(
            resolve_relative("chapter_1", "../chapter_2/index.html"),
            "chapter_2/index.html"
        );
        assert_eq!(resolve_relative("chapter_1", "button.html"), "chapter_1/button.html");
        assert_eq!(resolve_relative("", "./intro.html"), "intro.html");
        // `..` clamps at the book root instead of escaping it
        assert_eq!(resolve_relative("", "../../etc/passwd"), "etc/passwd");
    }

    #[test]
    fn test_resolve_relative_keeps_fragment() {
        assert_eq!(
            resolve_relative("chapter_1", "../intro.html#setup"),
            "intro.html#setup"
        );
    }
}
