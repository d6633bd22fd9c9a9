//! Markdown rendering
//!
//! Chapters are rendered to HTML with heading anchors and rewritten
//! links. Authored links point at sibling markdown files; the rendered
//! HTML must point at reader routes instead, and image/asset references
//! must go through the book asset mount.

use std::collections::HashMap;

use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::book::path_utils::source_to_output;
use crate::shared::constants::BOOK_ASSETS_PATH;
use crate::shared::utils::href::{is_external, is_fragment, resolve_relative};

/// Render chapter markdown to HTML.
///
/// `page_dir` is the directory of the chapter's rendered path relative to
/// the book root (`""` for top-level chapters, `"guide"` for
/// `guide/setup.html`), used to resolve relative links.
pub fn render_markdown(markdown: &str, page_dir: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let events = rewrite_events(Parser::new_ext(markdown, options), page_dir);
    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

/// First `#` heading of the document, if any
pub fn extract_title(markdown: &str) -> Option<String> {
    let mut in_h1 = false;
    let mut title = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let trimmed = title.trim();
                return (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            Event::Text(text) | Event::Code(text) if in_h1 => title.push_str(&text),
            _ => {}
        }
    }
    None
}

fn rewrite_events<'a>(parser: Parser<'a>, page_dir: &str) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut ids = IdRegistry::default();
    // Heading events are buffered so the anchor id can be derived from
    // the heading text before the start tag is emitted.
    let mut heading: Option<(Tag<'a>, Vec<Event<'a>>)> = None;

    for event in parser {
        match event {
            Event::Start(tag @ Tag::Heading { .. }) => {
                heading = Some((tag, Vec::new()));
            }
            Event::End(TagEnd::Heading(level)) => {
                if let Some((tag, buffered)) = heading.take() {
                    out.push(anchored_heading(tag, &buffered, &mut ids));
                    out.extend(buffered);
                }
                out.push(Event::End(TagEnd::Heading(level)));
            }
            other => {
                let rewritten = rewrite_event(other, page_dir);
                match heading.as_mut() {
                    Some((_, buffered)) => buffered.push(rewritten),
                    None => out.push(rewritten),
                }
            }
        }
    }
    out
}

fn rewrite_event<'a>(event: Event<'a>, page_dir: &str) -> Event<'a> {
    match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => {
            let dest = rewrite_target(page_dir, &dest_url, false);
            Event::Start(Tag::Link {
                link_type,
                dest_url: dest.into(),
                title,
                id,
            })
        }
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => {
            let dest = rewrite_target(page_dir, &dest_url, true);
            Event::Start(Tag::Image {
                link_type,
                dest_url: dest.into(),
                title,
                id,
            })
        }
        other => other,
    }
}

/// Map an authored link target to what the reader serves.
///
/// Fragments, external URLs and already-absolute paths pass through.
/// Page links (`.md`, `.html`, directories) become reader routes; any
/// other file becomes a book asset URL.
fn rewrite_target(page_dir: &str, dest: &str, is_image: bool) -> String {
    if dest.is_empty() || is_fragment(dest) || is_external(dest) || dest.starts_with('/') {
        return dest.to_string();
    }

    let (path_part, fragment) = match dest.find('#') {
        Some(idx) => (&dest[..idx], &dest[idx..]),
        None => (dest, ""),
    };
    let resolved = resolve_relative(page_dir, path_part);

    if is_image {
        return format!("{}/{}{}", BOOK_ASSETS_PATH, resolved, fragment);
    }

    let lower = resolved.to_ascii_lowercase();
    if lower.ends_with(".md") || lower.ends_with(".html") {
        return format!("/{}{}", source_to_output(&resolved), fragment);
    }
    let last_segment_is_file = resolved
        .rsplit('/')
        .next()
        .map(|seg| seg.contains('.'))
        .unwrap_or(false);
    if last_segment_is_file {
        format!("{}/{}{}", BOOK_ASSETS_PATH, resolved, fragment)
    } else {
        // Bare directory reference, let the route resolve its index.
        format!("/{}{}", resolved, fragment)
    }
}

fn anchored_heading<'a>(
    tag: Tag<'a>,
    buffered: &[Event<'a>],
    ids: &mut IdRegistry,
) -> Event<'a> {
    match tag {
        Tag::Heading {
            level,
            id,
            classes,
            attrs,
        } => {
            let slug = match &id {
                Some(explicit) => ids.claim(explicit),
                None => {
                    let text: String = buffered
                        .iter()
                        .filter_map(|event| match event {
                            Event::Text(t) | Event::Code(t) => Some(t.as_ref()),
                            _ => None,
                        })
                        .collect();
                    ids.claim(&slugify(&text))
                }
            };
            Event::Start(Tag::Heading {
                level,
                id: Some(slug.into()),
                classes,
                attrs,
            })
        }
        other => Event::Start(other),
    }
}

/// Deduplicates heading anchors: repeated slugs get `-1`, `-2` suffixes
#[derive(Default)]
struct IdRegistry {
    seen: HashMap<String, usize>,
}

impl IdRegistry {
    fn claim(&mut self, candidate: &str) -> String {
        let count = self.seen.entry(candidate.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            candidate.to_string()
        } else {
            format!("{}-{}", candidate, *count - 1)
        }
    }
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        assert_eq!(
            extract_title("# Getting Started\n\nBody.\n"),
            Some("Getting Started".to_string())
        );
        assert_eq!(
            extract_title("Intro text\n\n# Late `Title`\n"),
            Some("Late Title".to_string())
        );
        assert_eq!(extract_title("## Only a subheading\n"), None);
        assert_eq!(extract_title("plain text\n"), None);
    }

    #[test]
    fn test_headings_get_anchor_ids() {
        let html = render_markdown("# Hello World\n\n## Usage\n\n## Usage\n", "");
        assert!(html.contains(r#"<h1 id="hello-world">"#));
        assert!(html.contains(r#"<h2 id="usage">"#));
        assert!(html.contains(r#"<h2 id="usage-1">"#));
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let html = render_markdown("## Config {#configuration}\n", "");
        assert!(html.contains(r#"<h2 id="configuration">"#));
    }

    #[test]
    fn test_markdown_links_become_reader_routes() {
        let html = render_markdown("[next](other.md)\n", "");
        assert!(html.contains(r#"href="/other.html""#));

        let html = render_markdown("[up](../intro.md#setup)\n", "guide");
        assert!(html.contains(r#"href="/intro.html#setup""#));

        let html = render_markdown("[nested](sub/README.md)\n", "");
        assert!(html.contains(r#"href="/sub/index.html""#));
    }

    #[test]
    fn test_fragment_and_external_links_untouched() {
        let html = render_markdown("[here](#section)\n", "guide");
        assert!(html.contains(r##"href="#section""##));

        let html = render_markdown("[docs](https://docs.rs)\n", "guide");
        assert!(html.contains(r#"href="https://docs.rs""#));

        let html = render_markdown("[cdn](//cdn.example.com/lib.js)\n", "guide");
        assert!(html.contains(r#"href="//cdn.example.com/lib.js""#));
    }

    #[test]
    fn test_images_and_files_use_asset_mount() {
        let html = render_markdown("![diagram](images/arch.png)\n", "guide");
        assert!(html.contains(r#"src="/book-assets/guide/images/arch.png""#));

        let html = render_markdown("[data](files/data.json)\n", "");
        assert!(html.contains(r#"href="/book-assets/files/data.json""#));
    }

    #[test]
    fn test_extensions_enabled() {
        let html = render_markdown("~~gone~~\n", "");
        assert!(html.contains("<del>"));

        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n", "");
        assert!(html.contains("<table>"));

        let html = render_markdown("- [x] done\n", "");
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("???"), "section");
    }
}
