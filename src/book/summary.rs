//! SUMMARY.md parsing
//!
//! The summary is a markdown document whose list structure defines the
//! table of contents: bare links outside lists are unnumbered affix
//! chapters, list items are numbered chapters (nesting extends the
//! section number), `---` becomes a separator and every `#` heading
//! after the document title starts a new part.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use crate::book::path_utils::source_to_output;
use crate::domain::models::{SectionNumber, Toc, TocEntry, TocItem};
use crate::shared::errors::{AppError, Result};

/// Parse SUMMARY.md contents into a table of contents.
/// Chapter links are converted from source paths to their rendered
/// counterparts, so `guide/intro.md` is stored as `guide/intro.html`.
pub fn parse_summary(contents: &str) -> Result<Toc> {
    let mut state = SummaryParser::default();

    for event in Parser::new(contents) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => {
                state.in_heading = true;
                state.heading_buf.clear();
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                state.in_heading = false;
                if state.seen_title {
                    let title = state.heading_buf.trim().to_string();
                    state.root.push((TocItem::PartTitle(title), false));
                } else {
                    state.seen_title = true;
                }
            }
            Event::Start(Tag::Item) => {
                state.stack.push(TocEntry::new("", None));
            }
            Event::End(TagEnd::Item) => {
                if let Some(entry) = state.stack.pop() {
                    let item = TocItem::Chapter(entry);
                    match state.stack.last_mut() {
                        Some(parent) => parent.nested.push(item),
                        None => state.root.push((item, true)),
                    }
                }
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                state.in_link = true;
                state.title_buf.clear();
                state.href_buf = dest_url.to_string();
            }
            Event::End(TagEnd::Link) => {
                state.in_link = false;
                state.finish_link()?;
            }
            Event::Text(text) | Event::Code(text) => {
                if state.in_link {
                    state.title_buf.push_str(&text);
                } else if state.in_heading {
                    state.heading_buf.push_str(&text);
                } else if let Some(top) = state.stack.last_mut() {
                    // Tolerate plain-text list items as draft titles.
                    if top.title.is_empty() {
                        top.title = text.trim().to_string();
                    }
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if state.in_link {
                    state.title_buf.push(' ');
                }
            }
            Event::Rule => match state.stack.last_mut() {
                Some(parent) => parent.nested.push(TocItem::Separator),
                None => state.root.push((TocItem::Separator, false)),
            },
            _ => {}
        }
    }

    Ok(state.finish())
}

#[derive(Default)]
struct SummaryParser {
    /// Root-level items and whether each takes part in numbering
    root: Vec<(TocItem, bool)>,
    /// Open list items, innermost last
    stack: Vec<TocEntry>,
    in_link: bool,
    in_heading: bool,
    seen_title: bool,
    title_buf: String,
    href_buf: String,
    heading_buf: String,
}

impl SummaryParser {
    fn finish_link(&mut self) -> Result<()> {
        let title = self.title_buf.trim().to_string();
        let path = if self.href_buf.is_empty() {
            None
        } else {
            Some(chapter_path(&self.href_buf, &title)?)
        };

        match self.stack.last_mut() {
            Some(top) => {
                top.title = title;
                top.path = path;
            }
            None => {
                // Link outside any list: prefix or suffix affix chapter.
                self.root
                    .push((TocItem::Chapter(TocEntry::new(title, path)), false));
            }
        }
        Ok(())
    }

    fn finish(self) -> Toc {
        let mut items = Vec::with_capacity(self.root.len());
        let mut counter = 0u32;
        for (item, numbered) in self.root {
            match item {
                TocItem::Chapter(mut entry) if numbered => {
                    counter += 1;
                    assign_numbers(&mut entry, &[counter]);
                    items.push(TocItem::Chapter(entry));
                }
                other => items.push(other),
            }
        }
        Toc { items }
    }
}

/// Validate a summary link and map it to its rendered path.
fn chapter_path(href: &str, title: &str) -> Result<String> {
    let normalized = href.replace('\\', "/");
    if normalized.starts_with('/') {
        return Err(AppError::SummaryParse(format!(
            "chapter '{title}' uses an absolute path: {href}"
        )));
    }
    if normalized.split('/').any(|seg| seg == "..") {
        return Err(AppError::SummaryParse(format!(
            "chapter '{title}' escapes the source directory: {href}"
        )));
    }
    Ok(source_to_output(&normalized))
}

pub(crate) fn assign_numbers(entry: &mut TocEntry, number: &[u32]) {
    entry.number = Some(SectionNumber(number.to_vec()));
    let mut child = 0u32;
    for item in &mut entry.nested {
        if let TocItem::Chapter(nested) = item {
            child += 1;
            let mut next = number.to_vec();
            next.push(child);
            assign_numbers(nested, &next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"# Summary

[Introduction](README.md)

# User Guide

- [Installation](guide/installation.md)
- [Usage](guide/usage.md)
  - [CLI Flags](guide/cli-flags.md)
  - [Config File](guide/config-file.md)

---

# Reference

- [Architecture](reference/architecture.md)
- [Roadmap]()

[Contributors](misc/contributors.md)
"#;

    fn entry(toc: &Toc, address: &[usize]) -> TocEntry {
        toc.entry_at(&address.to_vec()).cloned().unwrap()
    }

    #[test]
    fn test_prefix_chapter_is_affix() {
        let toc = parse_summary(SAMPLE).unwrap();
        let intro = entry(&toc, &[0]);
        assert!(intro.is_affix());
        assert_eq!(intro.title, "Introduction");
        assert_eq!(intro.path.as_deref(), Some("index.html"));
    }

    #[test]
    fn test_part_titles_and_separator() {
        let toc = parse_summary(SAMPLE).unwrap();
        assert_eq!(toc.items[1], TocItem::PartTitle("User Guide".to_string()));
        assert_eq!(toc.items[4], TocItem::Separator);
        assert_eq!(toc.items[5], TocItem::PartTitle("Reference".to_string()));
    }

    #[test]
    fn test_numbering_spans_parts() {
        let toc = parse_summary(SAMPLE).unwrap();
        assert_eq!(entry(&toc, &[2]).number.unwrap().to_string(), "1.");
        assert_eq!(entry(&toc, &[3]).number.unwrap().to_string(), "2.");
        assert_eq!(entry(&toc, &[3, 0]).number.unwrap().to_string(), "2.1.");
        assert_eq!(entry(&toc, &[3, 1]).number.unwrap().to_string(), "2.2.");
        // Numbering continues across the separator and second part.
        assert_eq!(entry(&toc, &[6]).number.unwrap().to_string(), "3.");
    }

    #[test]
    fn test_draft_chapter_is_numbered_without_path() {
        let toc = parse_summary(SAMPLE).unwrap();
        let draft = entry(&toc, &[7]);
        assert_eq!(draft.title, "Roadmap");
        assert!(draft.path.is_none());
        assert_eq!(draft.number.unwrap().to_string(), "4.");
    }

    #[test]
    fn test_suffix_chapter_is_affix() {
        let toc = parse_summary(SAMPLE).unwrap();
        let contributors = entry(&toc, &[8]);
        assert!(contributors.is_affix());
        assert_eq!(contributors.path.as_deref(), Some("misc/contributors.html"));
    }

    #[test]
    fn test_source_paths_become_rendered_paths() {
        let toc = parse_summary("- [Nested](a/b/README.md)\n").unwrap();
        assert_eq!(entry(&toc, &[0]).path.as_deref(), Some("a/b/index.html"));
    }

    #[test]
    fn test_absolute_path_rejected() {
        let err = parse_summary("- [Bad](/etc/passwd)\n").unwrap_err();
        assert!(matches!(err, AppError::SummaryParse(_)));
    }

    #[test]
    fn test_parent_traversal_rejected() {
        assert!(parse_summary("- [Bad](../outside.md)\n").is_err());
    }

    #[test]
    fn test_empty_summary() {
        let toc = parse_summary("# Summary\n").unwrap();
        assert!(toc.items.is_empty());
        assert!(toc.first_chapter().is_none());
    }
}
