//! Flat book source
//!
//! Fallback for directories without a SUMMARY.md: the navigation tree is
//! derived from the directory structure itself. README/index files come
//! first and act as the entry for their directory, remaining files sort
//! alphabetically, subdirectories follow as nested sections.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use walkdir::{DirEntry, WalkDir};

use crate::book::path_utils::source_to_output;
use crate::book::render::extract_title;
use crate::book::source::{BookSource, SourceKind};
use crate::book::summary::assign_numbers;
use crate::domain::models::{BookMeta, Toc, TocEntry, TocItem};
use crate::shared::constants::SUMMARY_FILE;
use crate::shared::errors::{AppError, Result};

pub struct FlatBook {
    root: PathBuf,
    scan_dir: PathBuf,
    meta: BookMeta,
}

impl FlatBook {
    pub fn new(root: PathBuf, scan_dir: PathBuf, meta: BookMeta) -> Self {
        Self {
            root,
            scan_dir,
            meta,
        }
    }
}

#[async_trait]
impl BookSource for FlatBook {
    fn kind(&self) -> SourceKind {
        SourceKind::Flat
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn src_dir(&self) -> PathBuf {
        self.scan_dir.clone()
    }

    fn meta(&self) -> BookMeta {
        self.meta.clone()
    }

    async fn toc(&self) -> Result<Toc> {
        let toc = scan_tree(&self.scan_dir)?;
        tracing::debug!(
            dir = %self.scan_dir.display(),
            chapters = toc.walk().len(),
            "Scanned flat book"
        );
        Ok(toc)
    }
}

struct Frame {
    depth: usize,
    entry: TocEntry,
}

/// Walk the directory tree and build a numbered table of contents.
fn scan_tree(scan_dir: &Path) -> Result<Toc> {
    // Root frame at depth 0 collects the top-level items in `nested`.
    let mut stack = vec![Frame {
        depth: 0,
        entry: TocEntry::new("", None),
    }];

    let walker = WalkDir::new(scan_dir)
        .min_depth(1)
        .sort_by(|a, b| rank(a).cmp(&rank(b)).then_with(|| a.file_name().cmp(b.file_name())))
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let depth = entry.depth();
        while stack.len() > 1 && stack[stack.len() - 1].depth >= depth {
            pop_frame(&mut stack);
        }

        if entry.file_type().is_dir() {
            let name = entry.file_name().to_string_lossy().to_string();
            stack.push(Frame {
                depth,
                entry: TocEntry::new(title_from_stem(&name), None),
            });
            continue;
        }

        if !is_markdown(entry.path()) || entry.file_name() == SUMMARY_FILE {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(scan_dir)
            .map_err(|_| AppError::InvalidPath(entry.path().display().to_string()))?;
        let output = source_to_output(&rel.to_string_lossy());
        let title = file_title(entry.path());

        let frame = match stack.last_mut() {
            Some(frame) => frame,
            None => continue,
        };
        if frame.depth > 0 && is_index_file(entry.path()) {
            // The index file becomes the directory's own entry.
            if frame.entry.path.is_none() {
                frame.entry.path = Some(output);
                if let Some(title) = title {
                    frame.entry.title = title;
                }
            }
            continue;
        }

        let stem = entry
            .path()
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let chapter = TocEntry::new(
            title.unwrap_or_else(|| title_from_stem(&stem)),
            Some(output),
        );
        frame.entry.nested.push(TocItem::Chapter(chapter));
    }

    while stack.len() > 1 {
        pop_frame(&mut stack);
    }

    let mut items = Vec::new();
    let mut counter = 0u32;
    if let Some(root) = stack.pop() {
        for item in root.entry.nested {
            if let TocItem::Chapter(mut entry) = item {
                counter += 1;
                assign_numbers(&mut entry, &[counter]);
                items.push(TocItem::Chapter(entry));
            }
        }
    }
    Ok(Toc { items })
}

/// Close the current directory frame, dropping it if it produced nothing.
fn pop_frame(stack: &mut Vec<Frame>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(frame) = stack.pop() {
        if frame.entry.path.is_none() && frame.entry.nested.is_empty() {
            return;
        }
        if let Some(parent) = stack.last_mut() {
            parent.entry.nested.push(TocItem::Chapter(frame.entry));
        }
    }
}

/// Sort key within a directory: index files, then files, then directories
fn rank(entry: &DirEntry) -> u8 {
    if entry.file_type().is_dir() {
        return 2;
    }
    if is_index_file(entry.path()) { 0 } else { 1 }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn is_index_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| {
            let stem = stem.to_ascii_lowercase();
            stem == "readme" || stem == "index"
        })
        .unwrap_or(false)
}

/// First `#` heading of the file, if it has one
fn file_title(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => extract_title(&contents),
        Err(e) => {
            tracing::warn!(path = %path.display(), "Failed to read file for title: {}", e);
            None
        }
    }
}

/// Prettify a file stem: `getting-started` becomes `Getting Started`
fn title_from_stem(stem: &str) -> String {
    stem.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("flat-book-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_title_from_stem() {
        assert_eq!(title_from_stem("getting-started"), "Getting Started");
        assert_eq!(title_from_stem("faq"), "Faq");
        assert_eq!(title_from_stem("multi_word_name"), "Multi Word Name");
    }

    #[tokio::test]
    async fn test_scan_builds_numbered_tree() {
        let dir = temp_dir();
        write(&dir.join("README.md"), "# Welcome\n\nHello.\n");
        write(&dir.join("alpha.md"), "# Alpha Chapter\n");
        write(&dir.join("guide/README.md"), "# The Guide\n");
        write(&dir.join("guide/setup.md"), "no heading here\n");
        std::fs::create_dir_all(dir.join("empty")).unwrap();
        write(&dir.join("notes.txt"), "not markdown\n");

        let book = FlatBook::new(dir.clone(), dir.clone(), BookMeta::default());
        let toc = book.toc().await.unwrap();

        // README first, then alpha, then the guide directory; empty dirs
        // and non-markdown files are omitted.
        assert_eq!(toc.items.len(), 3);

        let welcome = toc.entry_at(&vec![0]).unwrap();
        assert_eq!(welcome.title, "Welcome");
        assert_eq!(welcome.path.as_deref(), Some("index.html"));
        assert_eq!(welcome.number.as_ref().unwrap().to_string(), "1.");

        let alpha = toc.entry_at(&vec![1]).unwrap();
        assert_eq!(alpha.title, "Alpha Chapter");
        assert_eq!(alpha.path.as_deref(), Some("alpha.html"));

        let guide = toc.entry_at(&vec![2]).unwrap();
        assert_eq!(guide.title, "The Guide");
        assert_eq!(guide.path.as_deref(), Some("guide/index.html"));
        assert_eq!(guide.number.as_ref().unwrap().to_string(), "3.");

        let setup = toc.entry_at(&vec![2, 0]).unwrap();
        assert_eq!(setup.title, "Setup");
        assert_eq!(setup.path.as_deref(), Some("guide/setup.html"));
        assert_eq!(setup.number.as_ref().unwrap().to_string(), "3.1.");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_directory_without_index_becomes_draft_section() {
        let dir = temp_dir();
        write(&dir.join("misc/one.md"), "# One\n");

        let book = FlatBook::new(dir.clone(), dir.clone(), BookMeta::default());
        let toc = book.toc().await.unwrap();

        let misc = toc.entry_at(&vec![0]).unwrap();
        assert_eq!(misc.title, "Misc");
        assert!(misc.path.is_none());
        assert_eq!(toc.entry_at(&vec![0, 0]).unwrap().title, "One");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_summary_file_is_skipped() {
        let dir = temp_dir();
        write(&dir.join("SUMMARY.md"), "- [X](x.md)\n");
        write(&dir.join("page.md"), "# Page\n");

        let book = FlatBook::new(dir.clone(), dir.clone(), BookMeta::default());
        let toc = book.toc().await.unwrap();

        assert_eq!(toc.reading_order().len(), 1);
        assert_eq!(toc.first_chapter().unwrap().title, "Page");

        std::fs::remove_dir_all(dir).unwrap();
    }
}
