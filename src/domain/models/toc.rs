//! Table-of-contents tree
//!
//! Built once per book load and immutable afterwards. The sidebar derives
//! all of its per-render state (active entry, expanded sections) from this
//! tree plus the current page path.

use serde::{Deserialize, Serialize};

use super::chapter::ChapterRef;
use crate::shared::constants::DEFAULT_DOC;
use crate::shared::utils::href::normalize_page_path;

/// Hierarchical section number, rendered mdBook-style: `1.` or `4.2.`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionNumber(pub Vec<u32>);

impl std::fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for part in &self.0 {
            write!(f, "{}.", part)?;
        }
        Ok(())
    }
}

/// One node of the navigation tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TocItem {
    Chapter(TocEntry),
    Separator,
    PartTitle(String),
}

/// A chapter link (or draft) with its nested sub-items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    pub title: String,
    /// Output path relative to the book root (`chapter_1/index.html`).
    /// None for draft chapters, which render as plain text.
    pub path: Option<String>,
    /// None for prefix/suffix ("affix") chapters
    pub number: Option<SectionNumber>,
    pub nested: Vec<TocItem>,
}

impl TocEntry {
    pub fn new(title: impl Into<String>, path: Option<String>) -> Self {
        Self {
            title: title.into(),
            path,
            number: None,
            nested: Vec::new(),
        }
    }

    /// Prefix/suffix chapters sit outside the numbered hierarchy
    pub fn is_affix(&self) -> bool {
        self.number.is_none()
    }

    pub fn has_children(&self) -> bool {
        self.nested
            .iter()
            .any(|item| matches!(item, TocItem::Chapter(_)))
    }
}

/// Address of an entry inside the tree: indices through `items`/`nested`
pub type EntryPath = Vec<usize>;

/// True when `ancestor` encloses `entry` (proper prefix of its address)
pub fn is_ancestor(ancestor: &EntryPath, entry: &EntryPath) -> bool {
    ancestor.len() < entry.len() && entry[..ancestor.len()] == ancestor[..]
}

/// Immutable navigation tree for one book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Toc {
    pub items: Vec<TocItem>,
}

impl Toc {
    /// Depth-first walk over every chapter entry with its tree address
    pub fn walk(&self) -> Vec<(EntryPath, &TocEntry)> {
        let mut out = Vec::new();
        walk_items(&self.items, &mut Vec::new(), &mut out);
        out
    }

    /// Chapters with output paths, in reading order
    pub fn reading_order(&self) -> Vec<&TocEntry> {
        self.walk()
            .into_iter()
            .map(|(_, entry)| entry)
            .filter(|entry| entry.path.is_some())
            .collect()
    }

    pub fn first_chapter(&self) -> Option<&TocEntry> {
        self.reading_order().into_iter().next()
    }

    /// Look up the entry for a normalized page path
    pub fn find(&self, page: &str) -> Option<&TocEntry> {
        self.walk()
            .into_iter()
            .map(|(_, entry)| entry)
            .find(|entry| entry.path.as_deref() == Some(page))
    }

    /// Entry at a tree address, if the address points at a chapter
    pub fn entry_at(&self, address: &EntryPath) -> Option<&TocEntry> {
        let mut items = &self.items;
        let mut found = None;
        for &idx in address {
            match items.get(idx) {
                Some(TocItem::Chapter(entry)) => {
                    found = Some(entry);
                    items = &entry.nested;
                }
                _ => return None,
            }
        }
        found
    }

    /// Tree address of the entry matching the current page.
    ///
    /// The page path is normalized first, so directory URLs match their
    /// default document. When the current page is the root default document
    /// and no entry claims it, the first chapter aliases the index.
    /// At most one entry is ever active.
    pub fn active_entry(&self, current_page: &str) -> Option<EntryPath> {
        let page = normalize_page_path(current_page);
        let entries = self.walk();

        if let Some((addr, _)) = entries
            .iter()
            .find(|(_, entry)| entry.path.as_deref() == Some(page.as_str()))
        {
            return Some(addr.clone());
        }

        if page == DEFAULT_DOC {
            return entries
                .iter()
                .find(|(_, entry)| entry.path.is_some())
                .map(|(addr, _)| addr.clone());
        }

        None
    }

    /// Previous and next chapters around `page` in reading order
    pub fn neighbors(&self, page: &str) -> (Option<ChapterRef>, Option<ChapterRef>) {
        let page = normalize_page_path(page);
        let order = self.reading_order();
        let idx = match order
            .iter()
            .position(|entry| entry.path.as_deref() == Some(page.as_str()))
        {
            Some(idx) => idx,
            None => return (None, None),
        };
        let prev = idx.checked_sub(1).and_then(|i| ChapterRef::from_entry(order[i]));
        let next = order.get(idx + 1).and_then(|entry| ChapterRef::from_entry(entry));
        (prev, next)
    }
}

fn walk_items<'a>(
    items: &'a [TocItem],
    prefix: &mut Vec<usize>,
    out: &mut Vec<(EntryPath, &'a TocEntry)>,
) {
    for (idx, item) in items.iter().enumerate() {
        if let TocItem::Chapter(entry) = item {
            prefix.push(idx);
            out.push((prefix.clone(), entry));
            walk_items(&entry.nested, prefix, out);
            prefix.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, path: &str) -> TocEntry {
        TocEntry::new(title, Some(path.to_string()))
    }

    fn sample_toc() -> Toc {
        // introduction, 1. styling (1.1 how-to), 2. interaction
        let mut styling = entry("Styling", "chapter_1/index.html");
        styling.number = Some(SectionNumber(vec![1]));
        let mut how_to = entry("How to write styles", "chapter_1/how_to.html");
        how_to.number = Some(SectionNumber(vec![1, 1]));
        styling.nested.push(TocItem::Chapter(how_to));

        let mut interaction = entry("Interaction", "chapter_2/index.html");
        interaction.number = Some(SectionNumber(vec![2]));

        Toc {
            items: vec![
                TocItem::Chapter(entry("Introduction", "introduction.html")),
                TocItem::Chapter(styling),
                TocItem::Separator,
                TocItem::Chapter(interaction),
            ],
        }
    }

    #[test]
    fn test_section_number_display() {
        assert_eq!(SectionNumber(vec![1]).to_string(), "1.");
        assert_eq!(SectionNumber(vec![4, 2]).to_string(), "4.2.");
    }

    #[test]
    fn test_exactly_one_active_entry() {
        let toc = sample_toc();
        let active = toc.active_entry("chapter_1/how_to.html").unwrap();
        assert_eq!(active, vec![1, 0]);

        // No match: zero active entries
        assert!(toc.active_entry("missing.html").is_none());
    }

    #[test]
    fn test_directory_url_matches_default_doc() {
        let toc = sample_toc();
        assert_eq!(toc.active_entry("chapter_1/"), toc.active_entry("chapter_1/index.html"));
        assert_eq!(toc.active_entry("/chapter_2/"), Some(vec![3]));
    }

    #[test]
    fn test_root_aliases_first_chapter() {
        let toc = sample_toc();
        // The book has no index.html entry, so "/" falls back to the first chapter
        assert_eq!(toc.active_entry("/"), Some(vec![0]));
        assert_eq!(toc.active_entry(""), Some(vec![0]));
    }

    #[test]
    fn test_exact_index_match_beats_alias() {
        let mut toc = sample_toc();
        toc.items.push(TocItem::Chapter(entry("Index", "index.html")));
        assert_eq!(toc.active_entry("/"), Some(vec![4]));
    }

    #[test]
    fn test_entry_at_address() {
        let toc = sample_toc();
        assert_eq!(toc.entry_at(&vec![1, 0]).unwrap().title, "How to write styles");
        assert_eq!(toc.entry_at(&vec![3]).unwrap().title, "Interaction");
        // Separators and out-of-range indices are not chapters
        assert!(toc.entry_at(&vec![2]).is_none());
        assert!(toc.entry_at(&vec![9]).is_none());
    }

    #[test]
    fn test_ancestor_addresses() {
        assert!(is_ancestor(&vec![1], &vec![1, 0]));
        assert!(is_ancestor(&vec![1], &vec![1, 0, 2]));
        assert!(!is_ancestor(&vec![1, 0], &vec![1]));
        assert!(!is_ancestor(&vec![3], &vec![1, 0]));
        assert!(!is_ancestor(&vec![1], &vec![1]));
    }

    #[test]
    fn test_reading_order_skips_drafts() {
        let mut toc = sample_toc();
        toc.items.push(TocItem::Chapter(TocEntry::new("Draft", None)));
        let order = toc.reading_order();
        assert_eq!(order.len(), 4);
        assert!(order.iter().all(|entry| entry.path.is_some()));
    }

    #[test]
    fn test_neighbors_follow_reading_order() {
        let toc = sample_toc();
        let (prev, next) = toc.neighbors("chapter_1/index.html");
        assert_eq!(prev.unwrap().path, "introduction.html");
        assert_eq!(next.unwrap().path, "chapter_1/how_to.html");

        let (prev, next) = toc.neighbors("introduction.html");
        assert!(prev.is_none());
        assert_eq!(next.unwrap().path, "chapter_1/index.html");

        let (prev, next) = toc.neighbors("chapter_2/index.html");
        let prev = prev.unwrap();
        assert_eq!(prev.path, "chapter_1/how_to.html");
        assert_eq!(prev.number, Some(SectionNumber(vec![1, 1])));
        assert!(next.is_none());
    }
}
