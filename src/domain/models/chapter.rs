use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::toc::{SectionNumber, TocEntry};

/// Lightweight link to a chapter (prev/next navigation, listings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterRef {
    pub title: String,
    pub path: String,
    pub number: Option<SectionNumber>,
}

impl ChapterRef {
    /// Reference to a linkable entry. Drafts have no target, so they
    /// yield None.
    pub fn from_entry(entry: &TocEntry) -> Option<Self> {
        Some(Self {
            title: entry.title.clone(),
            path: entry.path.clone()?,
            number: entry.number.clone(),
        })
    }
}

/// A fully loaded and rendered chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterContent {
    /// Output path relative to the book root (`chapter_1/index.html`)
    pub path: String,
    /// Markdown source path relative to the book src dir
    pub source_path: String,
    pub title: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}
