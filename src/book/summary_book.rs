//! SUMMARY.md-driven book source

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::book::source::{BookSource, SourceKind};
use crate::book::summary::parse_summary;
use crate::domain::models::{BookMeta, Toc};
use crate::shared::constants::SUMMARY_FILE;
use crate::shared::errors::Result;
use crate::shared::logging;

pub struct SummaryBook {
    root: PathBuf,
    src_dir: PathBuf,
    meta: BookMeta,
}

impl SummaryBook {
    pub fn new(root: PathBuf, src_dir: PathBuf, meta: BookMeta) -> Self {
        Self {
            root,
            src_dir,
            meta,
        }
    }
}

#[async_trait]
impl BookSource for SummaryBook {
    fn kind(&self) -> SourceKind {
        SourceKind::Summary
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn src_dir(&self) -> PathBuf {
        self.src_dir.clone()
    }

    fn meta(&self) -> BookMeta {
        self.meta.clone()
    }

    async fn toc(&self) -> Result<Toc> {
        let summary_path = self.src_dir.join(SUMMARY_FILE);
        let contents = tokio::fs::read_to_string(&summary_path).await?;
        let toc = parse_summary(&contents).inspect_err(|e| {
            logging::log_summary_parse_error(&summary_path, &e.to_string());
        })?;
        tracing::debug!(
            summary = %summary_path.display(),
            chapters = toc.walk().len(),
            "Parsed summary"
        );
        Ok(toc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_book(summary: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("summary-book-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(SUMMARY_FILE), summary).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_toc_reads_summary_from_src_dir() {
        let dir = temp_book("# Summary\n\n- [One](one.md)\n- [Two](two.md)\n");
        let book = SummaryBook::new(dir.clone(), dir.clone(), BookMeta::default());

        let toc = book.toc().await.unwrap();
        assert_eq!(toc.reading_order().len(), 2);
        assert_eq!(toc.first_chapter().unwrap().path.as_deref(), Some("one.html"));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_missing_summary_is_io_error() {
        let dir = std::env::temp_dir().join(format!("summary-book-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let book = SummaryBook::new(dir.clone(), dir.clone(), BookMeta::default());

        assert!(book.toc().await.is_err());

        std::fs::remove_dir_all(dir).unwrap();
    }
}
