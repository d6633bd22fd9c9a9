use serde::{Deserialize, Serialize};

/// Section folding behavior for the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoldConfig {
    /// When false every section renders expanded
    pub enable: bool,
    /// Nesting depth that still starts expanded when folding is enabled
    pub level: u8,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            enable: false,
            level: 0,
        }
    }
}

impl FoldConfig {
    /// Baseline expansion for a section at `depth` (0 = top level),
    /// before the active chain and user toggles are applied.
    pub fn default_expanded(&self, depth: usize) -> bool {
        !self.enable || depth < self.level as usize
    }
}

/// Book metadata parsed from book.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookMeta {
    pub title: String,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    /// Theme the book asks for; None lets the reader's system scheme decide
    pub default_theme: Option<String>,
    pub fold: FoldConfig,
}

impl Default for BookMeta {
    fn default() -> Self {
        Self {
            title: "Untitled Book".to_string(),
            authors: Vec::new(),
            description: None,
            language: None,
            default_theme: None,
            fold: FoldConfig::default(),
        }
    }
}
