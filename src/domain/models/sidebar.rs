//! Sidebar expansion state
//!
//! The effective expansion of a section layers three inputs: the fold
//! baseline from book config, the active chain (ancestors of the current
//! page are always open), and explicit user toggles which override both.

use std::collections::HashMap;

use super::toc::EntryPath;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SidebarState {
    overrides: HashMap<EntryPath, bool>,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective expansion for the section at `entry`, given its baseline
    /// (fold default OR membership in the active chain).
    pub fn is_expanded(&self, entry: &EntryPath, base: bool) -> bool {
        self.overrides.get(entry).copied().unwrap_or(base)
    }

    /// Flip the section's display state. One call flips exactly once.
    pub fn toggle(&mut self, entry: EntryPath, base: bool) {
        let current = self.is_expanded(&entry, base);
        self.overrides.insert(entry, !current);
    }

    /// Drop all user toggles (book reloaded, toc replaced)
    pub fn reset(&mut self) {
        self.overrides.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_exactly_once() {
        let mut state = SidebarState::new();
        let section: EntryPath = vec![3];

        assert!(!state.is_expanded(&section, false));
        state.toggle(section.clone(), false);
        assert!(state.is_expanded(&section, false));
        state.toggle(section.clone(), false);
        assert!(!state.is_expanded(&section, false));
    }

    #[test]
    fn test_toggle_overrides_expanded_baseline() {
        let mut state = SidebarState::new();
        let section: EntryPath = vec![1];

        // Baseline open (active chain); a toggle closes it despite the baseline
        assert!(state.is_expanded(&section, true));
        state.toggle(section.clone(), true);
        assert!(!state.is_expanded(&section, true));
    }

    #[test]
    fn test_non_ancestor_sections_unaffected() {
        let state = SidebarState::new();
        // Activation only changes the baseline of chain members; sections
        // outside the chain keep their fold default untouched.
        assert!(!state.is_expanded(&vec![5], false));
        assert!(state.is_expanded(&vec![6], true));
    }

    #[test]
    fn test_reset_clears_overrides() {
        let mut state = SidebarState::new();
        state.toggle(vec![2], false);
        assert!(state.is_expanded(&vec![2], false));
        state.reset();
        assert!(!state.is_expanded(&vec![2], false));
    }
}
