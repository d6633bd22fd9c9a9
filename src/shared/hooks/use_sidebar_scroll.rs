//! Sidebar scroll preservation across page loads.
//!
//! Clicking a navigation link stores the sidebar's scroll offset in a
//! single sessionStorage slot. The next load consumes the slot exactly
//! once and restores the offset; when the slot is empty the active entry
//! is centered instead. In-page navigation never needs the slot because
//! the sidebar element survives route changes.

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::shared::constants::{SIDEBAR_ID, SIDEBAR_SCROLL_KEY};

/// Restore the sidebar scroll position on mount, or center the active
/// entry when nothing was stored.
pub fn use_sidebar_scroll() {
    use_effect(move || {
        spawn(async move {
            restore_or_focus_active().await;
        });
    });
}

/// Store the current sidebar scroll offset for the next page load.
/// Called from navigation link click handlers.
#[cfg(target_arch = "wasm32")]
pub fn persist_sidebar_scroll() {
    if let Some(sidebar) = sidebar_element() {
        store_scroll_position(sidebar.scroll_top() as f64);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn persist_sidebar_scroll() {
    // No-op on server
}

/// Put a scroll offset into the slot, replacing any previous value.
#[cfg(target_arch = "wasm32")]
pub fn store_scroll_position(position: f64) {
    if let Some(storage) = session_storage() {
        let _ = storage.set_item(SIDEBAR_SCROLL_KEY, &position.to_string());
    }
}

/// Take the stored offset, leaving the slot empty. A second take without
/// an intervening store always returns None.
#[cfg(target_arch = "wasm32")]
pub fn take_scroll_position() -> Option<f64> {
    let storage = session_storage()?;
    let value = storage.get_item(SIDEBAR_SCROLL_KEY).ok()??;
    let _ = storage.remove_item(SIDEBAR_SCROLL_KEY);
    value.parse().ok()
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static SCROLL_SLOT: std::cell::Cell<Option<f64>> = std::cell::Cell::new(None);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn store_scroll_position(position: f64) {
    SCROLL_SLOT.with(|slot| slot.set(Some(position)));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn take_scroll_position() -> Option<f64> {
    SCROLL_SLOT.with(|slot| slot.take())
}

#[cfg(target_arch = "wasm32")]
async fn restore_or_focus_active() {
    use web_sys::{ScrollIntoViewOptions, ScrollLogicalPosition};

    match take_scroll_position() {
        Some(position) => {
            if let Some(sidebar) = sidebar_element() {
                sidebar.set_scroll_top(position as i32);
            }
        }
        None => {
            // First visit for this tab, bring the current chapter into view
            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(document) => document,
                None => return,
            };
            if let Ok(Some(active)) = document.query_selector("#sidebar .active") {
                let options = ScrollIntoViewOptions::new();
                options.set_block(ScrollLogicalPosition::Center);
                active.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn restore_or_focus_active() {
    // No-op on server
}

#[cfg(target_arch = "wasm32")]
fn sidebar_element() -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(SIDEBAR_ID)
}

#[cfg(target_arch = "wasm32")]
fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok()?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_is_read_once() {
        store_scroll_position(128.0);
        assert_eq!(take_scroll_position(), Some(128.0));
        // Consumed: the second take sees an empty slot
        assert_eq!(take_scroll_position(), None);
    }

    #[test]
    fn test_empty_slot_yields_none() {
        assert_eq!(take_scroll_position(), None);
    }

    #[test]
    fn test_store_replaces_previous_value() {
        store_scroll_position(10.0);
        store_scroll_position(400.5);
        assert_eq!(take_scroll_position(), Some(400.5));
        assert_eq!(take_scroll_position(), None);
    }
}
