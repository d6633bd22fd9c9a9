use dioxus::prelude::*;

use crate::shared::constants::SIDEBAR_VISIBLE_KEY;

/// Sidebar visibility hook that manages toggle state and persistence.
///
/// The sidebar starts visible; a reader who hides it keeps it hidden across
/// visits via localStorage.
pub fn use_sidebar_visible() -> Signal<bool> {
    let visible = use_signal(|| true);

    // Initialize visibility from localStorage on mount
    use_effect(move || {
        spawn(async move {
            #[cfg(target_arch = "wasm32")]
            {
                let mut visible = visible;
                if let Some(window) = web_sys::window() {
                    if let Ok(Some(storage)) = window.local_storage() {
                        if let Ok(Some(saved)) = storage.get_item(SIDEBAR_VISIBLE_KEY) {
                            visible.set(saved != "false");
                        }
                    }
                }
            }
        });
    });

    visible
}

/// Save sidebar visibility to localStorage
#[cfg(target_arch = "wasm32")]
pub async fn save_sidebar_visible(visible: bool) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let value = if visible { "true" } else { "false" };
            let _ = storage.set_item(SIDEBAR_VISIBLE_KEY, value);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_sidebar_visible(_visible: bool) {
    // No-op on server
}
