use dioxus::prelude::*;

use crate::app::components::{ThemeSelector, ThemeToggle};
use crate::shared::hooks::{save_sidebar_visible, Theme};

/// Top menu bar: sidebar toggle on the left, book title, theme controls
/// on the right.
#[component]
pub fn AppNavbar(title: String, theme: Signal<Theme>, sidebar_visible: Signal<bool>) -> Element {
    let mut settings_open = use_signal(|| false);
    let mut visible = sidebar_visible;

    rsx! {
        nav { class: "c-navbar",
            button {
                class: "c-navbar__sidebar-toggle",
                title: "Toggle table of contents",
                aria_label: "Toggle table of contents",
                onclick: move |_| {
                    let next = !visible();
                    visible.set(next);
                    spawn(async move {
                        save_sidebar_visible(next).await;
                    });
                },
                "☰"
            }

            div { class: "c-navbar__title", "{title}" }

            div { class: "c-navbar__actions",
                button {
                    class: "c-navbar__themes",
                    title: "Choose theme",
                    aria_label: "Choose theme",
                    onclick: move |_| settings_open.set(!settings_open()),
                    "🎨"
                }
                ThemeToggle { theme }
            }

            // Theme picker panel, anchored under the navbar
            ThemeSelector { theme, is_open: settings_open }
        }
    }
}
