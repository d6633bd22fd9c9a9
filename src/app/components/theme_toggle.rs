use dioxus::prelude::*;

use crate::shared::hooks::{apply_theme_css, save_theme, Theme};

/// Theme toggle component for switching between light and dark theme variants.
/// Features animated sun/moon with clouds and stars.
#[component]
pub fn ThemeToggle(theme: Signal<Theme>) -> Element {
    let mut current_theme = theme;

    let is_currently_light = !current_theme().is_dark();

    let toggle_theme = move |_| {
        let new_theme = current_theme().toggle_light_dark();
        current_theme.set(new_theme);

        spawn(async move {
            apply_theme_css(new_theme).await;
            save_theme(new_theme).await;
        });
    };

    // Tooltip shows target state (what will happen on click)
    let target_theme = current_theme().toggle_light_dark();
    let tooltip = format!("Switch to the {} theme", target_theme.display_name());

    let toggle_class = if is_currently_light {
        "c-theme-toggle c-theme-toggle--light"
    } else {
        "c-theme-toggle"
    };

    rsx! {
        div {
            class: "{toggle_class}",
            "data-tooltip": "{tooltip}",
            role: "button",
            tabindex: "0",
            aria_label: "Toggle between light and dark themes",
            onclick: toggle_theme,

            // Ball (sun/moon)
            div { class: "c-theme-toggle__ball" }

            // Stars (visible in dark mode)
            div { class: "c-theme-toggle__stars",
                span { class: "c-theme-toggle__star" }
                span { class: "c-theme-toggle__star" }
                span { class: "c-theme-toggle__star" }
                span { class: "c-theme-toggle__star" }
                span { class: "c-theme-toggle__star" }
            }

            // Clouds (visible in light mode)
            div { class: "c-theme-toggle__clouds",
                span { class: "c-theme-toggle__cloud" }
                span { class: "c-theme-toggle__cloud" }
                span { class: "c-theme-toggle__cloud" }
            }
        }
    }
}
