use dioxus::prelude::*;

use crate::shared::hooks::{apply_theme_css, save_theme, Theme};

/// Theme selector panel listing every palette, grouped by brightness.
/// The book's configured default comes from book.toml, so the panel only
/// records the reader's own choice.
#[component]
pub fn ThemeSelector(theme: Signal<Theme>, is_open: Signal<bool>) -> Element {
    if !is_open() {
        return rsx! {};
    }

    rsx! {
        // Backdrop
        div {
            class: "c-theme-selector__backdrop",
            onclick: move |_| is_open.set(false),
        }

        // Panel
        div { class: "c-theme-selector",
            div { class: "c-theme-selector__header",
                h3 { class: "c-theme-selector__title", "Theme" }
                button {
                    class: "c-theme-selector__close",
                    onclick: move |_| is_open.set(false),
                    "✕"
                }
            }

            div { class: "c-theme-selector__options",
                // Light themes group
                div { class: "c-theme-selector__group-label", "☀️ Light" }
                {Theme::light_themes().into_iter().map(|option| {
                    rsx! {
                        ThemeOption {
                            key: "{option.as_str()}",
                            option,
                            theme,
                            is_open,
                        }
                    }
                })}

                // Separator
                div { class: "c-theme-selector__separator" }

                // Dark themes group
                div { class: "c-theme-selector__group-label", "🌙 Dark" }
                {Theme::dark_themes().into_iter().map(|option| {
                    rsx! {
                        ThemeOption {
                            key: "{option.as_str()}",
                            option,
                            theme,
                            is_open,
                        }
                    }
                })}
            }
        }
    }
}

#[component]
fn ThemeOption(option: Theme, theme: Signal<Theme>, is_open: Signal<bool>) -> Element {
    let selected = theme() == option;
    let option_class = if selected {
        "c-theme-selector__option is-active"
    } else {
        "c-theme-selector__option"
    };

    rsx! {
        button {
            class: "{option_class}",
            onclick: move |_| select_theme(option, theme, is_open),
            span { class: "c-theme-selector__option-icon", "{option.icon()}" }
            span { class: "c-theme-selector__option-name", "{option.display_name()}" }
            if selected {
                span { class: "c-theme-selector__option-check", "✓" }
            }
        }
    }
}

// Regular function to avoid mutable closure issues
fn select_theme(choice: Theme, mut current: Signal<Theme>, mut is_open: Signal<bool>) {
    current.set(choice);

    spawn(async move {
        apply_theme_css(choice).await;
        save_theme(choice).await;
    });

    is_open.set(false);
}
