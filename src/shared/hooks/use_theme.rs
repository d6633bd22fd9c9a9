use dioxus::prelude::*;
use std::str::FromStr;

use crate::shared::constants::THEME_KEY;

/// Available themes - unified enum for all theme components
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Theme {
    Light,
    Rust,
    Coal,
    Navy,
    Ayu,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Rust => "rust",
            Theme::Coal => "coal",
            Theme::Navy => "navy",
            Theme::Ayu => "ayu",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Rust => "Rust",
            Theme::Coal => "Coal",
            Theme::Navy => "Navy",
            Theme::Ayu => "Ayu",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "☀️",
            Theme::Rust => "🦀",
            Theme::Coal => "🌑",
            Theme::Navy => "🌙",
            Theme::Ayu => "🌆",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Coal | Theme::Navy | Theme::Ayu)
    }

    pub fn all() -> [Theme; 5] {
        [Theme::Light, Theme::Rust, Theme::Coal, Theme::Navy, Theme::Ayu]
    }

    pub fn dark_themes() -> [Theme; 3] {
        [Theme::Coal, Theme::Navy, Theme::Ayu]
    }

    pub fn light_themes() -> [Theme; 2] {
        [Theme::Light, Theme::Rust]
    }

    /// Get the appropriate default theme based on system preference
    pub fn system_default(is_dark_preferred: bool) -> Theme {
        if is_dark_preferred {
            Theme::Navy
        } else {
            Theme::Light
        }
    }

    /// Toggle between light and dark theme variants
    pub fn toggle_light_dark(&self) -> Theme {
        match self {
            Theme::Light => Theme::Navy,
            Theme::Navy => Theme::Light,
            Theme::Rust => Theme::Coal,
            Theme::Coal => Theme::Rust,
            Theme::Ayu => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    /// Unknown names are rejected so callers fall through to the next
    /// vote in the cascade instead of silently landing on one theme.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "rust" => Ok(Theme::Rust),
            "coal" => Ok(Theme::Coal),
            "ayu" => Ok(Theme::Ayu),
            "navy" => Ok(Theme::Navy),
            _ => Err(()),
        }
    }
}

/// Theme hook that manages theme state and persistence.
///
/// Resolution order on mount: saved reader preference, then the book's
/// configured default, then the system color scheme.
pub fn use_theme(book_default: Option<Theme>) -> Signal<Theme> {
    let mut current_theme = use_signal(|| book_default.unwrap_or(Theme::Navy));

    // Initialize theme from localStorage on mount
    use_effect(move || {
        spawn(async move {
            #[cfg(target_arch = "wasm32")]
            {
                if let Some(window) = web_sys::window() {
                    if let Ok(Some(storage)) = window.local_storage() {
                        if let Ok(Some(saved)) = storage.get_item(THEME_KEY) {
                            if let Ok(theme) = saved.parse::<Theme>() {
                                current_theme.set(theme);
                                apply_theme_css(theme).await;
                                return;
                            }
                        }
                    }
                }
            }

            if let Some(theme) = book_default {
                current_theme.set(theme);
                apply_theme_css(theme).await;
                return;
            }

            // No preference anywhere, follow the system color scheme
            #[cfg(target_arch = "wasm32")]
            {
                let script = r#"
                    window.matchMedia('(prefers-color-scheme: dark)').matches
                "#;
                if let Ok(result) = document::eval(script).await {
                    if let Some(is_dark) = result.as_bool() {
                        let system_theme = Theme::system_default(is_dark);
                        current_theme.set(system_theme);
                        apply_theme_css(system_theme).await;
                    }
                }
            }
        });
    });

    current_theme
}

/// Apply theme CSS class to the document element
#[cfg(target_arch = "wasm32")]
pub async fn apply_theme_css(theme: Theme) {
    let script = format!(
        r#"
        (function() {{
            const root = document.documentElement;
            const classes = ['light', 'rust', 'coal', 'navy', 'ayu'];

            // Remove all theme classes
            classes.forEach(cls => root.classList.remove(cls));

            // Add new theme class
            root.classList.add('{}');
        }})()
    "#,
        theme.as_str()
    );

    let _ = document::eval(&script).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn apply_theme_css(_theme: Theme) {
    // No-op on server
}

/// Save theme to localStorage
#[cfg(target_arch = "wasm32")]
pub async fn save_theme(theme: Theme) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(THEME_KEY, theme.as_str());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_theme(_theme: Theme) {
    // No-op on server
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for theme in Theme::all() {
            assert_eq!(theme.as_str().parse::<Theme>(), Ok(theme));
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert_eq!("mystery".parse::<Theme>(), Err(()));
    }

    #[test]
    fn test_toggle_switches_brightness() {
        for theme in Theme::all() {
            assert_ne!(theme.is_dark(), theme.toggle_light_dark().is_dark());
        }
    }

    #[test]
    fn test_palette_split() {
        assert!(Theme::dark_themes().iter().all(Theme::is_dark));
        assert!(Theme::light_themes().iter().all(|t| !t.is_dark()));
    }
}
