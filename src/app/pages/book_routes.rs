use crate::app::components::{ChapterView, ErrorMessage, LoadingText};
use crate::app::layouts::{AppNavbar, BookSidebar};
use crate::server_fns::{get_book, BookResponse};
use crate::shared::hooks::{use_live_reload, use_sidebar_visible, use_theme, Theme};

use dioxus::document;
use dioxus::prelude::*;

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    // Book landing page - aliases the first chapter
    #[route("/")]
    Root {},

    // Any chapter output path, e.g. /guide/installation.html
    #[route("/:..segments")]
    Chapter { segments: Vec<String> },
}

impl Route {
    /// Page path of this route relative to the book root
    pub fn page_path(&self) -> String {
        match self {
            Route::Root {} => String::new(),
            Route::Chapter { segments } => segments.join("/"),
        }
    }

    /// Route for a chapter output path from the navigation tree
    pub fn for_page(page: &str) -> Self {
        let segments: Vec<String> = page
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if segments.is_empty() {
            Route::Root {}
        } else {
            Route::Chapter { segments }
        }
    }
}

#[component]
pub fn App() -> Element {
    use_effect(|| {
        tracing::info!("Book reader app initialized");
    });

    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn Layout() -> Element {
    // Use asset!() macro to ensure CSS is bundled and served correctly
    const BUNDLE_CSS: Asset = asset!("/assets/dist/bundle.css");

    // One reload stream per page load; routed children read the generation
    // counter through context
    let reload_generation = use_live_reload();
    use_context_provider(|| reload_generation);

    // Re-fetched on reload so title/theme edits in book.toml show up
    let book_resource = use_server_future(move || {
        let _generation = reload_generation();
        async move { get_book().await }
    })?;

    rsx! {
        document::Link {
            rel: "stylesheet",
            href: BUNDLE_CSS
        },
        // Load WASM bundle for client-side hydration
        document::Script {
            src: "/wasm/markdown-book-reader.js",
            r#type: "module"
        },
        match &*book_resource.read() {
            Some(Ok(book)) => rsx! {
                BookShell { book: book.clone() }
            },
            Some(Err(e)) => rsx! {
                div { class: "c-layout",
                    ErrorMessage { message: "Failed to open book: {e}" }
                }
            },
            None => rsx! {
                div { class: "c-layout",
                    LoadingText { message: "Opening book..." }
                }
            },
        }
    }
}

/// Application frame around the routed chapter pages: navbar on top,
/// sidebar on the left, chapter content in the outlet.
#[component]
fn BookShell(book: BookResponse) -> Element {
    // The book's configured theme is only a vote; a saved reader
    // preference wins inside use_theme
    let book_theme = book
        .default_theme
        .as_deref()
        .and_then(|name| name.parse::<Theme>().ok());
    let theme = use_theme(book_theme);
    let sidebar_visible = use_sidebar_visible();

    // Context holds a signal, not a value, so children see meta changes
    // after a reload
    let mut shared_book = use_signal(|| book.clone());
    if shared_book() != book {
        shared_book.set(book.clone());
    }
    use_context_provider(|| shared_book);

    let shell_class = if sidebar_visible() {
        "c-layout"
    } else {
        "c-layout c-layout--sidebar-hidden"
    };

    rsx! {
        div { class: "{shell_class}",
            AppNavbar {
                title: book.title.clone(),
                theme,
                sidebar_visible,
            }

            div { class: "c-layout__body",
                BookSidebar {}

                main { class: "c-layout__main", id: "content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn Root() -> Element {
    rsx! {
        ChapterView { path: String::new() }
    }
}

#[component]
fn Chapter(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        ChapterView { path }
    }
}
