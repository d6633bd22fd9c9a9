//! Chapter content pane
//!
//! Fetches the rendered chapter for the current route and re-fetches when
//! the live reload generation advances. Footer links and arrow-key
//! shortcuts walk the reading order of the contents tree.

use dioxus::document;
use dioxus::prelude::*;
use keyboard_types::Modifiers;

use crate::app::components::{ChapterLoading, EmptyState, ErrorMessage};
use crate::app::pages::book_routes::Route;
use crate::domain::models::ChapterRef;
use crate::server_fns::{get_chapter, get_toc, BookResponse};

#[component]
pub fn ChapterView(path: String) -> Element {
    let book = use_context::<Signal<BookResponse>>();
    let reload_generation = use_context::<Signal<u64>>();

    // Props are not reactive; mirror the route path into a signal so the
    // resources below re-run on navigation
    let mut current_path = use_signal(|| path.clone());
    if current_path() != path {
        current_path.set(path.clone());
    }

    // Runs after a chapter lands in the DOM: a URL fragment scrolls to
    // its anchor, anything else resets the content scroll. Keyed on the
    // rendered page, not the route, so a live reload of the same page
    // leaves the scroll where it was.
    let mut rendered_page = use_signal(|| None::<String>);
    use_effect(move || {
        if rendered_page().is_none() {
            return;
        }
        spawn(async move {
            let _ = document::eval(
                r#"
                const hash = window.location.hash;
                if (hash.length > 1) {
                    const target = document.getElementById(decodeURIComponent(hash.slice(1)));
                    if (target) { target.scrollIntoView(); return; }
                }
                const content = document.getElementById('content');
                if (content) content.scrollTop = 0;
                "#,
            )
            .await;
        });
    });

    let chapter_resource = use_server_future(move || {
        let page = current_path();
        let _generation = reload_generation();
        async move { get_chapter(page).await }
    })?;

    let toc_resource = use_server_future(move || {
        let _generation = reload_generation();
        async move { get_toc().await }
    })?;

    let chapter_state = chapter_resource.read().clone();
    let toc_state = toc_resource.read().clone();

    if let Some(Ok(Some(chapter))) = &chapter_state {
        if rendered_page().as_deref() != Some(chapter.path.as_str()) {
            rendered_page.set(Some(chapter.path.clone()));
        }
    }

    // Neighbors come from the resolved chapter path, so the root alias
    // gets the same footer links as the first chapter proper
    let (prev_link, next_link) = match (&chapter_state, &toc_state) {
        (Some(Ok(Some(chapter))), Some(Ok(contents))) => {
            let (prev, next) = contents.toc.neighbors(&chapter.path);
            (neighbor_link(prev), neighbor_link(next))
        }
        _ => (None, None),
    };

    let prev_for_keys = prev_link.clone();
    let next_for_keys = next_link.clone();

    let title = match &chapter_state {
        Some(Ok(Some(chapter))) => format!("{} - {}", chapter.title, book.read().title),
        _ => book.read().title.clone(),
    };

    rsx! {
        document::Title { "{title}" }
        div {
            class: "c-chapter-page",
            tabindex: "0",
            onkeydown: move |evt| {
                // Alt/Ctrl/Meta combinations belong to the browser
                if evt
                    .modifiers()
                    .intersects(Modifiers::ALT | Modifiers::CONTROL | Modifiers::META)
                {
                    return;
                }
                match evt.key() {
                    Key::ArrowLeft => {
                        if let Some((route, _)) = &prev_for_keys {
                            navigator().push(route.clone());
                        }
                    }
                    Key::ArrowRight => {
                        if let Some((route, _)) = &next_for_keys {
                            navigator().push(route.clone());
                        }
                    }
                    _ => {}
                }
            },

            match &chapter_state {
                Some(Ok(Some(chapter))) => rsx! {
                    article { class: "c-chapter", dangerous_inner_html: "{chapter.html}" }
                },
                Some(Ok(None)) => rsx! {
                    EmptyState {
                        icon: "📄",
                        title: "Chapter not found",
                        description: "No chapter matches this address. It may have been renamed or removed.",
                    }
                },
                Some(Err(e)) => rsx! {
                    ErrorMessage { message: "Failed to load chapter: {e}" }
                },
                None => rsx! {
                    ChapterLoading {}
                },
            }

            nav { class: "c-chapter-nav",
                if let Some((route, label)) = prev_link.clone() {
                    Link {
                        to: route,
                        rel: "prev",
                        class: "c-chapter-nav__prev",
                        "← {label}"
                    }
                }
                if let Some((route, label)) = next_link.clone() {
                    Link {
                        to: route,
                        rel: "next",
                        class: "c-chapter-nav__next",
                        "{label} →"
                    }
                }
            }
        }
    }
}

fn neighbor_link(entry: Option<ChapterRef>) -> Option<(Route, String)> {
    let entry = entry?;
    Some((Route::for_page(&entry.path), entry.title))
}
