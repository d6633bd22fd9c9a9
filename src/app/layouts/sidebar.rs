//! Navigation sidebar
//!
//! Renders the book's table of contents as a collapsible tree. The active
//! chapter is derived from the current route, its ancestor sections are
//! held open, and manual toggles override the fold defaults for the rest
//! of the visit. Scroll position survives full page loads through the
//! sessionStorage slot consumed by `use_sidebar_scroll`.

use dioxus::prelude::*;

use crate::app::pages::book_routes::Route;
use crate::domain::models::{is_ancestor, EntryPath, FoldConfig, SidebarState, TocEntry, TocItem};
use crate::server_fns::get_toc;
use crate::shared::constants::SIDEBAR_ID;
use crate::shared::hooks::{persist_sidebar_scroll, use_sidebar_scroll};

#[component]
pub fn BookSidebar() -> Element {
    let reload_generation = use_context::<Signal<u64>>();
    let mut filter = use_signal(String::new);
    // Manual toggle state, keyed by tree address
    let mut expansion = use_signal(SidebarState::new);

    // A source reload can reshape the tree; stale toggles would point at
    // the wrong addresses
    use_effect(move || {
        let _generation = reload_generation();
        expansion.write().reset();
    });

    use_sidebar_scroll();

    let route = use_route::<Route>();
    let current_page = route.page_path();

    let toc_resource = use_server_future(move || {
        let _generation = reload_generation();
        async move { get_toc().await }
    })?;

    rsx! {
        aside { id: SIDEBAR_ID, class: "c-sidebar",
            div { class: "c-sidebar__search",
                input {
                    r#type: "text",
                    class: "c-sidebar__search-input",
                    placeholder: "Filter chapters...",
                    value: filter(),
                    oninput: move |evt| filter.set(evt.value()),
                }
            }

            nav { class: "c-sidebar__nav", aria_label: "Table of contents",
                match &*toc_resource.read() {
                    Some(Ok(response)) => {
                        let active = response.toc.active_entry(&current_page);
                        let query = filter().trim().to_lowercase();
                        rsx! {
                            ol { class: "chapter",
                                TocLevel {
                                    items: response.toc.items.clone(),
                                    prefix: EntryPath::new(),
                                    depth: 0,
                                    active,
                                    fold: response.fold,
                                    query,
                                    expansion,
                                }
                            }
                        }
                    }
                    Some(Err(e)) => rsx! {
                        div { class: "c-sidebar__error", "Failed to load contents: {e}" }
                    },
                    None => rsx! {
                        div { class: "c-sidebar__loading", "Loading..." }
                    },
                }
            }
        }
    }
}

/// One nesting level of the contents tree.
///
/// Part titles and separators only ever occur at the top level but are
/// handled uniformly. While a filter query is active they are hidden and
/// only chapters whose subtree matches remain.
#[component]
fn TocLevel(
    items: Vec<TocItem>,
    prefix: EntryPath,
    depth: usize,
    active: Option<EntryPath>,
    fold: FoldConfig,
    query: String,
    expansion: Signal<SidebarState>,
) -> Element {
    let filtering = !query.is_empty();

    rsx! {
        {items.iter().enumerate().map(|(idx, item)| {
            let mut address = prefix.clone();
            address.push(idx);
            match item {
                TocItem::Chapter(entry) if !filtering || subtree_matches(entry, &query) => rsx! {
                    ChapterNode {
                        key: "{address:?}",
                        entry: entry.clone(),
                        address: address.clone(),
                        depth,
                        active: active.clone(),
                        fold,
                        query: query.clone(),
                        expansion,
                    }
                },
                TocItem::PartTitle(title) if !filtering => rsx! {
                    li { key: "{address:?}", class: "part-title", "{title}" }
                },
                TocItem::Separator if !filtering => rsx! {
                    li { key: "{address:?}", class: "spacer" }
                },
                _ => rsx! {},
            }
        })}
    }
}

#[component]
fn ChapterNode(
    entry: TocEntry,
    address: EntryPath,
    depth: usize,
    active: Option<EntryPath>,
    fold: FoldConfig,
    query: String,
    expansion: Signal<SidebarState>,
) -> Element {
    let is_active = active.as_ref() == Some(&address);
    let on_active_chain = active
        .as_ref()
        .is_some_and(|a| *a == address || is_ancestor(&address, a));

    // Baseline before user toggles; filtering opens every surviving
    // subtree so matches are visible
    let base = on_active_chain || fold.default_expanded(depth);
    let filtering = !query.is_empty();
    let has_children = entry.has_children();
    let expanded = has_children && (filtering || expansion.read().is_expanded(&address, base));

    let mut li_class = String::from("chapter-item");
    if has_children && expanded {
        li_class.push_str(" expanded");
    }
    if entry.is_affix() {
        li_class.push_str(" affix");
    }

    let link_class = if is_active { "active" } else { "" };
    let number = entry.number.clone();
    let address_for_toggle = address.clone();
    let mut expansion_for_toggle = expansion;

    rsx! {
        li { class: "{li_class}",
            if let Some(path) = entry.path.clone() {
                Link {
                    to: Route::for_page(&path),
                    class: "{link_class}",
                    onclick: move |_| persist_sidebar_scroll(),
                    if let Some(number) = number.clone() {
                        strong { aria_hidden: "true", "{number}" }
                        " "
                    }
                    "{entry.title}"
                }
            } else {
                // Draft chapter: listed but not navigable
                div {
                    if let Some(number) = number.clone() {
                        strong { aria_hidden: "true", "{number}" }
                        " "
                    }
                    "{entry.title}"
                }
            }

            if has_children {
                a {
                    class: "toggle",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        expansion_for_toggle
                            .write()
                            .toggle(address_for_toggle.clone(), base);
                    },
                    div { "❱" }
                }
            }

            if has_children && expanded {
                ol { class: "section",
                    TocLevel {
                        items: entry.nested.clone(),
                        prefix: address.clone(),
                        depth: depth + 1,
                        active: active.clone(),
                        fold,
                        query: query.clone(),
                        expansion,
                    }
                }
            }
        }
    }
}

/// True when the entry or any nested chapter title contains the query
fn subtree_matches(entry: &TocEntry, query: &str) -> bool {
    if entry.title.to_lowercase().contains(query) {
        return true;
    }
    entry.nested.iter().any(|item| match item {
        TocItem::Chapter(child) => subtree_matches(child, query),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtree_match_descends() {
        let mut parent = TocEntry::new("Guide", Some("guide/index.html".into()));
        parent.nested.push(TocItem::Chapter(TocEntry::new(
            "Installation",
            Some("guide/installation.html".into()),
        )));

        assert!(subtree_matches(&parent, "guide"));
        assert!(subtree_matches(&parent, "install"));
        assert!(!subtree_matches(&parent, "deploy"));
    }
}
