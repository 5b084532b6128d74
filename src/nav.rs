//! Links between the static pages and the home page's plain buttons.

use crate::toast::Toaster;
use gloo_events::EventListener;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement};

pub const FEED_PAGE: &str = "feed.html";
pub const CHATS_PAGE: &str = "chats.html";
pub const ACCOUNT_PAGE: &str = "account.html";

const SELECTED_COURT_CLASS: &str = "selected";

pub fn navigate(page: &str) {
    let Some(window) = window() else {
        return;
    };
    if let Err(err) = window.location().set_href(page) {
        warn!("Navigation to {} failed: {:?}", page, err);
    }
}

fn on_click(target: &Element, handler: impl FnMut(&web_sys::Event) + 'static) {
    EventListener::new(target, "click", handler).forget();
}

fn elements(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Hero call-to-action buttons.
fn wire_hero_buttons(document: &Document) {
    for (id, page) in [("ctaExplore", FEED_PAGE), ("ctaAccount", ACCOUNT_PAGE)] {
        if let Some(button) = document.get_element_by_id(id) {
            on_click(&button, move |_| navigate(page));
        }
    }
}

/// Cards marked `.card.clickable` navigate to their `data-link`.
fn wire_clickable_cards(document: &Document) {
    for card in elements(document, ".card.clickable") {
        let Some(link) = card.get_attribute("data-link") else {
            continue;
        };
        on_click(&card, move |_| navigate(&link));
    }
}

/// Home court picker: one `.court-item` is highlighted at a time.
fn wire_court_picker(document: &Document, toaster: &Toaster) {
    let courts = elements(document, ".court-item[data-court]");
    for court in &courts {
        let Some(name) = court.get_attribute("data-court") else {
            continue;
        };
        let chosen = court.clone();
        let all = courts.clone();
        let toaster = toaster.clone();
        on_click(court, move |_| {
            for other in &all {
                if let Err(err) = other.class_list().remove_1(SELECTED_COURT_CLASS) {
                    warn!("Could not clear court selection: {:?}", err);
                }
            }
            if let Err(err) = chosen.class_list().add_1(SELECTED_COURT_CLASS) {
                warn!("Could not mark home court: {:?}", err);
            }
            toaster.notify(&home_court_message(&name));
        });
    }
}

pub fn home_court_message(name: &str) -> String {
    format!("Home court set to: {}", name)
}

pub fn wire_page_chrome(toaster: &Toaster) {
    let Some(document) = window().and_then(|window| window.document()) else {
        return;
    };
    wire_hero_buttons(&document);
    wire_clickable_cards(&document);
    wire_court_picker(&document, toaster);
}

/// Host element for a mounted view, if this page has one.
pub fn mount_point(id: &str) -> Option<Element> {
    window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
        .filter(|element| element.dyn_ref::<HtmlElement>().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn court_message() {
        assert_eq!(
            home_court_message("Lincoln Courts"),
            "Home court set to: Lincoln Courts"
        );
    }
}
