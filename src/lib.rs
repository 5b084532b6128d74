pub mod account;
pub mod chat;
pub mod config;
pub mod data;
pub mod fallback;
pub mod feed;
pub mod matchflow;
pub mod nav;
pub mod storage;
pub mod theme;
pub mod toast;

use account::AccountView;
use chat::ChatView;
use config::AppConfig;
use feed::FeedView;
use log::{debug, info};
use matchflow::MatchFinder;
use nav::{mount_point, wire_page_chrome};
use std::rc::Rc;
use theme::{apply_stored_theme, ThemeToggle};
use toast::Toaster;
use wasm_bindgen::prelude::wasm_bindgen;
use yew::html::BaseComponent;
use yew::prelude::*;

const THEME_TOGGLE_ROOT: &str = "theme-toggle";
const MATCH_FINDER_ROOT: &str = "match-finder";
const FEED_ROOT: &str = "posts-container";
const CHATS_ROOT: &str = "chats";
const ACCOUNT_ROOT: &str = "settingList";

/// Props handed to every page view.
#[derive(Properties, Clone, PartialEq)]
pub struct ViewProps {
    pub config: Rc<AppConfig>,
    pub toaster: Toaster,
}

fn mount<C>(root_id: &str, props: &ViewProps)
where
    C: BaseComponent<Properties = ViewProps>,
{
    match mount_point(root_id) {
        Some(root) => {
            debug!("Mounting view on #{}", root_id);
            yew::Renderer::<C>::with_root_and_props(root, props.clone()).render();
        }
        None => debug!("No #{} on this page", root_id),
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let theme = apply_stored_theme();
    info!("Applied {} theme", theme.as_str());

    let config = Rc::new(AppConfig::from_document());
    let props = ViewProps {
        toaster: Toaster::attach(config.toast_delay_ms),
        config,
    };

    if let Some(root) = mount_point(THEME_TOGGLE_ROOT) {
        yew::Renderer::<ThemeToggle>::with_root(root).render();
    }
    mount::<MatchFinder>(MATCH_FINDER_ROOT, &props);
    mount::<FeedView>(FEED_ROOT, &props);
    mount::<ChatView>(CHATS_ROOT, &props);
    mount::<AccountView>(ACCOUNT_ROOT, &props);

    wire_page_chrome(&props.toaster);
}
