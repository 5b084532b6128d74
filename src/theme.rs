use crate::storage::{BrowserStorage, KeyValueStore, THEME_KEY};
use log::warn;
use web_sys::window;
use yew::prelude::*;

const LIGHT_CLASS: &str = "theme-light";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Anything other than an explicit "light" is the dark default.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon for the toggle button: it shows the theme a click switches to.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

pub fn stored_theme(store: &impl KeyValueStore) -> Theme {
    Theme::from_stored(store.get(THEME_KEY).as_deref())
}

/// Flips `current`, persists the result and returns it.
pub fn toggle_theme(store: &impl KeyValueStore, current: Theme) -> Theme {
    let next = current.toggled();
    store.set(THEME_KEY, next.as_str());
    next
}

fn apply_to_body(theme: Theme) {
    let Some(body) = window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };

    if let Err(err) = body
        .class_list()
        .toggle_with_force(LIGHT_CLASS, theme == Theme::Light)
    {
        warn!("Could not apply theme class: {:?}", err);
    }
}

/// Applies the persisted preference to the page body.
pub fn apply_stored_theme() -> Theme {
    let theme = stored_theme(&BrowserStorage);
    apply_to_body(theme);
    theme
}

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let theme = use_state(|| stored_theme(&BrowserStorage));

    let onclick = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            let next = toggle_theme(&BrowserStorage, *theme);
            apply_to_body(next);
            theme.set(next);
        })
    };

    html! {
        <button class="theme-toggle" title="Toggle theme" {onclick}>{ theme.icon() }</button>
    }
}
