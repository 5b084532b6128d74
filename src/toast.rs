use gloo_timers::callback::Timeout;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlElement};

pub const TOAST_ELEMENT_ID: &str = "toast";
const HIDDEN_CLASS: &str = "hidden";

/// Visibility bookkeeping for the single status region. Every `show` issues
/// a new ticket; only the latest ticket may hide the toast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastState {
    message: String,
    visible: bool,
    ticket: u64,
}

impl ToastState {
    pub fn show(&mut self, message: &str) -> u64 {
        self.ticket += 1;
        self.message = message.to_string();
        self.visible = true;
        self.ticket
    }

    /// Returns true when the toast was hidden by this call.
    pub fn expire(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

struct ToasterInner {
    element: Option<HtmlElement>,
    state: ToastState,
    delay_ms: u32,
    pending_hide: Option<Timeout>,
}

/// Shared handle to the page's toast region. Cloning shares the region and
/// its pending hide timer.
#[derive(Clone)]
pub struct Toaster {
    inner: Rc<RefCell<ToasterInner>>,
}

impl PartialEq for Toaster {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Toaster {
    /// Binds to `#toast` if the page has one; otherwise every notify is a no-op.
    pub fn attach(delay_ms: u32) -> Self {
        let element = window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(TOAST_ELEMENT_ID))
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());

        Self {
            inner: Rc::new(RefCell::new(ToasterInner {
                element,
                state: ToastState::default(),
                delay_ms,
                pending_hide: None,
            })),
        }
    }

    pub fn notify(&self, message: &str) {
        let mut inner = self.inner.borrow_mut();
        let Some(element) = inner.element.clone() else {
            debug!("No toast region on this page, dropping '{}'", message);
            return;
        };

        let ticket = inner.state.show(message);
        element.set_text_content(Some(message));
        if let Err(err) = element.class_list().remove_1(HIDDEN_CLASS) {
            warn!("Could not reveal toast: {:?}", err);
        }

        let weak: Weak<RefCell<ToasterInner>> = Rc::downgrade(&self.inner);
        let delay_ms = inner.delay_ms;
        // Replacing the handle cancels the previous hide.
        inner.pending_hide = Some(Timeout::new(delay_ms, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut inner = inner.borrow_mut();
            if inner.state.expire(ticket) {
                if let Some(element) = &inner.element {
                    if let Err(err) = element.class_list().add_1(HIDDEN_CLASS) {
                        warn!("Could not hide toast: {:?}", err);
                    }
                }
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_call_wins() {
        let mut state = ToastState::default();
        let first = state.show("Post created successfully!");
        let second = state.show("Notifications disabled");

        assert!(!state.expire(first));
        assert!(state.is_visible());
        assert_eq!(state.message(), "Notifications disabled");

        assert!(state.expire(second));
        assert!(!state.is_visible());
    }

    #[test]
    fn expire_is_idempotent() {
        let mut state = ToastState::default();
        let ticket = state.show("Message");
        assert!(state.expire(ticket));
        assert!(!state.expire(ticket));
    }
}
