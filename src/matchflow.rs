use crate::nav::{navigate, CHATS_PAGE};
use crate::storage::{set_pending_chat, BrowserStorage, KeyValueStore, NEW_MATCH_CHAT_ID};
use crate::ViewProps;
use gloo_timers::callback::Timeout;
use log::debug;
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

const SKILL_LEVELS: [&str; 5] = ["2.5", "3.0", "3.5", "4.0", "4.5+"];
const RADII: [&str; 3] = ["5", "10", "25"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStep {
    Form,
    Searching,
    Result,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriteria {
    pub skill: String,
    pub radius: String,
}

impl MatchCriteria {
    pub fn searching_message(&self) -> String {
        format!(
            "Searching for {} matches within {}mi...",
            self.skill, self.radius
        )
    }
}

/// State of the match-finding modal. `search` is bumped whenever a pending
/// search must stop counting: a new submit, a close, or a re-open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFlow {
    open: bool,
    step: MatchStep,
    search: u64,
    criteria: Option<MatchCriteria>,
}

impl Default for MatchFlow {
    fn default() -> Self {
        Self {
            open: false,
            step: MatchStep::Form,
            search: 0,
            criteria: None,
        }
    }
}

pub enum MatchAction {
    Open,
    Submit(MatchCriteria),
    SearchFinished(u64),
    Close,
}

impl MatchFlow {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn step(&self) -> MatchStep {
        self.step
    }

    pub fn criteria(&self) -> Option<&MatchCriteria> {
        self.criteria.as_ref()
    }

    /// Shows the modal at the form step, whatever happened last time.
    pub fn open(&mut self) {
        self.open = true;
        self.step = MatchStep::Form;
        self.search += 1;
        self.criteria = None;
    }

    /// Starts a search and returns its ticket.
    pub fn submit(&mut self, criteria: MatchCriteria) -> Option<u64> {
        if !self.open || self.step != MatchStep::Form {
            return None;
        }
        self.step = MatchStep::Searching;
        self.search += 1;
        self.criteria = Some(criteria);
        Some(self.search)
    }

    /// Moves to the result step if `ticket` is still the live search.
    pub fn finish_search(&mut self, ticket: u64) -> bool {
        if !self.open || self.step != MatchStep::Searching || ticket != self.search {
            return false;
        }
        self.step = MatchStep::Result;
        true
    }

    /// Hides the modal and abandons any pending search. The step is kept
    /// until the next `open`.
    pub fn close(&mut self) {
        self.open = false;
        self.search += 1;
    }

    /// Ticket of the search the modal is waiting on, if any.
    pub fn pending_search(&self) -> Option<u64> {
        (self.open && self.step == MatchStep::Searching).then_some(self.search)
    }

    /// Hands the new match conversation to the chat page. Returns the page to
    /// navigate to, or `None` when there is no result to confirm.
    pub fn confirm(&self, store: &impl KeyValueStore) -> Option<&'static str> {
        if !self.open || self.step != MatchStep::Result {
            return None;
        }
        set_pending_chat(store, NEW_MATCH_CHAT_ID);
        Some(CHATS_PAGE)
    }
}

impl Reducible for MatchFlow {
    type Action = MatchAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            MatchAction::Open => next.open(),
            MatchAction::Submit(criteria) => {
                next.submit(criteria);
            }
            MatchAction::SearchFinished(ticket) => {
                if !next.finish_search(ticket) {
                    debug!("Ignoring stale search {}", ticket);
                    return self;
                }
            }
            MatchAction::Close => next.close(),
        }
        next.into()
    }
}

#[function_component(MatchFinder)]
pub fn match_finder(props: &ViewProps) -> Html {
    let flow = use_reducer(MatchFlow::default);
    let skill = use_state(|| "3.5".to_string());
    let radius = use_state(|| "10".to_string());

    {
        let dispatcher = flow.dispatcher();
        let delay_ms = props.config.search_delay_ms;

        // Dropping the timeout on cleanup cancels it, so leaving the
        // searching step any other way discards the pending result.
        use_effect_with_deps(
            move |pending: &Option<u64>| {
                let timer = pending.map(|ticket| {
                    Timeout::new(delay_ms, move || {
                        dispatcher.dispatch(MatchAction::SearchFinished(ticket));
                    })
                });
                move || drop(timer)
            },
            flow.pending_search(),
        );
    }

    let on_open = {
        let flow = flow.clone();
        Callback::from(move |_: MouseEvent| flow.dispatch(MatchAction::Open))
    };

    let on_close = {
        let flow = flow.clone();
        Callback::from(move |_: MouseEvent| flow.dispatch(MatchAction::Close))
    };

    let stop_click = Callback::from(|event: MouseEvent| event.stop_propagation());

    let on_skill = {
        let skill = skill.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            skill.set(select.value());
        })
    };

    let on_radius = {
        let radius = radius.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            radius.set(select.value());
        })
    };

    let on_submit = {
        let flow = flow.clone();
        let skill = skill.clone();
        let radius = radius.clone();
        let toaster = props.toaster.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let criteria = MatchCriteria {
                skill: (*skill).clone(),
                radius: (*radius).clone(),
            };
            toaster.notify(&criteria.searching_message());
            flow.dispatch(MatchAction::Submit(criteria));
        })
    };

    let on_confirm = {
        let flow = flow.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(page) = flow.confirm(&BrowserStorage) {
                flow.dispatch(MatchAction::Close);
                navigate(page);
            }
        })
    };

    let step = match flow.step() {
        MatchStep::Form => html! {
            <form class="match-form" onsubmit={on_submit}>
                <label>
                    { "Skill level" }
                    <select name="skill" required={true} onchange={on_skill}>
                        { for SKILL_LEVELS.iter().map(|level| html! {
                            <option value={*level} selected={*level == skill.as_str()}>{ *level }</option>
                        }) }
                    </select>
                </label>
                <label>
                    { "Search radius (miles)" }
                    <select name="radius" required={true} onchange={on_radius}>
                        { for RADII.iter().map(|miles| html! {
                            <option value={*miles} selected={*miles == radius.as_str()}>{ *miles }</option>
                        }) }
                    </select>
                </label>
                <button type="submit" class="primary-btn">{ "Find Match" }</button>
            </form>
        },
        MatchStep::Searching => html! {
            <div class="match-searching">
                <div class="spinner"></div>
                <p>{ "Searching for players near you…" }</p>
            </div>
        },
        MatchStep::Result => html! {
            <div class="match-result">
                <h3>{ "Match found! 🎉" }</h3>
                <p class="match-name">{ "Sarah J." }</p>
                <p class="match-meta">{ "Rating 3.4 • Lincoln Park • 6pm" }</p>
                <button class="primary-btn" onclick={on_confirm}>{ "Accept & Chat" }</button>
            </div>
        },
    };

    html! {
        <>
            <button class="primary-btn join-btn" onclick={on_open}>{ "Find a Match" }</button>
            <div class={classes!("modal", (!flow.is_open()).then_some("hidden"))} onclick={on_close.clone()}>
                <div class="modal-content" onclick={stop_click}>
                    <button class="modal-close" onclick={on_close}>{ "×" }</button>
                    { step }
                </div>
            </div>
        </>
    }
}
