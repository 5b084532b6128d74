use crate::data::{fetch_chats, resolve_load, Chat, Id, Message, Sender};
use crate::storage::{take_pending_chat, BrowserStorage, KeyValueStore, NEW_MATCH_CHAT_ID};
use crate::ViewProps;
use log::{debug, info};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};
use yew::prelude::*;

/// Loaded conversations plus the one currently open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSession {
    chats: Vec<Chat>,
    active: Option<usize>,
}

impl ChatSession {
    pub fn new(chats: Vec<Chat>) -> Self {
        Self {
            chats,
            active: None,
        }
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn active(&self) -> Option<&Chat> {
        self.active.and_then(|index| self.chats.get(index))
    }

    pub fn is_active(&self, id: &Id) -> bool {
        self.active().map_or(false, |chat| &chat.id == id)
    }

    /// Makes `id` the only active chat. Unknown ids leave the selection as is.
    pub fn select(&mut self, id: &Id) -> bool {
        match self.chats.iter().position(|chat| &chat.id == id) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    /// Appends a message from the current user to the active chat.
    pub fn send(&mut self, text: &str) -> Option<&Message> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let chat = self.chats.get_mut(self.active?)?;
        chat.messages.push(Message {
            from: Sender::Me,
            text: text.to_string(),
        });
        chat.messages.last()
    }

    /// Title and message-count line for the open chat.
    pub fn summary(&self) -> Option<(String, String)> {
        self.active()
            .map(|chat| (chat.name.clone(), format!("{} message(s)", chat.messages.len())))
    }

    /// Consumes a pending handoff and opens that chat. A new match missing
    /// from the loaded list is taken from `seeded` and put at the top.
    /// The handoff is cleared either way.
    pub fn open_pending(&mut self, store: &impl KeyValueStore, seeded: &[Chat]) -> Option<Id> {
        let pending = Id::from(take_pending_chat(store)?);
        if pending.as_str() == NEW_MATCH_CHAT_ID
            && !self.chats.iter().any(|chat| chat.id == pending)
        {
            if let Some(chat) = seeded.iter().find(|chat| chat.id == pending) {
                self.chats.insert(0, chat.clone());
                self.active = self.active.map(|index| index + 1);
            }
        }
        if self.select(&pending) {
            info!("Opened chat {} from handoff", pending);
            Some(pending)
        } else {
            debug!("Handoff chat {} is not in the loaded list", pending);
            None
        }
    }
}

pub fn is_new_match(chat: &Chat) -> bool {
    chat.id.as_str() == NEW_MATCH_CHAT_ID
}

#[function_component(ChatView)]
pub fn chat_view(props: &ViewProps) -> Html {
    let session = use_state(|| None::<ChatSession>);
    let draft = use_state(String::new);
    let transcript_ref = use_node_ref();

    {
        let session = session.clone();
        let config = props.config.clone();

        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let outcome = match config.chats_url() {
                        Some(url) => Some(fetch_chats(&url).await),
                        None => None,
                    };
                    let chats = resolve_load("chats", outcome, &config.fallback.chats);
                    let mut loaded = ChatSession::new(chats);
                    loaded.open_pending(&BrowserStorage, &config.fallback.chats);
                    session.set(Some(loaded));
                });

                || ()
            },
            (),
        );
    }

    {
        let transcript_ref = transcript_ref.clone();
        let shown = (*session).as_ref().and_then(|session| {
            session
                .active()
                .map(|chat| (chat.id.clone(), chat.messages.len()))
        });

        use_effect_with_deps(
            move |_| {
                if let Some(transcript) = transcript_ref.cast::<Element>() {
                    transcript.set_scroll_top(transcript.scroll_height());
                }
                || ()
            },
            shown,
        );
    }

    let on_select = {
        let session = session.clone();
        Callback::from(move |id: Id| {
            let Some(mut next) = (*session).clone() else {
                return;
            };
            if next.select(&id) {
                session.set(Some(next));
            }
        })
    };

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            draft.set(input.value());
        })
    };

    let on_submit = {
        let session = session.clone();
        let draft = draft.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(mut next) = (*session).clone() else {
                return;
            };
            if next.send(&draft).is_none() {
                return;
            }
            session.set(Some(next));
            draft.set(String::new());
        })
    };

    let Some(current) = (*session).as_ref() else {
        return html! { <p class="chat-placeholder">{ "Loading chats…" }</p> };
    };

    let (title, meta) = current
        .summary()
        .unwrap_or_else(|| ("Select a chat".to_string(), String::new()));
    let has_active = current.active().is_some();
    let messages = current
        .active()
        .map(|chat| chat.messages.as_slice())
        .unwrap_or_default();

    html! {
        <div class="chat-layout">
            <ul class="chat-list">
                { for current.chats().iter().map(|chat| render_chat_item(chat, current.is_active(&chat.id), &on_select)) }
            </ul>
            <section class="chat-panel">
                <header class="chat-header">
                    <h2 class="chat-title">{ title }</h2>
                    <span class="chat-meta">{ meta }</span>
                </header>
                <div class="chat-messages" ref={transcript_ref}>
                    { for messages.iter().map(render_message) }
                </div>
                <form class="chat-form" onsubmit={on_submit}>
                    <input
                        class="chat-input"
                        placeholder="Type a message…"
                        value={(*draft).clone()}
                        oninput={on_input}
                        disabled={!has_active}
                    />
                    <button type="submit" disabled={!has_active}>{ "Send" }</button>
                </form>
            </section>
        </div>
    }
}

fn render_chat_item(chat: &Chat, active: bool, on_select: &Callback<Id>) -> Html {
    let onclick = {
        let on_select = on_select.clone();
        let id = chat.id.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
    };
    let badge = if is_new_match(chat) { " ✨" } else { "" };

    html! {
        <li class={classes!("chat-item", active.then_some("active"))} key={chat.id.to_string()} {onclick}>
            <strong>{ format!("{}{}", chat.name, badge) }</strong>
            <small>{ format!("{} • {}", chat.last_message, chat.timestamp) }</small>
        </li>
    }
}

fn render_message(message: &Message) -> Html {
    html! {
        <div class={classes!("chat-message", message.from.css_class())}>{ &message.text }</div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::sample_chats;
    use crate::storage::{set_pending_chat, MemoryStorage, PENDING_CHAT_KEY};

    fn texts(chat: &Chat) -> Vec<&str> {
        chat.messages.iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn selection_is_exclusive() {
        let mut session = ChatSession::new(sample_chats());
        let crew = Id::from(1u64);
        let captain = Id::from(2u64);

        assert!(session.select(&crew));
        assert!(session.select(&captain));

        assert!(!session.is_active(&crew));
        assert!(session.is_active(&captain));
        let active = session.active().unwrap();
        assert_eq!(texts(active), ["You’re playing court 3 this week."]);
        assert_eq!(
            session.summary(),
            Some(("League Captain".to_string(), "1 message(s)".to_string()))
        );
    }

    #[test]
    fn unknown_selection_keeps_current() {
        let mut session = ChatSession::new(sample_chats());
        session.select(&Id::from(1u64));
        assert!(!session.select(&Id::from("nope")));
        assert_eq!(session.active().unwrap().name, "Doubles Crew");
    }

    #[test]
    fn send_appends_to_active_chat_only() {
        let mut session = ChatSession::new(sample_chats());
        session.select(&Id::from(1u64));

        let sent = session.send("See you at 6").cloned();
        assert_eq!(
            sent,
            Some(Message {
                from: Sender::Me,
                text: "See you at 6".to_string(),
            })
        );

        let chats = session.chats();
        assert_eq!(
            texts(&chats[1]),
            ["You free around 6?", "Yep, let's do it.", "See you at 6"]
        );
        assert_eq!(chats[0].messages.len(), 2);
        assert_eq!(chats[2].messages.len(), 1);
        assert_eq!(session.summary().unwrap().1, "3 message(s)");
    }

    #[test]
    fn send_requires_active_chat_and_text() {
        let mut session = ChatSession::new(sample_chats());
        assert!(session.send("hello").is_none());

        session.select(&Id::from(2u64));
        assert!(session.send("   ").is_none());
        assert_eq!(session.active().unwrap().messages.len(), 1);
    }

    #[test]
    fn handoff_opens_match_chat_once() {
        let store = MemoryStorage::new();
        set_pending_chat(&store, NEW_MATCH_CHAT_ID);

        let mut first = ChatSession::new(sample_chats());
        assert_eq!(
            first.open_pending(&store, &sample_chats()),
            Some(Id::from(NEW_MATCH_CHAT_ID))
        );
        assert!(is_new_match(first.active().unwrap()));
        assert_eq!(store.get(PENDING_CHAT_KEY), None);

        let mut second = ChatSession::new(sample_chats());
        assert_eq!(second.open_pending(&store, &sample_chats()), None);
        assert!(second.active().is_none());
    }

    #[test]
    fn numeric_handoff_matches_numeric_id() {
        let store = MemoryStorage::new();
        set_pending_chat(&store, "2");

        let mut session = ChatSession::new(sample_chats());
        assert_eq!(session.open_pending(&store, &sample_chats()), Some(Id::from(2u64)));
    }

    #[test]
    fn handoff_for_missing_chat_is_dropped() {
        let store = MemoryStorage::new();
        set_pending_chat(&store, "archived");

        let mut session = ChatSession::new(sample_chats());
        assert_eq!(session.open_pending(&store, &sample_chats()), None);
        assert!(session.active().is_none());
        assert_eq!(store.get(PENDING_CHAT_KEY), None);
    }

    #[test]
    fn handoff_seeds_match_chat_into_remote_list() {
        let remote: Vec<Chat> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Doubles Crew", "lastMessage": "Same time Thursday?",
                 "timestamp": "3m ago", "messages": [{"from": "them", "text": "Welcome to the chat!"}]},
                {"id": 2, "name": "League Captain", "lastMessage": "Roster locked in.",
                 "timestamp": "1h ago", "messages": [{"from": "them", "text": "Welcome to the chat!"}]}
            ]"#,
        )
        .unwrap();
        let store = MemoryStorage::new();
        set_pending_chat(&store, NEW_MATCH_CHAT_ID);

        let mut session = ChatSession::new(remote);
        assert_eq!(
            session.open_pending(&store, &sample_chats()),
            Some(Id::from(NEW_MATCH_CHAT_ID))
        );
        assert_eq!(session.chats().len(), 3);
        assert!(is_new_match(&session.chats()[0]));
        assert!(is_new_match(session.active().unwrap()));
        assert_eq!(session.chats()[1].name, "Doubles Crew");
        assert_eq!(store.get(PENDING_CHAT_KEY), None);
    }

    #[test]
    fn other_missing_handoff_is_not_seeded() {
        let store = MemoryStorage::new();
        set_pending_chat(&store, "7");

        let mut session = ChatSession::new(Vec::new());
        assert_eq!(session.open_pending(&store, &sample_chats()), None);
        assert!(session.chats().is_empty());
    }
}
