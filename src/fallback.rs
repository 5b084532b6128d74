//! Sample content shown whenever the backend is bypassed or unreachable.

use crate::data::{AccountSetting, Chat, Id, Message, Post, Sender};
use crate::storage::NEW_MATCH_CHAT_ID;

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackData {
    pub posts: Vec<Post>,
    pub chats: Vec<Chat>,
    pub account: Vec<AccountSetting>,
}

impl Default for FallbackData {
    fn default() -> Self {
        Self {
            posts: sample_posts(),
            chats: sample_chats(),
            account: sample_account(),
        }
    }
}

fn post(id: u64, username: &str, content: &str, created_at: &str, likes: u32) -> Post {
    Post {
        id: Id::from(id),
        username: username.to_string(),
        content: content.to_string(),
        created_at: created_at.to_string(),
        likes,
    }
}

fn message(from: Sender, text: &str) -> Message {
    Message {
        from,
        text: text.to_string(),
    }
}

fn setting(id: u64, label: &str, value: &str) -> AccountSetting {
    AccountSetting {
        id: Id::from(id),
        setting: label.to_string(),
        current_data: value.to_string(),
    }
}

pub fn sample_posts() -> Vec<Post> {
    vec![
        post(
            1,
            "Jordan Diaz",
            "Need 2 players for 3.0–3.5 doubles at Lincoln Courts tonight! 🏓",
            "2 min ago",
            4,
        ),
        post(
            2,
            "Aliyah Stone",
            "Just played the longest rally of my life... 31 hits 🤯 #PickleballAddict",
            "1 hr ago",
            12,
        ),
        post(
            3,
            "Coach Mike",
            "Tournament sign-ups for next Saturday are now OPEN. DM me for details.",
            "3 hrs ago",
            25,
        ),
        post(
            4,
            "Sarah J.",
            "Anyone up for a quick match at Pine Lake? I'm rated 3.5.",
            "5 hrs ago",
            8,
        ),
    ]
}

/// The first entry is the conversation a confirmed match hands off to.
pub fn sample_chats() -> Vec<Chat> {
    vec![
        Chat {
            id: Id::from(NEW_MATCH_CHAT_ID),
            name: "Sarah J. (Match Opponent)".to_string(),
            last_message: "Match Accepted! Let's play.".to_string(),
            timestamp: "Just now".to_string(),
            messages: vec![
                message(Sender::System, "You matched with Sarah J. (Rating 3.4)"),
                message(
                    Sender::Them,
                    "Hey! I saw we matched at Lincoln Park. Does 6pm work?",
                ),
            ],
        },
        Chat {
            id: Id::from(1u64),
            name: "Doubles Crew".to_string(),
            last_message: "Same time Thursday?".to_string(),
            timestamp: "3m ago".to_string(),
            messages: vec![
                message(Sender::Them, "You free around 6?"),
                message(Sender::Me, "Yep, let's do it."),
            ],
        },
        Chat {
            id: Id::from(2u64),
            name: "League Captain".to_string(),
            last_message: "Roster locked in.".to_string(),
            timestamp: "1h ago".to_string(),
            messages: vec![message(Sender::Them, "You’re playing court 3 this week.")],
        },
    ]
}

pub fn sample_account() -> Vec<AccountSetting> {
    vec![
        setting(1, "Name", "John Doe"),
        setting(2, "Username", "JohnDoe123"),
        setting(3, "Mobile Number", "(123) 456-7890"),
        setting(4, "Email", "picklecloud@gmail.com"),
        setting(5, "Birthday", "09-11-2001"),
        setting(6, "Password", "********"),
        setting(7, "Notification", "Yes"),
        setting(8, "Delete Account", ""),
    ]
}
