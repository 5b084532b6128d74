use crate::data::{create_post, fetch_posts, resolve_load, Id, Post};
use crate::ViewProps;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use std::collections::HashSet;
use yew::prelude::*;

pub const CURRENT_USER: &str = "You";
const JUST_NOW: &str = "Just now";

#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub post: Post,
    pub liked: bool,
}

/// Posts shown on one feed page, in display order. Ids are unique within
/// the session; repeated ids from the backend get a numeric suffix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSession {
    entries: Vec<FeedEntry>,
    seen: HashSet<String>,
    local_posts: u64,
}

fn ensure_unique_id(seen: &mut HashSet<String>, base: String) -> String {
    if seen.insert(base.clone()) {
        return base;
    }

    let mut counter = 2;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

impl FeedSession {
    pub fn new(posts: Vec<Post>) -> Self {
        let mut seen = HashSet::new();
        let entries = posts
            .into_iter()
            .map(|mut post| {
                post.id = Id::from(ensure_unique_id(&mut seen, String::from(post.id)));
                FeedEntry { post, liked: false }
            })
            .collect();

        Self {
            entries,
            seen,
            local_posts: 0,
        }
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    /// Puts a post by the current user at the top of the feed. Blank text
    /// is ignored.
    pub fn submit(&mut self, text: &str) -> Option<Post> {
        let content = text.trim();
        if content.is_empty() {
            return None;
        }

        self.local_posts += 1;
        let id = ensure_unique_id(&mut self.seen, format!("local-{}", self.local_posts));
        let post = Post {
            id: Id::from(id),
            username: CURRENT_USER.to_string(),
            content: content.to_string(),
            created_at: JUST_NOW.to_string(),
            likes: 0,
        };
        self.entries.insert(
            0,
            FeedEntry {
                post: post.clone(),
                liked: false,
            },
        );
        Some(post)
    }

    /// Flips the liked flag and returns the new count.
    pub fn toggle_like(&mut self, id: &Id) -> Option<u32> {
        let entry = self.entries.iter_mut().find(|entry| &entry.post.id == id)?;
        entry.liked = !entry.liked;
        entry.post.likes = if entry.liked {
            entry.post.likes.saturating_add(1)
        } else {
            entry.post.likes.saturating_sub(1)
        };
        Some(entry.post.likes)
    }
}

#[function_component(FeedView)]
pub fn feed_view(props: &ViewProps) -> Html {
    let session = use_state(|| None::<FeedSession>);
    let draft = use_state(String::new);

    {
        let session = session.clone();
        let config = props.config.clone();

        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let outcome = match config.posts_url() {
                        Some(url) => Some(fetch_posts(&url).await),
                        None => None,
                    };
                    let posts = resolve_load("posts", outcome, &config.fallback.posts);
                    session.set(Some(FeedSession::new(posts)));
                });

                || ()
            },
            (),
        );
    }

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
        let config = props.config.clone();
        let toaster = props.toaster.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(mut next) = (*session).clone() else {
                return;
            };
            let Some(post) = next.submit(&draft) else {
                return;
            };

            if let Some(url) = config.posts_url() {
                spawn_local(async move {
                    create_post(&url, &post.content).await;
                });
            }

            session.set(Some(next));
            draft.set(String::new());
            toaster.notify("Post created successfully!");
        })
    };

    let on_like = {
        let session = session.clone();
        Callback::from(move |id: Id| {
            let Some(mut next) = (*session).clone() else {
                return;
            };
            if next.toggle_like(&id).is_some() {
                session.set(Some(next));
            }
        })
    };

    let posts = match &*session {
        None => html! { <p class="feed-placeholder">{ "Loading posts…" }</p> },
        Some(feed) => html! {
            <div class="posts">
                { for feed.entries().iter().map(|entry| render_post(entry, &on_like)) }
            </div>
        },
    };

    html! {
        <section class="feed">
            <form class="new-post" onsubmit={on_submit}>
                <input
                    class="post-input"
                    placeholder="Share something with the community…"
                    value={(*draft).clone()}
                    oninput={on_input}
                />
                <button type="submit" class="primary-btn">{ "Post" }</button>
            </form>
            { posts }
        </section>
    }
}

fn render_post(entry: &FeedEntry, on_like: &Callback<Id>) -> Html {
    let post = &entry.post;
    let onclick = {
        let on_like = on_like.clone();
        let id = post.id.clone();
        Callback::from(move |_: MouseEvent| on_like.emit(id.clone()))
    };

    html! {
        <article class="post-card" key={post.id.to_string()}>
            <div class="post-header">
                <div>
                    <div class="post-user">{ &post.username }</div>
                    <div class="post-meta">{ &post.created_at }</div>
                </div>
            </div>
            <div class="post-body">{ &post.content }</div>
            <div class="post-actions">
                <button class={classes!("like-btn", entry.liked.then_some("liked"))} {onclick}>
                    <span>{ "💚" }</span>
                    <span class="like-label">{ "Rally" }</span>
                    <span class="like-count">{ post.likes.to_string() }</span>
                </button>
            </div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::sample_posts;

    #[test]
    fn keeps_loaded_order() {
        let session = FeedSession::new(sample_posts());
        let names: Vec<_> = session
            .entries()
            .iter()
            .map(|entry| entry.post.username.as_str())
            .collect();
        assert_eq!(names, ["Jordan Diaz", "Aliyah Stone", "Coach Mike", "Sarah J."]);
    }

    #[test]
    fn whitespace_submission_is_ignored() {
        let mut session = FeedSession::new(sample_posts());
        assert_eq!(session.submit("  "), None);
        assert_eq!(session.entries().len(), 4);
    }

    #[test]
    fn submission_goes_to_the_top() {
        let mut session = FeedSession::new(sample_posts());
        let post = session.submit("  Great game!  ").unwrap();

        assert_eq!(post.username, "You");
        assert_eq!(post.content, "Great game!");
        assert_eq!(post.likes, 0);
        assert_eq!(session.entries()[0].post, post);
        assert_eq!(session.entries().len(), 5);

        let second = session.submit("Rematch Friday?").unwrap();
        assert_ne!(second.id, post.id);
        assert_eq!(session.entries()[0].post.content, "Rematch Friday?");
    }

    #[test]
    fn double_like_restores_count() {
        let mut session = FeedSession::new(sample_posts());
        let id = Id::from(2u64);

        assert_eq!(session.toggle_like(&id), Some(13));
        assert!(session.entries()[1].liked);
        assert_eq!(session.toggle_like(&id), Some(12));
        assert!(!session.entries()[1].liked);
    }

    #[test]
    fn like_count_never_negative() {
        let mut session = FeedSession::new(Vec::new());
        let post = session.submit("First serve").unwrap();

        for _ in 0..7 {
            session.toggle_like(&post.id);
        }
        assert_eq!(session.entries()[0].post.likes, 1);
        session.toggle_like(&post.id);
        assert_eq!(session.entries()[0].post.likes, 0);
    }

    #[test]
    fn repeated_ids_like_their_own_post() {
        let mut posts = sample_posts();
        posts[1].id = posts[0].id.clone();
        let mut session = FeedSession::new(posts);

        let first = session.entries()[0].post.id.clone();
        let second = session.entries()[1].post.id.clone();
        assert_ne!(first, second);
        assert_eq!(second.as_str(), "1-2");

        assert_eq!(session.toggle_like(&second), Some(13));
        assert!(!session.entries()[0].liked);
        assert_eq!(session.entries()[0].post.likes, 4);
        assert!(session.entries()[1].liked);
    }

    #[test]
    fn local_ids_avoid_loaded_ids() {
        let mut posts = sample_posts();
        posts[0].id = Id::from("local-1");
        let mut session = FeedSession::new(posts);

        let post = session.submit("Who's up for doubles?").unwrap();
        assert_eq!(post.id.as_str(), "local-1-2");
        assert_eq!(session.toggle_like(&post.id), Some(1));
        assert_eq!(session.entries()[1].post.likes, 4);
    }

    #[test]
    fn unknown_post_is_untouched() {
        let mut session = FeedSession::new(sample_posts());
        assert_eq!(session.toggle_like(&Id::from("missing")), None);
    }
}
