use gloo_net::http::Request;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifier normalized to a string. The wire format mixes numeric and
/// string ids, so both deserialize into the same representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct Id(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number_to_id(&number)),
        }
    }
}

/// Whole floats such as `1.0` share the id of the integer `1`.
fn number_to_id(number: &serde_json::Number) -> String {
    if let Some(value) = number.as_u64() {
        return value.to_string();
    }
    if let Some(value) = number.as_i64() {
        return value.to_string();
    }
    match number.as_f64() {
        Some(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{:.0}", value)
        }
        _ => number.to_string(),
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Id,
    pub username: String,
    pub content: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(default)]
    pub likes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Me,
    Them,
    System,
}

impl Sender {
    pub fn css_class(self) -> &'static str {
        match self {
            Sender::Me => "me",
            Sender::Them => "them",
            Sender::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub from: Sender,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: Id,
    pub name: String,
    #[serde(rename = "lastMessage", default)]
    pub last_message: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSetting {
    pub id: Id,
    #[serde(rename = "Setting")]
    pub setting: String,
    #[serde(rename = "CurrentData", default)]
    pub current_data: String,
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status} while fetching {url}")]
    Status { status: u16, url: String },
    #[error("malformed response: {0}")]
    Parse(String),
}

impl DataError {
    fn network<E: fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

#[derive(Serialize)]
struct NewPost<'a> {
    content: &'a str,
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, DataError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(DataError::network)?;

    if !response.ok() {
        return Err(DataError::Status {
            status: response.status(),
            url: url.to_owned(),
        });
    }

    let text = response.text().await.map_err(DataError::network)?;
    serde_json::from_str(&text).map_err(DataError::parse)
}

pub async fn fetch_posts(url: &str) -> Result<Vec<Post>, DataError> {
    fetch_json(url).await
}

pub async fn fetch_chats(url: &str) -> Result<Vec<Chat>, DataError> {
    fetch_json(url).await
}

pub async fn fetch_account(url: &str) -> Result<Vec<AccountSetting>, DataError> {
    fetch_json(url).await
}

/// Sends a new post to the backend. The outcome only gets logged; the post
/// is already shown locally.
pub async fn create_post(url: &str, content: &str) {
    let request = match Request::post(url).json(&NewPost { content }) {
        Ok(request) => request,
        Err(err) => {
            warn!("Could not encode new post: {}", err);
            return;
        }
    };

    match request.send().await {
        Ok(response) if response.ok() => debug!("Post stored remotely"),
        Ok(response) => warn!("HTTP {} while creating post", response.status()),
        Err(err) => warn!("Could not reach {}: {}", url, err),
    }
}

/// Collapses one load attempt into data. `None` means the remote source was
/// bypassed; errors are logged and replaced by the fallback.
pub fn resolve_load<T>(
    what: &str,
    outcome: Option<Result<Vec<T>, DataError>>,
    fallback: &[T],
) -> Vec<T>
where
    T: Clone,
{
    match outcome {
        Some(Ok(items)) => {
            debug!("Loaded {} {} from backend", items.len(), what);
            items
        }
        Some(Err(err)) => {
            warn!("Falling back to sample {}: {}", what, err);
            fallback.to_vec()
        }
        None => fallback.to_vec(),
    }
}
