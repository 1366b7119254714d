//! Consumer side of the feed API: logs in, keeps the credential in memory,
//! reads the feed, posts comments and polls for fresh data.

pub mod error;
pub mod types;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

pub use error::ClientError;
pub use types::*;

const FEED_QUERY: &str = r#"
query Feed {
  posts {
    id
    title
    content
    author { id name email }
    commentCount
    comments {
      id
      text
      createdAt
      author { id name email }
    }
  }
}
"#;

/// Shortest period `poll_feed` will tick at.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

const ME_QUERY: &str = "query Me { me { id name email } }";

const LOGIN_MUTATION: &str = r#"
mutation Login($email: String!, $password: String!) {
  login(email: $email, password: $password) {
    token
    user { id name email }
  }
}
"#;

const ADD_COMMENT_MUTATION: &str = r#"
mutation AddComment($postId: Int!, $text: String!) {
  addComment(postId: $postId, text: $text) {
    id
    text
    createdAt
    author { id name email }
  }
}
"#;

pub struct FeedClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl FeedClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: None,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Reuses a credential obtained earlier.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    /// Logs in and keeps the returned credential for later requests.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<FeedUser, ClientError> {
        let data: LoginData = self
            .send(
                "Login",
                LOGIN_MUTATION,
                json!({ "email": email, "password": password }),
            )
            .await?;
        let payload = data.login.ok_or(ClientError::MissingData)?;

        self.token = Some(payload.token);
        Ok(payload.user)
    }

    pub async fn me(&self) -> Result<Option<FeedUser>, ClientError> {
        let data: MeData = self.send("Me", ME_QUERY, json!({})).await?;
        Ok(data.me)
    }

    pub async fn feed(&self) -> Result<Vec<FeedPost>, ClientError> {
        let data: FeedData = self.send("Feed", FEED_QUERY, json!({})).await?;
        Ok(data.posts)
    }

    pub async fn add_comment(&self, post_id: i32, text: &str) -> Result<FeedComment, ClientError> {
        let data: AddCommentData = self
            .send(
                "AddComment",
                ADD_COMMENT_MUTATION,
                json!({ "postId": post_id, "text": text }),
            )
            .await?;
        data.add_comment.ok_or(ClientError::MissingData)
    }

    /// Re-fetches the feed every `interval`, handing each result to
    /// `on_update`. Runs forever when `rounds` is `None`. Intervals below
    /// [`MIN_POLL_INTERVAL`] are raised to it.
    ///
    /// Failed rounds are logged and skipped; the next tick tries again.
    pub async fn poll_feed<F>(&self, interval: Duration, rounds: Option<usize>, mut on_update: F)
    where
        F: FnMut(&[FeedPost]),
    {
        let mut ticker = tokio::time::interval(interval.max(MIN_POLL_INTERVAL));
        let mut completed = 0usize;

        loop {
            if rounds.is_some_and(|limit| completed >= limit) {
                break;
            }
            ticker.tick().await;

            match self.feed().await {
                Ok(posts) => on_update(&posts),
                Err(e) => log::warn!("⚠️  Feed refresh failed: {}", e),
            }
            completed += 1;
        }
    }

    async fn send<T>(&self, operation: &str, query: &str, variables: Value) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let body = json!({
            "operationName": operation,
            "query": query,
            "variables": variables,
        });

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        decode_envelope(&bytes)
    }
}

/// Parses `POLL_INTERVAL_SECS`. Missing, zero or unparseable values fall
/// back to the default.
pub fn parse_poll_interval(raw: Option<&str>) -> Duration {
    let secs = match raw.map(str::trim) {
        None => DEFAULT_POLL_INTERVAL_SECS,
        Some(value) => match value.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                log::warn!(
                    "⚠️  Invalid POLL_INTERVAL_SECS '{}', using {}s",
                    value,
                    DEFAULT_POLL_INTERVAL_SECS
                );
                DEFAULT_POLL_INTERVAL_SECS
            }
        },
    };
    Duration::from_secs(secs)
}

/// Unwraps a GraphQL response envelope into its `data`.
pub fn decode_envelope<T>(bytes: &[u8]) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    let envelope: GraphqlEnvelope<T> = serde_json::from_slice(bytes)?;

    if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
        let messages = errors.into_iter().map(|e| e.message).collect();
        return Err(ClientError::Graphql(messages));
    }

    envelope.data.ok_or(ClientError::MissingData)
}
