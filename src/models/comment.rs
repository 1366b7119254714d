use async_graphql::SimpleObject;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{PostId, UserId};

pub type CommentId = i32;

/// A comment on a post. `post_id` is not checked against existing posts.
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    #[graphql(skip)]
    pub post_id: PostId,
    #[graphql(skip)]
    pub user_id: UserId,
    #[graphql(skip)]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// ISO-8601 in UTC with millisecond precision, e.g. `2024-01-15T10:30:00.000Z`.
    pub fn created_at_iso(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
