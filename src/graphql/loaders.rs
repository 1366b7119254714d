use async_graphql::dataloader::{DataLoader, Loader};
use async_graphql::Request;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::database::MemoryStore;
use crate::models::{Comment, PostId, UserId, UserInfo};
use crate::utils::AppError;

use super::simulate_latency;

/// Comments grouped by post, one store access per batch.
pub struct CommentsByPostLoader {
    store: Arc<MemoryStore>,
    delay: Duration,
}

impl Loader<PostId> for CommentsByPostLoader {
    type Value = Vec<Comment>;
    type Error = AppError;

    async fn load(&self, keys: &[PostId]) -> Result<HashMap<PostId, Self::Value>, Self::Error> {
        log::debug!("Batch loading comments for {} posts", keys.len());
        simulate_latency(self.delay).await;
        self.store.comments_for_posts(keys)
    }
}

/// Comment counts per post, one store access per batch.
pub struct CommentCountLoader {
    store: Arc<MemoryStore>,
    delay: Duration,
}

impl Loader<PostId> for CommentCountLoader {
    type Value = usize;
    type Error = AppError;

    async fn load(&self, keys: &[PostId]) -> Result<HashMap<PostId, Self::Value>, Self::Error> {
        log::debug!("Batch counting comments for {} posts", keys.len());
        simulate_latency(self.delay).await;
        self.store.comment_counts_for_posts(keys)
    }
}

/// Sanitized users keyed by id, one store access per batch.
pub struct UserLoader {
    store: Arc<MemoryStore>,
    delay: Duration,
}

impl Loader<UserId> for UserLoader {
    type Value = UserInfo;
    type Error = AppError;

    async fn load(&self, keys: &[UserId]) -> Result<HashMap<UserId, Self::Value>, Self::Error> {
        log::debug!("Batch loading {} users", keys.len());
        simulate_latency(self.delay).await;
        let users = self.store.users_by_ids(keys)?;
        Ok(users
            .into_iter()
            .map(|(id, user)| (id, UserInfo::from(user)))
            .collect())
    }
}

/// Attaches fresh loaders to a request. Loaders live for one request only,
/// so a comment added by one request is visible to the next.
pub fn attach(request: Request, store: &Arc<MemoryStore>, delay: Duration) -> Request {
    request
        .data(DataLoader::new(
            CommentsByPostLoader {
                store: Arc::clone(store),
                delay,
            },
            tokio::spawn,
        ))
        .data(DataLoader::new(
            CommentCountLoader {
                store: Arc::clone(store),
                delay,
            },
            tokio::spawn,
        ))
        .data(DataLoader::new(
            UserLoader {
                store: Arc::clone(store),
                delay,
            },
            tokio::spawn,
        ))
}
