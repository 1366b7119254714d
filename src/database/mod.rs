use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::config::EmailMatch;
use crate::models::{Comment, CommentId, Post, PostId, User, UserId};
use crate::utils::AppError;

/// Rows loaded into a fresh store at startup.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

#[derive(Debug)]
struct StoreState {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    next_comment_id: CommentId,
}

/// In-memory users/posts/comments collections.
///
/// Lookups are linear scans; there are no indices. Every public operation
/// counts as one store access so callers can observe how many round trips a
/// query performed. Comment ids are assigned under the write lock.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
    accesses: AtomicU64,
}

impl MemoryStore {
    pub fn new(seed: SeedData) -> Self {
        let next_comment_id = seed.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;

        Self {
            state: RwLock::new(StoreState {
                users: seed.users,
                posts: seed.posts,
                comments: seed.comments,
                next_comment_id,
            }),
            accesses: AtomicU64::new(0),
        }
    }

    /// Total store operations served since startup.
    pub fn access_count(&self) -> u64 {
        self.accesses.load(Ordering::Relaxed)
    }

    fn touch(&self) {
        self.accesses.fetch_add(1, Ordering::Relaxed);
    }

    fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> Result<T, AppError> {
        self.touch();
        let state = self
            .state
            .read()
            .map_err(|e| AppError::Store(format!("lock poisoned: {}", e)))?;
        Ok(f(&state))
    }

    pub fn find_user_by_credentials(
        &self,
        email: &str,
        password: &str,
        email_match: EmailMatch,
    ) -> Result<Option<User>, AppError> {
        self.read(|state| {
            state
                .users
                .iter()
                .find(|u| {
                    let email_ok = match email_match {
                        EmailMatch::Exact => u.email == email,
                        EmailMatch::CaseInsensitive => {
                            u.email.to_lowercase() == email.to_lowercase()
                        }
                    };
                    email_ok && u.password == password
                })
                .cloned()
        })
    }

    pub fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        self.read(|state| state.users.iter().find(|u| u.id == id).cloned())
    }

    pub fn users_by_ids(&self, ids: &[UserId]) -> Result<HashMap<UserId, User>, AppError> {
        self.read(|state| {
            state
                .users
                .iter()
                .filter(|u| ids.contains(&u.id))
                .map(|u| (u.id, u.clone()))
                .collect()
        })
    }

    pub fn all_posts(&self) -> Result<Vec<Post>, AppError> {
        self.read(|state| state.posts.clone())
    }

    pub fn comments_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, AppError> {
        self.read(|state| {
            state
                .comments
                .iter()
                .filter(|c| c.post_id == post_id)
                .cloned()
                .collect()
        })
    }

    /// Groups comments by post for every id in `post_ids`, keeping insertion order.
    /// Posts without comments map to an empty list.
    pub fn comments_for_posts(
        &self,
        post_ids: &[PostId],
    ) -> Result<HashMap<PostId, Vec<Comment>>, AppError> {
        self.read(|state| {
            let mut grouped: HashMap<PostId, Vec<Comment>> =
                post_ids.iter().map(|id| (*id, Vec::new())).collect();
            for comment in &state.comments {
                if let Some(bucket) = grouped.get_mut(&comment.post_id) {
                    bucket.push(comment.clone());
                }
            }
            grouped
        })
    }

    /// Counts with its own scan instead of reusing `comments_for_post`.
    pub fn comment_count_for_post(&self, post_id: PostId) -> Result<usize, AppError> {
        self.read(|state| state.comments.iter().filter(|c| c.post_id == post_id).count())
    }

    pub fn comment_counts_for_posts(
        &self,
        post_ids: &[PostId],
    ) -> Result<HashMap<PostId, usize>, AppError> {
        self.read(|state| {
            let mut counts: HashMap<PostId, usize> =
                post_ids.iter().map(|id| (*id, 0)).collect();
            for comment in &state.comments {
                if let Some(count) = counts.get_mut(&comment.post_id) {
                    *count += 1;
                }
            }
            counts
        })
    }

    /// Row counts as `(users, posts, comments)`. Not counted as a store access.
    pub fn row_counts(&self) -> Result<(usize, usize, usize), AppError> {
        let state = self
            .state
            .read()
            .map_err(|e| AppError::Store(format!("lock poisoned: {}", e)))?;
        Ok((state.users.len(), state.posts.len(), state.comments.len()))
    }

    /// Appends a comment. `post_id` is accepted even if no such post exists.
    pub fn add_comment(
        &self,
        post_id: PostId,
        user_id: UserId,
        text: &str,
    ) -> Result<Comment, AppError> {
        self.touch();
        let mut state = self
            .state
            .write()
            .map_err(|e| AppError::Store(format!("lock poisoned: {}", e)))?;

        let comment = Comment {
            id: state.next_comment_id,
            text: text.to_string(),
            post_id,
            user_id,
            created_at: Utc::now(),
        };
        state.next_comment_id += 1;
        state.comments.push(comment.clone());

        Ok(comment)
    }
}
