use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, ErrorExtensions, Result};
use std::sync::Arc;

use crate::config::{Behavior, ResolverMode};
use crate::database::MemoryStore;
use crate::models::{Comment, Post, UserId, UserInfo};

use super::loaders::{CommentCountLoader, CommentsByPostLoader, UserLoader};
use super::simulate_latency;

#[ComplexObject]
impl Post {
    /// Null when the author id does not match any user.
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<UserInfo>> {
        load_user(ctx, self.author_id, false).await
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<Comment>> {
        let behavior = ctx.data::<Behavior>()?;
        match behavior.resolver_mode {
            ResolverMode::PerRow => {
                simulate_latency(behavior.resolver_delay).await;
                let store = ctx.data::<Arc<MemoryStore>>()?;
                store.comments_for_post(self.id).map_err(|e| e.extend())
            }
            ResolverMode::Batched => {
                let loader = ctx.data::<DataLoader<CommentsByPostLoader>>()?;
                let comments = loader.load_one(self.id).await.map_err(|e| e.extend())?;
                Ok(comments.unwrap_or_default())
            }
        }
    }

    async fn comment_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let behavior = ctx.data::<Behavior>()?;
        let count = match behavior.resolver_mode {
            ResolverMode::PerRow => {
                simulate_latency(behavior.resolver_delay).await;
                let store = ctx.data::<Arc<MemoryStore>>()?;
                store.comment_count_for_post(self.id).map_err(|e| e.extend())?
            }
            ResolverMode::Batched => {
                let loader = ctx.data::<DataLoader<CommentCountLoader>>()?;
                loader
                    .load_one(self.id)
                    .await
                    .map_err(|e| e.extend())?
                    .unwrap_or(0)
            }
        };
        Ok(i32::try_from(count).unwrap_or(i32::MAX))
    }
}

#[ComplexObject]
impl Comment {
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<UserInfo>> {
        load_user(ctx, self.user_id, true).await
    }

    async fn created_at(&self) -> String {
        self.created_at_iso()
    }
}

async fn load_user(ctx: &Context<'_>, id: UserId, slow: bool) -> Result<Option<UserInfo>> {
    let behavior = ctx.data::<Behavior>()?;
    match behavior.resolver_mode {
        ResolverMode::PerRow => {
            if slow {
                simulate_latency(behavior.resolver_delay).await;
            }
            let store = ctx.data::<Arc<MemoryStore>>()?;
            let user = store.find_user_by_id(id).map_err(|e| e.extend())?;
            Ok(user.map(UserInfo::from))
        }
        ResolverMode::Batched => {
            let loader = ctx.data::<DataLoader<UserLoader>>()?;
            loader.load_one(id).await.map_err(|e| e.extend())
        }
    }
}
