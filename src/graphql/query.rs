use async_graphql::{Context, ErrorExtensions, Object, Result};
use std::sync::Arc;

use crate::database::MemoryStore;
use crate::models::{Post, UserInfo, Viewer};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All posts in insertion order. No viewer restriction.
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let store = ctx.data::<Arc<MemoryStore>>()?;
        store.all_posts().map_err(|e| e.extend())
    }

    /// The authenticated user, or null for anonymous requests.
    async fn me(&self, ctx: &Context<'_>) -> Option<UserInfo> {
        ctx.data_opt::<Viewer>().and_then(|viewer| viewer.user().cloned())
    }
}
