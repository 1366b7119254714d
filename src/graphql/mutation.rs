use async_graphql::{Context, ErrorExtensions, Object, Result};
use std::sync::Arc;

use crate::config::Behavior;
use crate::database::MemoryStore;
use crate::models::{AuthPayload, Comment, PostId, Viewer};
use crate::services::{auth_service, comment_service, TokenCodec};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<Option<AuthPayload>> {
        let store = ctx.data::<Arc<MemoryStore>>()?;
        let codec = ctx.data::<TokenCodec>()?;
        let behavior = ctx.data::<Behavior>()?;

        log::info!("🔐 login - email: {}", email);

        match auth_service::login(store, codec, &email, &password, behavior.email_match) {
            Ok(payload) => {
                log::info!("✅ Login successful: {}", email);
                Ok(Some(payload))
            }
            Err(e) => {
                log::warn!("❌ Login failed: {} - {}", email, e);
                Err(e.extend())
            }
        }
    }

    async fn add_comment(
        &self,
        ctx: &Context<'_>,
        post_id: PostId,
        text: String,
    ) -> Result<Option<Comment>> {
        let store = ctx.data::<Arc<MemoryStore>>()?;
        let behavior = ctx.data::<Behavior>()?;
        let anonymous = Viewer::Anonymous;
        let viewer = ctx.data_opt::<Viewer>().unwrap_or(&anonymous);

        comment_service::add_comment(store, viewer, behavior, post_id, &text)
            .map(Some)
            .map_err(|e| {
                log::warn!("❌ addComment on post {} rejected: {:?}", post_id, e);
                e.extend()
            })
    }
}
