use std::sync::Arc;

use crate::database::MemoryStore;
use crate::models::{UserInfo, Viewer};

use super::TokenCodec;

/// Turns a raw `Authorization` header into a [`Viewer`].
///
/// Fails open: any problem with the header, the credential or the user it
/// names produces `Viewer::Anonymous`.
#[derive(Clone)]
pub struct ContextBuilder {
    codec: TokenCodec,
    store: Arc<MemoryStore>,
}

impl ContextBuilder {
    pub fn new(codec: TokenCodec, store: Arc<MemoryStore>) -> Self {
        Self { codec, store }
    }

    pub fn build(&self, authorization: Option<&str>) -> Viewer {
        let Some(header) = authorization else {
            return Viewer::Anonymous;
        };

        let Some(token) = header.strip_prefix("Bearer ") else {
            log::debug!("Authorization header without Bearer scheme, treating as anonymous");
            return Viewer::Anonymous;
        };

        let Some(user_id) = self.codec.verify(token.trim()) else {
            return Viewer::Anonymous;
        };

        match self.store.find_user_by_id(user_id) {
            Ok(Some(user)) => Viewer::Authenticated(UserInfo::from(user)),
            Ok(None) => {
                log::debug!("Credential names unknown user {}", user_id);
                Viewer::Anonymous
            }
            Err(e) => {
                log::warn!("⚠️  Could not load user {} for context: {}", user_id, e);
                Viewer::Anonymous
            }
        }
    }
}
