pub mod loaders;
pub mod mutation;
pub mod query;
pub mod types;

#[cfg(test)]
mod tests;

use async_graphql::{EmptySubscription, Request, Response, Schema};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Behavior;
use crate::database::MemoryStore;
use crate::models::Viewer;
use crate::services::TokenCodec;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Schema plus the per-request wiring (viewer, loaders) it needs.
#[derive(Clone)]
pub struct GraphqlExecutor {
    schema: AppSchema,
    store: Arc<MemoryStore>,
    behavior: Behavior,
}

impl GraphqlExecutor {
    pub fn new(store: Arc<MemoryStore>, codec: TokenCodec, behavior: Behavior) -> Self {
        let schema = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
            .data(Arc::clone(&store))
            .data(codec)
            .data(behavior.clone())
            .finish();

        Self {
            schema,
            store,
            behavior,
        }
    }

    pub async fn execute(&self, request: impl Into<Request>, viewer: Viewer) -> Response {
        let request = request.into().data(viewer);
        let request = loaders::attach(request, &self.store, self.behavior.resolver_delay);
        self.schema.execute(request).await
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }
}

/// Stand-in for a slow backing service.
pub(crate) async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
