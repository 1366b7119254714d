use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::graphql::GraphqlExecutor;

#[derive(Serialize, utoipa::ToSchema)]
pub struct StoreSummary {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub resolver_mode: String,
    pub store: Option<StoreSummary>,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "In-memory store is unavailable", body = HealthResponse)
    )
)]
pub async fn health_check(executor: web::Data<GraphqlExecutor>) -> HttpResponse {
    let store = match executor.store().row_counts() {
        Ok((users, posts, comments)) => Some(StoreSummary {
            users,
            posts,
            comments,
        }),
        Err(e) => {
            log::error!("❌ Health check could not read store: {}", e);
            None
        }
    };

    let body = HealthResponse {
        status: if store.is_some() { "healthy" } else { "degraded" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        resolver_mode: format!("{:?}", executor.behavior().resolver_mode),
        store,
        timestamp: chrono::Utc::now().timestamp(),
    };

    if body.store.is_some() {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
