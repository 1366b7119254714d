use actix_web::{web, HttpResponse};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::graphql::GraphqlExecutor;

static GRAPHQL_REQUESTS: AtomicU64 = AtomicU64::new(0);
static GRAPHQL_ERRORS: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    GRAPHQL_REQUESTS.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    GRAPHQL_ERRORS.fetch_add(1, Ordering::Relaxed);
}

/// Counter values rendered by `/metrics`.
pub struct MetricsSnapshot {
    pub graphql_requests_total: u64,
    pub graphql_errors_total: u64,
    pub store_accesses_total: u64,
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String, content_type = "text/plain")
    )
)]
pub async fn get_metrics(executor: web::Data<GraphqlExecutor>) -> HttpResponse {
    let snapshot = MetricsSnapshot {
        graphql_requests_total: GRAPHQL_REQUESTS.load(Ordering::Relaxed),
        graphql_errors_total: GRAPHQL_ERRORS.load(Ordering::Relaxed),
        store_accesses_total: executor.store().access_count(),
    };

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(render(&snapshot))
}

fn render(m: &MetricsSnapshot) -> String {
    format!(
        "# HELP graphql_requests_total Total number of GraphQL requests\n\
         # TYPE graphql_requests_total counter\n\
         graphql_requests_total {}\n\
         \n\
         # HELP graphql_errors_total GraphQL responses carrying at least one error\n\
         # TYPE graphql_errors_total counter\n\
         graphql_errors_total {}\n\
         \n\
         # HELP store_accesses_total Operations served by the in-memory store\n\
         # TYPE store_accesses_total counter\n\
         store_accesses_total {}\n",
        m.graphql_requests_total, m.graphql_errors_total, m.store_accesses_total
    )
}
