use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::graphql::GraphqlExecutor;
use crate::models::Viewer;

use super::metrics;

/// POST /graphql
///
/// Resolver failures travel in the `errors` array of a 200 response; only a
/// request that cannot be parsed is rejected at the HTTP level.
pub async fn graphql_handler(
    executor: web::Data<GraphqlExecutor>,
    req: HttpRequest,
    gql: GraphQLRequest,
) -> GraphQLResponse {
    metrics::increment_request_count();

    let viewer = req
        .extensions()
        .get::<Viewer>()
        .cloned()
        .unwrap_or_default();

    let response = executor.execute(gql.into_inner(), viewer).await;
    if response.is_err() {
        metrics::increment_error_count();
    }

    response.into()
}

/// GET /graphql
pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
