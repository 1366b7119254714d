pub mod graphql;
pub mod health;
pub mod metrics;
pub mod swagger;

use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::graphql::GraphqlExecutor;
use crate::middleware::AuthMiddleware;
use crate::services::ContextBuilder;

/// Registers every route of the service on an `App`.
pub fn configure(
    cfg: &mut web::ServiceConfig,
    executor: web::Data<GraphqlExecutor>,
    context: ContextBuilder,
) {
    cfg.app_data(executor)
        // Swagger UI for the REST side
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}")
                .url("/api-docs/openapi.json", swagger::ApiDoc::openapi()),
        )
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // GraphQL endpoint + playground
        .service(
            web::resource("/graphql")
                .wrap(AuthMiddleware::new(context))
                .route(web::post().to(graphql::graphql_handler))
                .route(web::get().to(graphql::graphiql)),
        );
}
