use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use feed_graphql_service::{
    api,
    config::AppConfig,
    graphql::GraphqlExecutor,
    middleware,
    seeds::feed_seed,
    services::{ContextBuilder, TokenCodec},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    let behavior = &config.behavior;

    log::info!("🚀 Starting Feed GraphQL Service...");
    log::info!(
        "🧪 Behavior: email_match={:?} resolver_mode={:?} delay={}ms explain_auth_errors={} trim_comment_text={}",
        behavior.email_match,
        behavior.resolver_mode,
        behavior.resolver_delay.as_millis(),
        behavior.explain_auth_errors,
        behavior.trim_comment_text
    );

    // 🌱 In-memory store, reseeded on every start
    let store = Arc::new(feed_seed::seed_default_store());
    let codec = TokenCodec::new(&config.jwt_secret);

    let executor = web::Data::new(GraphqlExecutor::new(
        Arc::clone(&store),
        codec.clone(),
        config.behavior.clone(),
    ));
    let context = ContextBuilder::new(codec, store);

    let bind = config.bind_address();
    let origins = config.cors_origins.clone();

    log::info!("🌐 Server starting on {}", bind);
    log::info!("🕸️  GraphQL endpoint + playground at: http://{}/graphql", bind);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind);

    HttpServer::new(move || {
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .expose_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);

        let executor = executor.clone();
        let context = context.clone();

        App::new()
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .configure(move |cfg| api::configure(cfg, executor, context))
    })
    .bind(bind)?
    .run()
    .await
}
