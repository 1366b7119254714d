use dotenv::dotenv;
use feed_graphql_service::client::{parse_poll_interval, FeedClient, FeedPost};
use std::env;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let endpoint =
        env::var("API_URL").unwrap_or_else(|_| "http://localhost:4000/graphql".to_string());
    let interval = parse_poll_interval(env::var("POLL_INTERVAL_SECS").ok().as_deref());

    let mut client = FeedClient::new(endpoint);
    log::info!("📡 Polling {} every {}s", client.endpoint(), interval.as_secs());

    if let (Ok(email), Ok(password)) = (env::var("CLIENT_EMAIL"), env::var("CLIENT_PASSWORD")) {
        match client.login(&email, &password).await {
            Ok(user) => log::info!("✅ Logged in as {} ({})", user.name, user.email),
            Err(e) => log::warn!("❌ Login failed for {}: {}", email, e),
        }
    }

    match client.me().await {
        Ok(Some(user)) => log::info!("👤 Viewer: {}", user.name),
        Ok(None) => log::info!("👤 Viewer: anonymous"),
        Err(e) => log::warn!("⚠️  Could not load viewer: {}", e),
    }

    client
        .poll_feed(interval, None, log_feed)
        .await;
}

fn log_feed(posts: &[FeedPost]) {
    let comments: i32 = posts.iter().map(|p| p.comment_count).sum();
    log::info!("🔄 Feed refreshed: {} posts, {} comments", posts.len(), comments);
    for post in posts {
        let author = post.author.as_ref().map(|a| a.name.as_str()).unwrap_or("unknown");
        log::debug!("   #{} {} by {} ({} comments)", post.id, post.title, author, post.comment_count);
    }
}
