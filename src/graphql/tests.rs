use async_graphql::{Request, Variables};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::config::{EmailMatch, ResolverMode};
use crate::database::SeedData;
use crate::models::{Comment, Post, User, UserInfo};
use crate::seeds::feed_seed::default_seed;

const SECRET: &str = "test-secret";

fn executor_with(seed: SeedData, behavior: Behavior) -> GraphqlExecutor {
    GraphqlExecutor::new(
        Arc::new(MemoryStore::new(seed)),
        TokenCodec::new(SECRET),
        behavior,
    )
}

fn as_is() -> GraphqlExecutor {
    executor_with(default_seed(), Behavior::as_is().with_delay(Duration::ZERO))
}

fn john() -> Viewer {
    Viewer::Authenticated(UserInfo {
        id: 1,
        email: "john@example.com".into(),
        name: "John Doe".into(),
    })
}

fn data(response: &Response) -> Value {
    serde_json::to_value(&response.data).unwrap()
}

fn first_error_code(response: &Response) -> Value {
    let errors = serde_json::to_value(&response.errors).unwrap();
    errors[0]["extensions"]["code"].clone()
}

/// `posts` posts, each with `per_post` comments written by rotating users.
fn grid_seed(posts: i32, per_post: i32) -> SeedData {
    let users: Vec<User> = (1..=3)
        .map(|id| User {
            id,
            email: format!("user{}@example.com", id),
            password: "pw".into(),
            name: format!("User {}", id),
        })
        .collect();
    let posts_rows: Vec<Post> = (1..=posts)
        .map(|id| Post {
            id,
            title: format!("Post {}", id),
            content: "body".into(),
            author_id: (id % 3) + 1,
        })
        .collect();
    let comments: Vec<Comment> = (1..=posts)
        .flat_map(|post_id| {
            (0..per_post).map(move |n| Comment {
                id: (post_id - 1) * per_post + n + 1,
                text: format!("comment {} on {}", n, post_id),
                post_id,
                user_id: (n % 3) + 1,
                created_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            })
        })
        .collect();

    SeedData {
        users,
        posts: posts_rows,
        comments,
    }
}

const FEED_QUERY: &str =
    "{ posts { id title author { name } commentCount comments { id text createdAt author { name } } } }";

#[tokio::test]
async fn test_posts_are_public_and_ordered() {
    let executor = as_is();
    let response = executor
        .execute("{ posts { id author { email } } }", Viewer::Anonymous)
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let posts = data(&response)["posts"].clone();
    let ids: Vec<i64> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(posts[0]["author"]["email"], "john@example.com");
}

#[tokio::test]
async fn test_me_reflects_viewer() {
    let executor = as_is();

    let anonymous = executor.execute("{ me { id } }", Viewer::Anonymous).await;
    assert!(anonymous.errors.is_empty());
    assert_eq!(data(&anonymous), json!({ "me": null }));

    let authenticated = executor.execute("{ me { id email name } }", john()).await;
    assert_eq!(
        data(&authenticated),
        json!({ "me": { "id": 1, "email": "john@example.com", "name": "John Doe" } })
    );
}

#[tokio::test]
async fn test_login_mutation_casing() {
    let mutation = "mutation($email: String!) { login(email: $email, password: \"password123\") { token user { id } } }";

    for (behavior, email, succeeds) in [
        (Behavior::as_is(), "john@example.com", true),
        (Behavior::as_is(), "John@Example.com", false),
        (Behavior::as_is().with_email_match(EmailMatch::CaseInsensitive), "John@Example.com", true),
    ] {
        let executor = executor_with(default_seed(), behavior.with_delay(Duration::ZERO));
        let request = Request::new(mutation)
            .variables(Variables::from_json(json!({ "email": email })));
        let response = executor.execute(request, Viewer::Anonymous).await;

        if succeeds {
            assert!(response.errors.is_empty(), "{}: {:?}", email, response.errors);
            let token = data(&response)["login"]["token"].as_str().unwrap().to_string();
            assert_eq!(TokenCodec::new(SECRET).verify(&token), Some(1));
        } else {
            assert_eq!(response.errors[0].message, "Invalid credentials");
            assert_eq!(first_error_code(&response), "UNAUTHENTICATED");
            assert_eq!(data(&response), json!({ "login": null }));
        }
    }
}

#[tokio::test]
async fn test_add_comment_requires_viewer() {
    let executor = as_is();
    let mutation = "mutation { addComment(postId: 1, text: \"hello\") { id } }";

    let response = executor.execute(mutation, Viewer::Anonymous).await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "Failed to add comment");
    assert_eq!(executor.store().comments_for_post(1).unwrap().len(), 2);

    let fixed = executor_with(default_seed(), Behavior::fixed().with_delay(Duration::ZERO));
    let response = fixed.execute(mutation, Viewer::Anonymous).await;
    assert_eq!(response.errors[0].message, "Authentication required");
    assert_eq!(first_error_code(&response), "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_add_comment_uses_viewer_as_author() {
    let executor = as_is();
    let response = executor
        .execute(
            "mutation { addComment(postId: 2, text: \"Nice post\") { id text createdAt author { id name } } }",
            john(),
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let comment = data(&response)["addComment"].clone();
    assert_eq!(comment["id"], 7);
    assert_eq!(comment["author"], json!({ "id": 1, "name": "John Doe" }));
    assert!(comment["createdAt"].as_str().unwrap().ends_with('Z'));

    let stored = executor.store().comments_for_post(2).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].user_id, 1);
}

#[tokio::test]
async fn test_add_comment_text_validation() {
    let executor = as_is();

    let empty = executor
        .execute("mutation { addComment(postId: 1, text: \"\") { id } }", john())
        .await;
    assert_eq!(empty.errors[0].message, "Comment text is required");
    assert_eq!(first_error_code(&empty), "BAD_USER_INPUT");

    let blank = executor
        .execute("mutation { addComment(postId: 1, text: \"   \") { text } }", john())
        .await;
    assert!(blank.errors.is_empty());
    assert_eq!(data(&blank), json!({ "addComment": { "text": "   " } }));
}

#[tokio::test]
async fn test_orphan_comment_is_accepted_but_unreachable() {
    let executor = as_is();
    let response = executor
        .execute("mutation { addComment(postId: 999, text: \"lost\") { id } }", john())
        .await;
    assert!(response.errors.is_empty());

    let feed = executor.execute(FEED_QUERY, Viewer::Anonymous).await;
    let texts = data(&feed).to_string();
    assert!(!texts.contains("lost"));
}

#[tokio::test]
async fn test_comment_count_matches_comments() {
    for mode in [ResolverMode::PerRow, ResolverMode::Batched] {
        let executor = executor_with(
            default_seed(),
            Behavior::as_is()
                .with_delay(Duration::ZERO)
                .with_resolver_mode(mode),
        );
        executor
            .execute("mutation { addComment(postId: 3, text: \"+1\") { id } }", john())
            .await;

        let response = executor.execute(FEED_QUERY, Viewer::Anonymous).await;
        for post in data(&response)["posts"].as_array().unwrap() {
            let listed = post["comments"].as_array().unwrap().len() as i64;
            assert_eq!(post["commentCount"].as_i64().unwrap(), listed, "{:?}", mode);
        }
    }
}

#[tokio::test]
async fn test_dangling_author_resolves_to_null() {
    let mut seed = default_seed();
    seed.posts[0].author_id = 77;
    let executor = executor_with(seed, Behavior::as_is().with_delay(Duration::ZERO));

    let response = executor
        .execute("{ posts { id author { name } } }", Viewer::Anonymous)
        .await;

    assert!(response.errors.is_empty());
    assert_eq!(data(&response)["posts"][0]["author"], Value::Null);
}

#[tokio::test]
async fn test_per_row_mode_is_n_plus_one() {
    let (posts, per_post) = (4_u64, 3_u64);
    let query = "{ posts { id comments { id author { name } } } }";

    let naive = executor_with(
        grid_seed(posts as i32, per_post as i32),
        Behavior::as_is()
            .with_delay(Duration::ZERO)
            .with_resolver_mode(ResolverMode::PerRow),
    );
    let before = naive.store().access_count();
    let naive_response = naive.execute(query, Viewer::Anonymous).await;
    let naive_accesses = naive.store().access_count() - before;

    let batched = executor_with(
        grid_seed(posts as i32, per_post as i32),
        Behavior::as_is()
            .with_delay(Duration::ZERO)
            .with_resolver_mode(ResolverMode::Batched),
    );
    let before = batched.store().access_count();
    let batched_response = batched.execute(query, Viewer::Anonymous).await;
    let batched_accesses = batched.store().access_count() - before;

    assert!(naive_response.errors.is_empty());
    assert!(batched_response.errors.is_empty());
    assert!(
        naive_accesses >= posts + posts * per_post,
        "per-row accesses: {}",
        naive_accesses
    );
    assert!(
        batched_accesses <= posts + 1,
        "batched accesses: {}",
        batched_accesses
    );
    assert_eq!(
        serde_json::to_string(&naive_response.data).unwrap(),
        serde_json::to_string(&batched_response.data).unwrap()
    );
}

#[tokio::test]
async fn test_sdl_matches_client_contract() {
    let sdl = as_is().sdl();

    for fragment in [
        "posts: [Post!]!",
        "me: User",
        "login(email: String!, password: String!): AuthPayload",
        "addComment(postId: Int!, text: String!): Comment",
        "commentCount: Int!",
        "createdAt: String!",
    ] {
        assert!(sdl.contains(fragment), "missing `{}` in\n{}", fragment, sdl);
    }
    assert!(!sdl.contains("password: String!\n"));
}

#[tokio::test(start_paused = true)]
async fn test_resolver_delay_is_applied_per_level() {
    let delay = Duration::from_millis(40);
    let query = "{ posts { id comments { id author { name } } } }";

    for mode in [ResolverMode::PerRow, ResolverMode::Batched] {
        let executor = executor_with(
            grid_seed(3, 2),
            Behavior::as_is().with_delay(delay).with_resolver_mode(mode),
        );

        let started = tokio::time::Instant::now();
        let response = executor.execute(query, Viewer::Anonymous).await;
        let elapsed = started.elapsed();

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        // One delay for the comments level, one for the comment authors.
        assert!(elapsed >= delay * 2, "{:?}: {:?}", mode, elapsed);
        assert!(elapsed < delay * 3, "{:?}: {:?}", mode, elapsed);
    }
}
