use chrono::{DateTime, TimeZone, Utc};

use crate::database::{MemoryStore, SeedData};
use crate::models::{Comment, Post, User};

/// Builds the store every process starts with. Restarting resets all data.
pub fn seed_default_store() -> MemoryStore {
    let seed = default_seed();
    log::info!(
        "🌱 Seeding store: {} users, {} posts, {} comments",
        seed.users.len(),
        seed.posts.len(),
        seed.comments.len()
    );
    MemoryStore::new(seed)
}

/// Fixed demo rows. Identical on every call.
pub fn default_seed() -> SeedData {
    SeedData {
        users: default_users(),
        posts: default_posts(),
        comments: default_comments(),
    }
}

fn default_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            email: "john@example.com".into(),
            password: "password123".into(),
            name: "John Doe".into(),
        },
        User {
            id: 2,
            email: "jane@example.com".into(),
            password: "password456".into(),
            name: "Jane Smith".into(),
        },
        User {
            id: 3,
            email: "bob@example.com".into(),
            password: "password789".into(),
            name: "Bob Wilson".into(),
        },
    ]
}

fn default_posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            title: "Getting Started with GraphQL".into(),
            content: "GraphQL lets clients ask for exactly the fields they need, nothing more.".into(),
            author_id: 1,
        },
        Post {
            id: 2,
            title: "Understanding React Hooks".into(),
            content: "Hooks let function components hold state and run side effects.".into(),
            author_id: 2,
        },
        Post {
            id: 3,
            title: "Debugging Performance Issues".into(),
            content: "Slow pages are usually slow queries. Measure before you optimize.".into(),
            author_id: 1,
        },
        Post {
            id: 4,
            title: "Writing Helpful Error Messages".into(),
            content: "An error message should tell the user what went wrong and what to do next.".into(),
            author_id: 3,
        },
    ]
}

fn default_comments() -> Vec<Comment> {
    vec![
        comment(1, "Great introduction, thanks!", 1, 2, at(2024, 1, 15, 10, 30)),
        comment(2, "Could you cover subscriptions next?", 1, 3, at(2024, 1, 15, 12, 5)),
        comment(3, "useEffect finally makes sense to me.", 2, 1, at(2024, 1, 16, 9, 0)),
        comment(4, "The N+1 section was eye-opening.", 3, 2, at(2024, 1, 17, 14, 45)),
        comment(5, "Any tips for profiling resolvers?", 3, 3, at(2024, 1, 17, 16, 20)),
        comment(6, "\"Something went wrong\" is my least favourite message.", 4, 1, at(2024, 1, 18, 8, 15)),
    ]
}

fn comment(id: i32, text: &str, post_id: i32, user_id: i32, created_at: DateTime<Utc>) -> Comment {
    Comment {
        id,
        text: text.to_string(),
        post_id,
        user_id,
        created_at,
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_references_are_consistent() {
        let seed = default_seed();
        let user_ids: HashSet<i32> = seed.users.iter().map(|u| u.id).collect();
        let post_ids: HashSet<i32> = seed.posts.iter().map(|p| p.id).collect();

        assert!(seed.posts.iter().all(|p| user_ids.contains(&p.author_id)));
        assert!(seed.comments.iter().all(|c| post_ids.contains(&c.post_id)));
        assert!(seed.comments.iter().all(|c| user_ids.contains(&c.user_id)));
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = default_seed();
        let b = default_seed();
        let stamps = |s: &SeedData| s.comments.iter().map(|c| c.created_at).collect::<Vec<_>>();
        assert_eq!(stamps(&a), stamps(&b));
        assert_eq!(a.comments[0].created_at.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }
}
