use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

pub type UserId = i32;

/// Stored account. The password is compared verbatim and never leaves the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
}

/// Sanitized user view exposed over GraphQL and carried in the request context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "User")]
pub struct UserInfo {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Result of a successful `login` mutation.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserInfo,
}
