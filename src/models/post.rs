use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use super::UserId;

pub type PostId = i32;

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    #[graphql(skip)]
    pub author_id: UserId,
}
