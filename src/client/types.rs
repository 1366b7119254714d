use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GraphqlEnvelope<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphqlErrorBody>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlErrorBody {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedUser {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedComment {
    pub id: i32,
    pub text: String,
    pub created_at: String,
    pub author: Option<FeedUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: Option<FeedUser>,
    pub comment_count: i32,
    pub comments: Vec<FeedComment>,
}

#[derive(Debug, Deserialize)]
pub struct FeedData {
    pub posts: Vec<FeedPost>,
}

#[derive(Debug, Deserialize)]
pub struct MeData {
    pub me: Option<FeedUser>,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub user: FeedUser,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub login: Option<LoginPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentData {
    pub add_comment: Option<FeedComment>,
}
