use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("GraphQL error: {}", .0.join("; "))]
    Graphql(Vec<String>),
    #[error("Response contained no data")]
    MissingData,
}
