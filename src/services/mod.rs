pub mod auth_service;
pub mod comment_service;
pub mod context_service;
pub mod token_service;

pub use context_service::ContextBuilder;
pub use token_service::TokenCodec;
