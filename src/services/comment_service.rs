use crate::config::Behavior;
use crate::database::MemoryStore;
use crate::models::{Comment, PostId, Viewer};
use crate::utils::AppError;

/// Creates a comment on behalf of the viewer.
///
/// The author is always the viewer; the post id is not checked. With
/// `explain_auth_errors` off, an anonymous caller gets a generic error that
/// does not mention authentication. With `trim_comment_text` off, only the
/// empty string is rejected.
pub fn add_comment(
    store: &MemoryStore,
    viewer: &Viewer,
    behavior: &Behavior,
    post_id: PostId,
    text: &str,
) -> Result<Comment, AppError> {
    let Some(user) = viewer.user() else {
        return Err(if behavior.explain_auth_errors {
            AppError::Unauthenticated
        } else {
            AppError::CommentRejected
        });
    };

    let text = if behavior.trim_comment_text { text.trim() } else { text };
    if text.is_empty() {
        return Err(AppError::EmptyCommentText);
    }

    let comment = store.add_comment(post_id, user.id, text)?;
    log::info!("💬 Comment {} added to post {} by user {}", comment.id, post_id, user.id);

    Ok(comment)
}
