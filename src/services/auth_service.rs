use crate::config::EmailMatch;
use crate::database::MemoryStore;
use crate::models::{AuthPayload, UserInfo};
use crate::utils::AppError;

use super::TokenCodec;

// User login
//
// Unknown email and wrong password produce the same error.
pub fn login(
    store: &MemoryStore,
    codec: &TokenCodec,
    email: &str,
    password: &str,
    email_match: EmailMatch,
) -> Result<AuthPayload, AppError> {
    let user = store
        .find_user_by_credentials(email, password, email_match)?
        .ok_or(AppError::InvalidCredentials)?;

    let token = codec.issue(user.id)?;

    Ok(AuthPayload {
        token,
        user: UserInfo::from(user),
    })
}
