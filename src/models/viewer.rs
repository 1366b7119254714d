use super::UserInfo;

/// Who is making the current request.
///
/// Credential failures never surface as errors; they produce `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Viewer {
    Authenticated(UserInfo),
    #[default]
    Anonymous,
}

impl Viewer {
    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            Viewer::Authenticated(user) => Some(user),
            Viewer::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::Authenticated(_))
    }
}
