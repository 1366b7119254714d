pub mod comment;
pub mod post;
pub mod user;
pub mod viewer;

pub use comment::*;
pub use post::*;
pub use user::*;
pub use viewer::*;
