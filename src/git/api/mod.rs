mod read;
mod write;

pub use read::{COMMENTS_PER_PAGE, CommentReader, ThreadComment};
pub use write::CommentWriter;

/// Everything the comment manager needs from the remote comment store.
pub trait CommentStore: CommentReader + CommentWriter + Send + Sync {}

impl<T> CommentStore for T where T: CommentReader + CommentWriter + Send + Sync {}

#[derive(thiserror::Error, Debug)]
pub enum GitHubApiError {
    #[error("GitHub API URL access failed due to: {0}")]
    APIError(octocrab::Error),
    #[error("Unexpected response from GitHub: {0}")]
    InvalidResponse(String),
}
