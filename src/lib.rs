mod context;
mod git;
mod message;
mod reaction;
mod report;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

pub use context::{ActionContext, ContextError};
pub use git::{
    AuthError, COMMENTS_PER_PAGE, CommentReader, CommentStore, CommentWriter, DEFAULT_API_URL,
    GitHubApiError, GitHubClient, ThreadComment, create_authenticated_client, get_token,
};
pub use message::{CommentManager, DEFAULT_COMMENT_TAG, Mode, ModeError, comment_marker};
pub use reaction::{Reaction, UnknownReaction, parse_reactions};
pub use report::{ActionsReporter, Reporter};
