use octocrab::Octocrab;

pub(crate) mod api;
pub(crate) mod auth;

pub use api::{
    COMMENTS_PER_PAGE, CommentReader, CommentStore, CommentWriter, GitHubApiError, ThreadComment,
};
pub use auth::{AuthError, DEFAULT_API_URL, create_authenticated_client, get_token};

use crate::context::ActionContext;

/// Authenticated handle on a single repository's issue comments.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    pub(crate) owner: String,
    pub(crate) repo: String,
    pub(crate) octocrab: Octocrab,
}

impl GitHubClient {
    pub fn new(context: &ActionContext, token: String) -> Result<Self, AuthError> {
        let octocrab = create_authenticated_client(&context.api_url, token)?;

        log::debug!(
            "Initialized GitHub client for {}/{}",
            context.owner,
            context.repo
        );

        Ok(Self {
            owner: context.owner.clone(),
            repo: context.repo.clone(),
            octocrab,
        })
    }
}
