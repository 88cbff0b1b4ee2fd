use serde::Deserialize;
use std::future::Future;

use super::GitHubApiError;
use crate::git::GitHubClient;

/// Maximum page size accepted by the issue comments endpoint
pub const COMMENTS_PER_PAGE: usize = 100;

/// A comment on an issue or pull request thread
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThreadComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl ThreadComment {
    pub fn contains(&self, pattern: &str) -> bool {
        self.body
            .as_deref()
            .is_some_and(|body| body.contains(pattern))
    }
}

pub trait CommentReader {
    /// Fetch one page (1-based) of a thread's comments in ascending creation order.
    fn list_comments_page(
        &self,
        issue_number: u64,
        page: u32,
    ) -> impl Future<Output = Result<Vec<ThreadComment>, GitHubApiError>> + Send;
}

impl CommentReader for GitHubClient {
    fn list_comments_page(
        &self,
        issue_number: u64,
        page: u32,
    ) -> impl Future<Output = Result<Vec<ThreadComment>, GitHubApiError>> + Send {
        let octocrab = self.octocrab.clone();
        let owner = self.owner.clone();
        let repo = self.repo.clone();

        async move {
            log::debug!(
                "Fetching comments page {} for issue #{} in {}/{}",
                page,
                issue_number,
                owner,
                repo
            );

            let url = format!(
                "/repos/{}/{}/issues/{}/comments?per_page={}&page={}",
                &owner, &repo, issue_number, COMMENTS_PER_PAGE, page
            );

            let comments: Vec<ThreadComment> = octocrab
                .get(url, None::<&()>)
                .await
                .map_err(GitHubApiError::APIError)?;

            log::debug!("Fetched {} comments on page {}", comments.len(), page);
            Ok(comments)
        }
    }
}
