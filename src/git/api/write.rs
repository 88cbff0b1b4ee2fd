use std::future::Future;

use octocrab::models::CommentId;

use super::{GitHubApiError, ThreadComment};
use crate::git::GitHubClient;
use crate::reaction::Reaction;

pub trait CommentWriter {
    fn create_comment(
        &self,
        issue_number: u64,
        body: &str,
    ) -> impl Future<Output = Result<ThreadComment, GitHubApiError>> + Send;

    fn update_comment(
        &self,
        comment_id: u64,
        body: &str,
    ) -> impl Future<Output = Result<ThreadComment, GitHubApiError>> + Send;

    fn delete_comment(
        &self,
        comment_id: u64,
    ) -> impl Future<Output = Result<(), GitHubApiError>> + Send;

    fn create_reaction(
        &self,
        comment_id: u64,
        reaction: Reaction,
    ) -> impl Future<Output = Result<(), GitHubApiError>> + Send;
}

impl CommentWriter for GitHubClient {
    fn create_comment(
        &self,
        issue_number: u64,
        body: &str,
    ) -> impl Future<Output = Result<ThreadComment, GitHubApiError>> + Send {
        let octocrab = self.octocrab.clone();
        let owner = self.owner.clone();
        let repo = self.repo.clone();
        let body = body.to_string();

        async move {
            log::debug!(
                "Posting comment to issue #{} in {}/{}",
                issue_number,
                owner,
                repo
            );

            let request = serde_json::json!({ "body": body });
            let comment: ThreadComment = octocrab
                .post(
                    format!("/repos/{}/{}/issues/{}/comments", &owner, &repo, issue_number),
                    Some(&request),
                )
                .await
                .map_err(GitHubApiError::APIError)?;

            log::debug!(
                "Successfully posted comment {} to issue #{} in {}/{}",
                comment.id,
                issue_number,
                owner,
                repo
            );

            Ok(comment)
        }
    }

    fn update_comment(
        &self,
        comment_id: u64,
        body: &str,
    ) -> impl Future<Output = Result<ThreadComment, GitHubApiError>> + Send {
        let octocrab = self.octocrab.clone();
        let owner = self.owner.clone();
        let repo = self.repo.clone();
        let body = body.to_string();

        async move {
            log::debug!("Updating comment {} in {}/{}", comment_id, owner, repo);

            let request = serde_json::json!({ "body": body });
            let comment: ThreadComment = octocrab
                .patch(
                    format!("/repos/{}/{}/issues/comments/{}", &owner, &repo, comment_id),
                    Some(&request),
                )
                .await
                .map_err(GitHubApiError::APIError)?;

            if comment.id != comment_id {
                return Err(GitHubApiError::InvalidResponse(format!(
                    "updated comment {} but GitHub returned comment {}",
                    comment_id, comment.id
                )));
            }

            log::debug!("Successfully updated comment {}", comment_id);
            Ok(comment)
        }
    }

    fn delete_comment(
        &self,
        comment_id: u64,
    ) -> impl Future<Output = Result<(), GitHubApiError>> + Send {
        let octocrab = self.octocrab.clone();
        let owner = self.owner.clone();
        let repo = self.repo.clone();

        async move {
            log::debug!("Deleting comment {} in {}/{}", comment_id, owner, repo);

            octocrab
                .issues(&owner, &repo)
                .delete_comment(CommentId::from(comment_id))
                .await
                .map_err(GitHubApiError::APIError)?;

            log::debug!("Successfully deleted comment {}", comment_id);
            Ok(())
        }
    }

    fn create_reaction(
        &self,
        comment_id: u64,
        reaction: Reaction,
    ) -> impl Future<Output = Result<(), GitHubApiError>> + Send {
        let octocrab = self.octocrab.clone();
        let owner = self.owner.clone();
        let repo = self.repo.clone();

        async move {
            log::debug!(
                "Adding reaction '{}' to comment {} in {}/{}",
                reaction,
                comment_id,
                owner,
                repo
            );

            let request = serde_json::json!({ "content": reaction.as_str() });
            let _: serde_json::Value = octocrab
                .post(
                    format!(
                        "/repos/{}/{}/issues/comments/{}/reactions",
                        &owner, &repo, comment_id
                    ),
                    Some(&request),
                )
                .await
                .map_err(GitHubApiError::APIError)?;

            Ok(())
        }
    }
}
