use std::fmt;
use std::str::FromStr;

use crate::git::{COMMENTS_PER_PAGE, CommentStore, GitHubApiError, ThreadComment};
use crate::reaction::parse_reactions;
use crate::report::Reporter;

pub const DEFAULT_COMMENT_TAG: &str = "execution";

const MISSING_MESSAGE: &str = "\"message\" should be provided";
const MISSING_ISSUE: &str = "No issue/pull request in input neither in current context.";

/// Hidden sentinel appended to every comment body this tool writes.
pub fn comment_marker(comment_tag: &str) -> String {
    format!("<!-- thollander/actions-comment-pull-request \"{comment_tag}\" -->")
}

/// What to do when the thread already has a marked comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Edit the existing comment in place.
    #[default]
    Upsert,
    /// Delete the existing comment and post a fresh one at the bottom of the thread.
    Recreate,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Upsert => "upsert",
            Mode::Recreate => "recreate",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ModeError {
    #[error("Mode {0} is unknown. Please use 'upsert' or 'recreate'.")]
    Unknown(String),
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upsert" => Ok(Mode::Upsert),
            "recreate" => Ok(Mode::Recreate),
            other => Err(ModeError::Unknown(other.to_string())),
        }
    }
}

/// Keeps a single marked comment on an issue or pull request thread in sync.
///
/// The marked comment is recognized by a substring search for the marker, so
/// finding it is a linear scan over the thread in creation order. If several
/// comments carry the marker only the oldest one is ever touched.
pub struct CommentManager<'a, S, R> {
    store: &'a S,
    reporter: &'a R,
    issue_number: Option<u64>,
    marker: String,
}

impl<'a, S: CommentStore, R: Reporter> CommentManager<'a, S, R> {
    pub fn new(store: &'a S, reporter: &'a R, issue_number: Option<u64>, comment_tag: &str) -> Self {
        Self {
            store,
            reporter,
            issue_number,
            marker: comment_marker(comment_tag),
        }
    }

    /// Create, update or recreate the marked comment and react to it.
    ///
    /// `mode` is only consulted once an existing comment has been found. Any
    /// failure, including GitHub errors, is sent to the reporter and never
    /// returned. Under [`Mode::Recreate`] a failed create after a successful
    /// delete leaves the thread without a marked comment.
    pub async fn post_message(&self, message: &str, reactions: &str, mode: &str) {
        if let Err(e) = self.sync_comment(message, reactions, mode).await {
            self.reporter.failed(&e.to_string());
        }
    }

    /// Delete the marked comment if there is one. Unlike [`post_message`](Self::post_message),
    /// GitHub errors are returned to the caller.
    pub async fn delete_message(&self) -> Result<(), GitHubApiError> {
        if let Some(comment) = self.find_comment().await? {
            self.store.delete_comment(comment.id).await?;
            log::info!("Deleted comment {}", comment.id);
        } else {
            log::debug!("No comment found with marker {}. Nothing to delete", self.marker);
        }
        Ok(())
    }

    async fn sync_comment(
        &self,
        message: &str,
        reactions: &str,
        mode: &str,
    ) -> Result<(), GitHubApiError> {
        if message.is_empty() {
            self.reporter.failed(MISSING_MESSAGE);
            return Ok(());
        }

        let Some(issue_number) = self.issue_number else {
            self.reporter.failed(MISSING_ISSUE);
            return Ok(());
        };

        let body = format!("{message}\n{}", self.marker);

        let Some(existing) = self.find_comment().await? else {
            self.reporter
                .info("No comment has been found with asked pattern. Creating a new comment.");
            let created = self.store.create_comment(issue_number, &body).await?;
            log_comment("Created", &created);
            self.add_reactions(created.id, reactions).await;
            return Ok(());
        };

        match mode.parse::<Mode>() {
            Ok(Mode::Upsert) => {
                let updated = self.store.update_comment(existing.id, &body).await?;
                log_comment("Updated", &updated);
                self.add_reactions(existing.id, reactions).await;
            }
            Ok(Mode::Recreate) => {
                self.store.delete_comment(existing.id).await?;
                log::debug!("Deleted comment {} before recreating it", existing.id);
                let created = self.store.create_comment(issue_number, &body).await?;
                log_comment("Recreated", &created);
                self.add_reactions(created.id, reactions).await;
            }
            Err(e) => self.reporter.failed(&e.to_string()),
        }

        Ok(())
    }

    /// First comment on the thread whose body contains the marker.
    ///
    /// Pages are fetched one at a time and the search stops at the first match; a
    /// short page is the last one.
    async fn find_comment(&self) -> Result<Option<ThreadComment>, GitHubApiError> {
        let Some(issue_number) = self.issue_number else {
            self.reporter.failed(MISSING_ISSUE);
            return Ok(None);
        };

        let mut page = 1;
        loop {
            let comments = self.store.list_comments_page(issue_number, page).await?;
            let fetched = comments.len();

            if let Some(comment) = comments.into_iter().find(|c| c.contains(&self.marker)) {
                log::debug!("Found comment {} on page {}", comment.id, page);
                return Ok(Some(comment));
            }

            if fetched < COMMENTS_PER_PAGE {
                log::debug!(
                    "No marked comment on issue #{} after {} page(s)",
                    issue_number,
                    page
                );
                return Ok(None);
            }
            page += 1;
        }
    }

    /// Best effort: every reaction call runs concurrently and failures are ignored.
    async fn add_reactions(&self, comment_id: u64, reactions: &str) {
        let reactions = parse_reactions(reactions);
        if reactions.is_empty() {
            return;
        }

        let reaction_futures = reactions
            .into_iter()
            .map(|reaction| async move {
                (
                    reaction,
                    self.store.create_reaction(comment_id, reaction).await,
                )
            })
            .collect::<Vec<_>>();

        for (reaction, result) in futures::future::join_all(reaction_futures).await {
            if let Err(e) = result {
                log::debug!("Could not add reaction '{}' to comment {}: {}", reaction, comment_id, e);
            }
        }
    }
}

fn log_comment(action: &str, comment: &ThreadComment) {
    match &comment.html_url {
        Some(url) => log::info!("{} comment {}: {}", action, comment.id, url),
        None => log::info!("{} comment {}", action, comment.id),
    }
}
