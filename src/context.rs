use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::git::DEFAULT_API_URL;
use crate::utils::EnvProvider;

/// Repository coordinates and thread number a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    pub owner: String,
    pub repo: String,
    pub api_url: String,
    pub issue_number: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<NumberedEntity>,
    issue: Option<NumberedEntity>,
}

#[derive(Debug, Deserialize)]
struct NumberedEntity {
    number: u64,
}

impl EventPayload {
    fn from_path(path: impl AsRef<Path>) -> Result<Self, ContextError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    // pull request takes precedence over issue, matching `issue_comment` on PRs
    fn issue_number(&self) -> Option<u64> {
        self.pull_request
            .as_ref()
            .or(self.issue.as_ref())
            .map(|entity| entity.number)
    }
}

impl ActionContext {
    pub fn new(repository: &str, api_url: impl Into<String>) -> Result<Self, ContextError> {
        let (owner, repo) = parse_repository(repository)?;
        Ok(Self {
            owner,
            repo,
            api_url: api_url.into(),
            issue_number: None,
        })
    }

    /// Build the context from the GitHub Actions runner environment.
    ///
    /// `repository` overrides `GITHUB_REPOSITORY`. A missing `GITHUB_EVENT_PATH` leaves
    /// the issue number unset; an event file that exists but cannot be read or parsed
    /// is an error.
    pub fn from_env(env: &impl EnvProvider, repository: Option<&str>) -> Result<Self, ContextError> {
        let repository = match repository {
            Some(repository) => repository.to_string(),
            None => env
                .var("GITHUB_REPOSITORY")
                .map_err(|_| ContextError::NoRepository)?,
        };
        let api_url = env
            .var("GITHUB_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut context = Self::new(&repository, api_url)?;

        match env.var("GITHUB_EVENT_PATH") {
            Ok(event_path) if !event_path.is_empty() => {
                log::debug!("Reading event payload from {}", event_path);
                context.issue_number = EventPayload::from_path(&event_path)?.issue_number();
            }
            _ => log::debug!("GITHUB_EVENT_PATH not set. No issue number from event"),
        }

        log::debug!(
            "Resolved context {}/{} (issue: {:?})",
            context.owner,
            context.repo,
            context.issue_number
        );
        Ok(context)
    }

    /// Explicit number wins over whatever the event payload provided.
    pub fn with_issue_number(mut self, issue_number: Option<u64>) -> Self {
        if issue_number.is_some() {
            self.issue_number = issue_number;
        }
        self
    }
}

fn parse_repository(repository: &str) -> Result<(String, String), ContextError> {
    match repository.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ContextError::InvalidRepository(repository.to_string())),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ContextError {
    #[error("GITHUB_REPOSITORY is not set. Provide --repository as owner/repo")]
    NoRepository,
    #[error("Invalid repository '{0}'. Expected owner/repo")]
    InvalidRepository(String),
    #[error("Failed to read event payload: {0}")]
    EventRead(#[from] std::io::Error),
    #[error("Failed to parse event payload: {0}")]
    EventParse(#[from] serde_json::Error),
}
