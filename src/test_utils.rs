//! In-memory comment store for exercising the comment manager without GitHub

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::context::ActionContext;
use crate::git::{
    COMMENTS_PER_PAGE, CommentReader, CommentWriter, GitHubApiError, GitHubClient, ThreadComment,
};
use crate::reaction::Reaction;

/// A store call, recorded in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    ListComments { issue_number: u64, page: u32 },
    CreateComment { issue_number: u64, body: String },
    UpdateComment { comment_id: u64, body: String },
    DeleteComment { comment_id: u64 },
    CreateReaction { comment_id: u64, reaction: Reaction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
    React,
}

/// Thread comments keyed by issue number, with call tracking and failure injection.
#[derive(Clone)]
pub struct MockGitHubThread {
    threads: Arc<Mutex<HashMap<u64, Vec<ThreadComment>>>>,
    reactions: Arc<Mutex<Vec<(u64, Reaction)>>>,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    failures: Arc<Mutex<HashSet<Operation>>>,
    next_id: Arc<AtomicU64>,
}

impl MockGitHubThread {
    pub fn new() -> Self {
        Self {
            threads: Arc::new(Mutex::new(HashMap::new())),
            reactions: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(HashSet::new())),
            next_id: Arc::new(AtomicU64::new(1000)),
        }
    }

    /// Seed an existing comment. Seeded and created ids count up from 1000.
    pub fn with_comment(self, issue_number: u64, body: &str) -> Self {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.threads
            .lock()
            .unwrap()
            .entry(issue_number)
            .or_default()
            .push(comment(id, body));
        self
    }

    pub fn with_failure(self, operation: Operation) -> Self {
        self.failures.lock().unwrap().insert(operation);
        self
    }

    pub fn comments(&self, issue_number: u64) -> Vec<ThreadComment> {
        self.threads
            .lock()
            .unwrap()
            .get(&issue_number)
            .cloned()
            .unwrap_or_default()
    }

    pub fn reactions(&self) -> Vec<(u64, Reaction)> {
        self.reactions.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, operation: Operation) -> Result<(), GitHubApiError> {
        if self.failures.lock().unwrap().contains(&operation) {
            Err(GitHubApiError::InvalidResponse(format!(
                "simulated {operation:?} failure"
            )))
        } else {
            Ok(())
        }
    }
}

fn comment(id: u64, body: &str) -> ThreadComment {
    ThreadComment {
        id,
        body: Some(body.to_string()),
        html_url: Some(format!(
            "https://github.com/octo/hello/pull/1#issuecomment-{id}"
        )),
    }
}

impl CommentReader for MockGitHubThread {
    async fn list_comments_page(
        &self,
        issue_number: u64,
        page: u32,
    ) -> Result<Vec<ThreadComment>, GitHubApiError> {
        self.record(StoreCall::ListComments { issue_number, page });
        self.check(Operation::List)?;

        let start = (page as usize - 1) * COMMENTS_PER_PAGE;
        Ok(self
            .comments(issue_number)
            .into_iter()
            .skip(start)
            .take(COMMENTS_PER_PAGE)
            .collect())
    }
}

impl CommentWriter for MockGitHubThread {
    async fn create_comment(
        &self,
        issue_number: u64,
        body: &str,
    ) -> Result<ThreadComment, GitHubApiError> {
        self.record(StoreCall::CreateComment {
            issue_number,
            body: body.to_string(),
        });
        self.check(Operation::Create)?;

        let created = comment(self.next_id.fetch_add(1, Ordering::SeqCst), body);
        self.threads
            .lock()
            .unwrap()
            .entry(issue_number)
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn update_comment(
        &self,
        comment_id: u64,
        body: &str,
    ) -> Result<ThreadComment, GitHubApiError> {
        self.record(StoreCall::UpdateComment {
            comment_id,
            body: body.to_string(),
        });
        self.check(Operation::Update)?;

        let mut threads = self.threads.lock().unwrap();
        let existing = threads
            .values_mut()
            .flat_map(|comments| comments.iter_mut())
            .find(|c| c.id == comment_id)
            .ok_or_else(|| GitHubApiError::InvalidResponse("Not Found".to_string()))?;
        existing.body = Some(body.to_string());
        Ok(existing.clone())
    }

    async fn delete_comment(&self, comment_id: u64) -> Result<(), GitHubApiError> {
        self.record(StoreCall::DeleteComment { comment_id });
        self.check(Operation::Delete)?;

        let mut threads = self.threads.lock().unwrap();
        for comments in threads.values_mut() {
            comments.retain(|c| c.id != comment_id);
        }
        Ok(())
    }

    async fn create_reaction(
        &self,
        comment_id: u64,
        reaction: Reaction,
    ) -> Result<(), GitHubApiError> {
        self.record(StoreCall::CreateReaction {
            comment_id,
            reaction,
        });
        self.check(Operation::React)?;

        self.reactions.lock().unwrap().push((comment_id, reaction));
        Ok(())
    }
}

/// Client for `o/r` pointed at a local server, behind an enterprise style `/api/v3` prefix.
pub fn github_client_for(server: &wiremock::MockServer) -> GitHubClient {
    let context = ActionContext::new("o/r", format!("{}/api/v3", server.uri())).unwrap();
    GitHubClient::new(&context, "test-token".to_string()).unwrap()
}
