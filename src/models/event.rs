use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    pub commits: Option<Vec<CommitStub>>,
    pub size: Option<u32>,
    pub ref_type: Option<String>,
    pub action: Option<String>,
    pub pull_request: Option<PullRequestStub>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitStub {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestStub {
    #[serde(default)]
    pub merged: bool,
}

impl Event {
    pub fn is_push(&self) -> bool {
        self.kind == "PushEvent"
    }

    pub fn is_repo_creation(&self) -> bool {
        self.kind == "CreateEvent" && self.payload.ref_type.as_deref() == Some("repository")
    }

    pub fn is_pull_request(&self) -> bool {
        self.kind == "PullRequestEvent"
    }

    /// Commit weight of a push: the commit list length when present (a
    /// present-but-empty list counts as zero), else the reported push
    /// size, else 1.
    pub fn commit_weight(&self) -> u32 {
        self.payload
            .commits
            .as_ref()
            .map(|c| c.len() as u32)
            .or(self.payload.size)
            .unwrap_or(1)
    }

    /// Repository name with the owner's `{username}/` prefix stripped.
    /// Names under other owners come back unchanged.
    pub fn local_repo_name<'a>(&'a self, username: &str) -> &'a str {
        self.repo
            .name
            .strip_prefix(username)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(&self.repo.name)
    }
}
