use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub fork: bool,
    // Empty repositories report null here.
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoContributor {
    pub login: String,
    pub contributions: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoSearchResults {
    #[serde(default)]
    pub items: Vec<SearchRepo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRepo {
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub html_url: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueSearchResults {
    #[serde(default)]
    pub total_count: u64,
}
