use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The aggregation result, shaped exactly as the portfolio frontend
/// consumes it. Field names here are the wire contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub stats: ProfileStats,
    pub languages: Vec<LanguageStat>,
    pub activity: Vec<ActivityMonth>,
    pub most_active: Vec<MostActiveRepo>,
    pub coding_patterns: CodingPatterns,
    pub trending_interests: Vec<TrendingInterest>,
    pub contribution_graph: Vec<ContributionDay>,
    pub repo_count: u32,
    pub followers: u32,
    pub avatar_url: String,
    pub repo_tags: Vec<String>,
    #[serde(rename = "externalPRsMerged")]
    pub external_prs_merged: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub repos: u32,
    pub followers: u32,
    pub contributions: u32,
    pub commits_this_year: u32,
    pub prs_this_year: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityMonth {
    pub month: String,
    pub events: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub repos: Vec<ActivityRepo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Commits,
    Repos,
    Prs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRepo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostActiveRepo {
    pub name: String,
    pub commits: u32,
    pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingPatterns {
    pub total_events: u32,
    pub description: String,
    pub by_day: Vec<DayBucket>,
    pub by_time: Vec<TimeBucket>,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayBucket {
    pub day: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBucket {
    pub time: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingInterest {
    pub keyword: String,
    pub repos: Vec<TrendingRepo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingRepo {
    pub name: String,
    pub description: String,
    pub stars: u32,
    pub url: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub level: u8,
}
