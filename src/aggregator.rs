use std::sync::Arc;

use chrono::{Datelike, Utc};
use futures::future::join_all;

use crate::github::{ContributionSource, GitHubClient};
use crate::interests::trending_interests;
use crate::models::{Event, MostActiveRepo, ProfileStats, Repository, Snapshot};
use crate::stats::{activity_timeline, coding_patterns, language_shares, rank_tags};

const MOST_ACTIVE_CANDIDATES: usize = 8;
const MOST_ACTIVE_LIMIT: usize = 4;

pub struct Aggregator {
    github: Arc<GitHubClient>,
    contributions: Arc<dyn ContributionSource>,
}

impl Aggregator {
    pub fn new(github: GitHubClient, contributions: impl ContributionSource + 'static) -> Self {
        Self {
            github: Arc::new(github),
            contributions: Arc::new(contributions),
        }
    }

    pub fn username(&self) -> &str {
        self.github.username()
    }

    /// One full aggregation pass. The seven independent legs run
    /// concurrently and each degrades on its own, so a snapshot always
    /// assembles no matter which upstream calls failed.
    pub async fn snapshot(&self) -> Snapshot {
        tracing::info!("Aggregating GitHub data for: {}", self.username());

        let (user, repos, events, yearly_total, contribution_graph, trending, external_prs) = tokio::join!(
            self.github.get_user(),
            self.github.get_repos(),
            self.github.get_events(),
            self.contributions.yearly_total(),
            self.contributions.calendar(),
            trending_interests(&self.github),
            self.external_merged_pr_count(),
        );

        tracing::info!(
            "Fetched {} repositories and {} events",
            repos.len(),
            events.len()
        );

        let most_active = self.most_active_repos(&repos).await;
        let prs_this_year = prs_this_year(&events, Utc::now().year());

        Snapshot {
            stats: ProfileStats {
                repos: user.public_repos,
                followers: user.followers,
                contributions: yearly_total,
                commits_this_year: yearly_total,
                prs_this_year,
            },
            languages: language_shares(&repos),
            activity: activity_timeline(&events, self.username()),
            most_active,
            coding_patterns: coding_patterns(&events),
            trending_interests: trending,
            contribution_graph,
            repo_count: user.public_repos,
            followers: user.followers,
            avatar_url: user.avatar_url,
            repo_tags: rank_tags(&repos),
            external_prs_merged: external_prs,
        }
    }

    // Merged PRs authored by the user in repositories they do not own.
    async fn external_merged_pr_count(&self) -> u64 {
        let username = self.username();
        let query = format!("type:pr author:{} is:merged -user:{}", username, username);
        self.github.search_issue_count(&query).await
    }

    /// Top repositories by verified commit count: the eight most recently
    /// pushed non-forks are checked against the contributors endpoint, and
    /// the four busiest with a non-zero count survive.
    async fn most_active_repos(&self, repos: &[Repository]) -> Vec<MostActiveRepo> {
        let mut candidates: Vec<&Repository> = repos.iter().filter(|r| !r.fork).collect();
        candidates.sort_by(|a, b| b.pushed_at.cmp(&a.pushed_at));
        candidates.truncate(MOST_ACTIVE_CANDIDATES);

        let fetches = candidates.into_iter().map(|repo| async move {
            MostActiveRepo {
                name: repo.name.clone(),
                commits: self.github.contributor_commit_count(&repo.name).await,
                pushed_at: repo.pushed_at,
            }
        });

        let mut active: Vec<MostActiveRepo> = join_all(fetches)
            .await
            .into_iter()
            .filter(|repo| repo.commits > 0)
            .collect();
        active.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.name.cmp(&b.name)));
        active.truncate(MOST_ACTIVE_LIMIT);
        active
    }
}

/// Pull-request events dated in `year` whose action is opened or closed.
/// A PR both opened and closed inside the feed window counts twice.
pub fn prs_this_year(events: &[Event], year: i32) -> u32 {
    events
        .iter()
        .filter(|e| e.created_at.year() == year)
        .filter(|e| e.is_pull_request())
        .filter(|e| matches!(e.payload.action.as_deref(), Some("opened") | Some("closed")))
        .count() as u32
}
