use reqwest::{header, Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::models::{
    Event, IssueSearchResults, RepoContributor, RepoSearchResults, Repository, SearchRepo,
    UserProfile,
};

const GITHUB_API: &str = "https://api.github.com";
const EVENTS_PER_PAGE: u32 = 100;
const EVENTS_MAX_PAGES: u32 = 3;

/// Thin wrappers over the handful of REST endpoints the aggregator reads.
/// Every public fetch degrades on failure (empty or zero value, logged at
/// warn) instead of surfacing an error; one missing leg must not take the
/// whole snapshot down.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    username: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitfolio/0.1"),
        );
        if let Some(token) = &config.github_token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: GITHUB_API.to_string(),
            username: config.username.clone(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub async fn get_user(&self) -> UserProfile {
        let url = format!("{}/users/{}", self.base_url, self.username);
        tracing::info!("Fetching user: {}", self.username);

        match self.get_json(&url).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!("User fetch failed, returning defaults: {}", err);
                UserProfile::default()
            }
        }
    }

    pub async fn get_repos(&self) -> Vec<Repository> {
        let url = format!(
            "{}/users/{}/repos?per_page=100&sort=pushed",
            self.base_url, self.username
        );
        tracing::info!("Fetching repositories for: {}", self.username);

        match self.get_json(&url).await {
            Ok(repos) => repos,
            Err(err) => {
                tracing::warn!("Repository fetch failed, returning none: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn get_events(&self) -> Vec<Event> {
        let url = format!("{}/users/{}/events", self.base_url, self.username);
        tracing::info!("Fetching event feed for: {}", self.username);

        Paginator::new(&self.client)
            .fetch_pages(&url, EVENTS_PER_PAGE, EVENTS_MAX_PAGES)
            .await
    }

    /// The profile owner's commit count on one of their repositories, read
    /// from the first contributors page. A failed call, an absent owner, or
    /// an unexpected body all count as zero.
    pub async fn contributor_commit_count(&self, repo: &str) -> u32 {
        let url = format!(
            "{}/repos/{}/{}/contributors?per_page=1",
            self.base_url, self.username, repo
        );

        let contributors: Vec<RepoContributor> = match self.get_json(&url).await {
            Ok(contributors) => contributors,
            Err(err) => {
                tracing::debug!("Contributor fetch for {} failed: {}", repo, err);
                return 0;
            }
        };

        contributors
            .iter()
            .find(|c| c.login.eq_ignore_ascii_case(&self.username))
            .map(|c| c.contributions)
            .unwrap_or(0)
    }

    pub async fn search_repos(&self, query: &str, per_page: u32) -> Vec<SearchRepo> {
        let url = format!("{}/search/repositories", self.base_url);
        let request = self.client.get(&url).query(&[
            ("q", query),
            ("sort", "stars"),
            ("order", "desc"),
            ("per_page", &per_page.to_string()),
        ]);

        match send_json::<RepoSearchResults>(request).await {
            Ok(results) => results.items,
            Err(err) => {
                tracing::warn!("Repository search failed for {:?}: {}", query, err);
                Vec::new()
            }
        }
    }

    pub async fn search_issue_count(&self, query: &str) -> u64 {
        let url = format!("{}/search/issues", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("q", query), ("per_page", "1")]);

        match send_json::<IssueSearchResults>(request).await {
            Ok(results) => results.total_count,
            Err(err) => {
                tracing::warn!("Issue search failed for {:?}: {}", query, err);
                0
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        send_json(self.client.get(url)).await
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;

    if !response.status().is_success() {
        return Err(Error::GitHubApi(format!(
            "{} returned {}",
            response.url(),
            response.status()
        )));
    }

    Ok(response.json().await?)
}
