use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use regex::Regex;
use reqwest::Client;

use crate::error::Result;
use crate::models::ContributionDay;

const GITHUB_WEB: &str = "https://github.com";
const MAX_LEVEL: u8 = 4;

static TOTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s*(\d+)\s+contributions\s+in\s+\d{4}").expect("invalid regex"));

static DAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-date="(\d{4}-\d{2}-\d{2})"[^>]*data-level="(\d)""#).expect("invalid regex")
});

/// Where contribution figures come from. The production source scrapes the
/// public profile page; tests substitute fixtures.
#[async_trait]
pub trait ContributionSource: Send + Sync {
    /// Total contributions in the current UTC year; zero when unknown.
    async fn yearly_total(&self) -> u32;

    /// Per-day heat levels for the current UTC year, ascending by date;
    /// empty when unknown.
    async fn calendar(&self) -> Vec<ContributionDay>;
}

/// Reads the contribution widget off the public profile page, which needs
/// no token and is not metered like the REST API.
pub struct ScrapedContributions {
    client: Client,
    base_url: String,
    username: String,
}

impl ScrapedContributions {
    pub fn new(username: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent("gitfolio/0.1").build()?;

        Ok(Self {
            client,
            base_url: GITHUB_WEB.to_string(),
            username: username.into(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_page(&self) -> Option<String> {
        let year = Utc::now().year();
        let url = format!(
            "{}/users/{}/contributions?from={}-01-01&to={}-12-31",
            self.base_url, self.username, year, year
        );

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("Contribution page request failed: {}", err);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Contribution page returned {}", response.status());
            return None;
        }

        match response.text().await {
            Ok(html) => Some(html),
            Err(err) => {
                tracing::warn!("Contribution page body unreadable: {}", err);
                None
            }
        }
    }
}

#[async_trait]
impl ContributionSource for ScrapedContributions {
    async fn yearly_total(&self) -> u32 {
        match self.fetch_page().await {
            Some(html) => parse_yearly_total(&html),
            None => 0,
        }
    }

    async fn calendar(&self) -> Vec<ContributionDay> {
        match self.fetch_page().await {
            Some(html) => parse_calendar(&html),
            None => Vec::new(),
        }
    }
}

pub fn parse_yearly_total(html: &str) -> u32 {
    TOTAL_REGEX
        .captures(html)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

pub fn parse_calendar(html: &str) -> Vec<ContributionDay> {
    let mut days: Vec<ContributionDay> = DAY_REGEX
        .captures_iter(html)
        .filter_map(|caps| {
            let date = caps[1].parse().ok()?;
            let level: u8 = caps[2].parse().ok()?;
            Some(ContributionDay {
                date,
                level: level.min(MAX_LEVEL),
            })
        })
        .collect();

    // The page lays cells out by weekday row, not by date.
    days.sort_by_key(|day| day.date);
    days
}
