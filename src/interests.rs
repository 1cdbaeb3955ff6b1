use chrono::{Duration, NaiveDate, Utc};
use futures::future::join_all;

use crate::github::GitHubClient;
use crate::models::{SearchRepo, TrendingInterest, TrendingRepo};

const REPOS_PER_INTEREST: u32 = 2;
const WINDOW_DAYS: i64 = 7;
const DESCRIPTION_CHARS: usize = 100;

pub struct InterestQuery {
    pub keyword: &'static str,
    pub query: &'static str,
}

/// The interest panel: one search per keyword, scoped to repositories
/// created inside the trailing window.
pub const INTEREST_QUERIES: &[InterestQuery] = &[
    InterestQuery {
        keyword: "AI Agents",
        query: "ai-agent OR ai-agents OR autonomous-agent",
    },
    InterestQuery {
        keyword: "LLMs",
        query: "llm OR large-language-model",
    },
    InterestQuery {
        keyword: "MCP Servers",
        query: "mcp-server OR model-context-protocol",
    },
    InterestQuery {
        keyword: "RAG",
        query: "retrieval-augmented-generation OR rag-pipeline",
    },
    InterestQuery {
        keyword: "Gemini",
        query: "gemini-api OR google-gemini",
    },
    InterestQuery {
        keyword: "OpenAI",
        query: "openai OR gpt-4 OR chatgpt-api",
    },
    InterestQuery {
        keyword: "Anthropic",
        query: "anthropic OR claude-ai OR claude-api",
    },
    InterestQuery {
        keyword: "Microservices",
        query: "microservices OR microservice",
    },
    InterestQuery {
        keyword: "System Design",
        query: "system-design OR distributed-systems",
    },
    InterestQuery {
        keyword: "Open Source",
        query: "open-source OR hacktoberfest",
    },
];

/// Star-ranked young repositories for every panel keyword. Keywords whose
/// search yields nothing (or fails) are omitted entirely.
pub async fn trending_interests(client: &GitHubClient) -> Vec<TrendingInterest> {
    let since = (Utc::now() - Duration::days(WINDOW_DAYS)).date_naive();
    trending_for_panel(client, INTEREST_QUERIES, since).await
}

pub async fn trending_for_panel(
    client: &GitHubClient,
    panel: &[InterestQuery],
    since: NaiveDate,
) -> Vec<TrendingInterest> {
    let fetches = panel.iter().map(|interest| async move {
        let query = format!("{} created:>{}", interest.query, since.format("%Y-%m-%d"));
        let items = client.search_repos(&query, REPOS_PER_INTEREST).await;

        TrendingInterest {
            keyword: interest.keyword.to_string(),
            repos: items.into_iter().map(trending_repo).collect(),
        }
    });

    join_all(fetches)
        .await
        .into_iter()
        .filter(|interest| !interest.repos.is_empty())
        .collect()
}

fn trending_repo(item: SearchRepo) -> TrendingRepo {
    TrendingRepo {
        name: item.full_name,
        description: truncate_chars(&item.description.unwrap_or_default(), DESCRIPTION_CHARS),
        stars: item.stargazers_count,
        url: item.html_url,
        language: item.language,
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
