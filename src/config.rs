use std::env;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_CACHE_STALE_SECS: u64 = 7200;

#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub github_token: Option<String>,
    pub bind_addr: String,
    pub cache_ttl_secs: u64,
    pub cache_stale_secs: u64,
}

impl Config {
    /// Reads everything except the username from the environment. The
    /// username is an argument because the CLI resolves it first (flag,
    /// then GITHUB_USERNAME) and every fetch is scoped to it.
    pub fn from_env(username: impl Into<String>) -> Self {
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let cache_ttl_secs = env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        let cache_stale_secs = env::var("CACHE_STALE_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_STALE_SECS);

        Self {
            username: username.into(),
            github_token,
            bind_addr,
            cache_ttl_secs,
            cache_stale_secs,
        }
    }
}
