pub mod aggregator;
pub mod config;
pub mod error;
pub mod github;
pub mod interests;
pub mod models;
pub mod server;
pub mod stats;

pub use aggregator::Aggregator;
pub use config::Config;
pub use error::{Error, Result};
pub use github::{ContributionSource, GitHubClient, ScrapedContributions};
pub use models::Snapshot;
