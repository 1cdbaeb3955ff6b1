pub mod client;
pub mod contributions;
pub mod paginator;

pub use client::GitHubClient;
pub use contributions::{ContributionSource, ScrapedContributions};
pub use paginator::Paginator;
