use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitfolio::models::Snapshot;
use gitfolio::{server, Aggregator, Config, GitHubClient, ScrapedContributions};

#[derive(Parser, Debug)]
#[command(name = "gitfolio")]
#[command(version = "0.1.0")]
#[command(about = "Aggregate a GitHub profile into a portfolio snapshot")]
struct Args {
    /// GitHub username to aggregate
    #[arg(short, long, env = "GITHUB_USERNAME")]
    username: String,

    /// Output format (json, text)
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Serve the snapshot over HTTP instead of printing it once
    #[arg(long)]
    serve: bool,

    /// Bind address for --serve (overrides BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitfolio=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::from_env(&args.username);
    if let Some(ref bind) = args.bind {
        config.bind_addr = bind.clone();
    }

    if args.serve {
        server::run(config).await?;
        return Ok(());
    }

    // Initialize clients
    let github = GitHubClient::new(&config)?;
    let contributions = ScrapedContributions::new(&config.username)?;
    let aggregator = Aggregator::new(github, contributions);

    // Run one aggregation pass
    tracing::info!("Building snapshot for GitHub user: {}", config.username);
    let snapshot = aggregator.snapshot().await;

    // Output results
    output_snapshot(&snapshot, &args)?;

    Ok(())
}

fn output_snapshot(snapshot: &Snapshot, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "text" => format_text(snapshot),
        _ => serde_json::to_string_pretty(snapshot)?,
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_text(snapshot: &Snapshot) -> String {
    let mut output = String::new();

    output.push_str("\n=== GitHub Snapshot ===\n\n");
    output.push_str(&format!("Public repos: {}\n", snapshot.stats.repos));
    output.push_str(&format!("Followers: {}\n", snapshot.stats.followers));
    output.push_str(&format!(
        "Contributions this year: {}\n",
        snapshot.stats.contributions
    ));
    output.push_str(&format!(
        "PRs this year: {}\n",
        snapshot.stats.prs_this_year
    ));
    output.push_str(&format!(
        "External PRs merged: {}\n",
        snapshot.external_prs_merged
    ));

    if !snapshot.languages.is_empty() {
        output.push_str("\nLanguages:\n");
        for lang in &snapshot.languages {
            output.push_str(&format!("  - {} ({}%)\n", lang.name, lang.percentage));
        }
    }

    if !snapshot.most_active.is_empty() {
        output.push_str("\nMost active repositories:\n");
        for repo in &snapshot.most_active {
            output.push_str(&format!("  - {}: {} commits\n", repo.name, repo.commits));
        }
    }

    output.push_str(&format!(
        "\nCoding patterns: {} ({})\n",
        snapshot.coding_patterns.label, snapshot.coding_patterns.description
    ));

    if !snapshot.repo_tags.is_empty() {
        output.push_str(&format!("\nTags: {}\n", snapshot.repo_tags.join(", ")));
    }

    if !snapshot.trending_interests.is_empty() {
        output.push_str("\nTrending interests:\n");
        for interest in &snapshot.trending_interests {
            output.push_str(&format!(
                "  - {} ({} repos)\n",
                interest.keyword,
                interest.repos.len()
            ));
        }
    }

    output
}
