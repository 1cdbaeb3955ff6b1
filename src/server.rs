use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use actix_web::http::header;
use actix_web::{web, App, HttpResponse, HttpServer};
use tokio::sync::RwLock;

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::error::Result;
use crate::github::{GitHubClient, ScrapedContributions};
use crate::models::Snapshot;

pub struct AppState {
    aggregator: Aggregator,
    cache: SnapshotCache,
    cache_control: String,
}

impl AppState {
    pub fn new(aggregator: Aggregator, config: &Config) -> Self {
        Self {
            aggregator,
            cache: SnapshotCache::new(
                Duration::from_secs(config.cache_ttl_secs),
                Duration::from_secs(config.cache_stale_secs),
            ),
            cache_control: format!(
                "public, s-maxage={}, stale-while-revalidate={}",
                config.cache_ttl_secs, config.cache_stale_secs
            ),
        }
    }

    fn respond(&self, snapshot: Snapshot) -> HttpResponse {
        HttpResponse::Ok()
            .insert_header((header::CACHE_CONTROL, self.cache_control.clone()))
            .json(snapshot)
    }
}

struct CacheEntry {
    snapshot: Snapshot,
    stored_at: Instant,
}

#[derive(Debug, PartialEq, Eq)]
enum Freshness {
    Fresh,
    Stale,
    Expired,
}

enum CacheRead {
    Fresh(Snapshot),
    Stale(Snapshot),
    Miss,
}

/// Single-entry snapshot cache. A fresh entry serves as-is; a stale one
/// (past the TTL but inside the grace window) serves while one background
/// refresh runs; past the grace window the next request recomputes inline.
struct SnapshotCache {
    ttl: Duration,
    stale_grace: Duration,
    entry: RwLock<Option<CacheEntry>>,
    refreshing: AtomicBool,
}

impl SnapshotCache {
    fn new(ttl: Duration, stale_grace: Duration) -> Self {
        Self {
            ttl,
            stale_grace,
            entry: RwLock::new(None),
            refreshing: AtomicBool::new(false),
        }
    }

    fn freshness(&self, age: Duration) -> Freshness {
        if age <= self.ttl {
            Freshness::Fresh
        } else if age <= self.ttl + self.stale_grace {
            Freshness::Stale
        } else {
            Freshness::Expired
        }
    }

    async fn read(&self) -> CacheRead {
        let guard = self.entry.read().await;
        let Some(entry) = guard.as_ref() else {
            return CacheRead::Miss;
        };

        match self.freshness(entry.stored_at.elapsed()) {
            Freshness::Fresh => CacheRead::Fresh(entry.snapshot.clone()),
            Freshness::Stale => CacheRead::Stale(entry.snapshot.clone()),
            Freshness::Expired => CacheRead::Miss,
        }
    }

    async fn store(&self, snapshot: Snapshot) {
        let mut guard = self.entry.write().await;
        *guard = Some(CacheEntry {
            snapshot,
            stored_at: Instant::now(),
        });
    }

    fn begin_refresh(&self) -> bool {
        self.refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn end_refresh(&self) {
        self.refreshing.store(false, Ordering::Release);
    }
}

pub async fn github_snapshot(state: web::Data<AppState>) -> HttpResponse {
    match state.cache.read().await {
        CacheRead::Fresh(snapshot) => state.respond(snapshot),
        CacheRead::Stale(snapshot) => {
            spawn_refresh(state.clone());
            state.respond(snapshot)
        }
        CacheRead::Miss => {
            let snapshot = state.aggregator.snapshot().await;
            state.cache.store(snapshot.clone()).await;
            state.respond(snapshot)
        }
    }
}

// At most one refresh task runs at a time; extra stale hits keep serving
// the old entry.
fn spawn_refresh(state: web::Data<AppState>) {
    if !state.cache.begin_refresh() {
        return;
    }

    tokio::spawn(async move {
        tracing::info!("Refreshing snapshot cache in the background");
        let snapshot = state.aggregator.snapshot().await;
        state.cache.store(snapshot).await;
        state.cache.end_refresh();
    });
}

pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "gitfolio"
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/github", web::get().to(github_snapshot))
        .route("/healthz", web::get().to(healthz));
}

pub async fn run(config: Config) -> Result<()> {
    let github = GitHubClient::new(&config)?;
    let contributions = ScrapedContributions::new(&config.username)?;
    let aggregator = Aggregator::new(github, contributions);
    let state = web::Data::new(AppState::new(aggregator, &config));

    tracing::info!("Serving snapshot API on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure_routes)
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> SnapshotCache {
        SnapshotCache::new(Duration::from_secs(60), Duration::from_secs(120))
    }

    #[test]
    fn freshness_boundaries() {
        let cache = cache();
        assert_eq!(cache.freshness(Duration::from_secs(0)), Freshness::Fresh);
        assert_eq!(cache.freshness(Duration::from_secs(60)), Freshness::Fresh);
        assert_eq!(cache.freshness(Duration::from_secs(61)), Freshness::Stale);
        assert_eq!(cache.freshness(Duration::from_secs(180)), Freshness::Stale);
        assert_eq!(cache.freshness(Duration::from_secs(181)), Freshness::Expired);
    }

    #[tokio::test]
    async fn empty_cache_reads_as_miss() {
        assert!(matches!(cache().read().await, CacheRead::Miss));
    }

    #[tokio::test]
    async fn stored_snapshot_reads_back_fresh() {
        let cache = cache();
        cache
            .store(Snapshot {
                repo_count: 42,
                ..Default::default()
            })
            .await;

        match cache.read().await {
            CacheRead::Fresh(read) => assert_eq!(read.repo_count, 42),
            _ => panic!("expected a fresh read"),
        }
    }

    #[test]
    fn only_one_refresh_starts() {
        let cache = cache();
        assert!(cache.begin_refresh());
        assert!(!cache.begin_refresh());
        cache.end_refresh();
        assert!(cache.begin_refresh());
    }
}
