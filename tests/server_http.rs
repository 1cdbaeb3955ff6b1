use actix_web::http::header;
use actix_web::{test, web, App};
use async_trait::async_trait;
use gitfolio::github::ContributionSource;
use gitfolio::models::ContributionDay;
use gitfolio::server::{configure_routes, AppState};
use gitfolio::{Aggregator, Config, GitHubClient};
use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct NoContributions;

#[async_trait]
impl ContributionSource for NoContributions {
    async fn yearly_total(&self) -> u32 {
        0
    }

    async fn calendar(&self) -> Vec<ContributionDay> {
        Vec::new()
    }
}

fn test_config() -> Config {
    Config {
        username: "octocat".to_string(),
        github_token: None,
        bind_addr: "127.0.0.1:0".to_string(),
        cache_ttl_secs: 3600,
        cache_stale_secs: 7200,
    }
}

fn state_for(server: &MockServer) -> web::Data<AppState> {
    let config = test_config();
    let client = GitHubClient::new(&config)
        .expect("client builds")
        .with_base_url(server.uri());
    let aggregator = Aggregator::new(client, NoContributions);
    web::Data::new(AppState::new(aggregator, &config))
}

#[actix_web::test]
async fn github_endpoint_serves_json_with_cache_headers() {
    let server = MockServer::start().await;
    Mock::given(path_regex(".*"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&server))
            .configure(configure_routes),
    )
    .await;

    let request = test::TestRequest::get().uri("/api/github").to_request();
    let response = test::call_service(&app, request).await;

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok()),
        Some("public, s-maxage=3600, stale-while-revalidate=7200")
    );

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["repoCount"], json!(0));
    assert_eq!(body["stats"]["prsThisYear"], json!(0));
    assert!(body["contributionGraph"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn second_request_is_served_from_the_cache() {
    let server = MockServer::start().await;
    // a fresh cache entry means upstream sees exactly one aggregation pass
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "avatar_url": "",
            "public_repos": 3,
            "followers": 1,
            "following": 0
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path_regex(".*"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&server))
            .configure(configure_routes),
    )
    .await;

    for _ in 0..2 {
        let request = test::TestRequest::get().uri("/api/github").to_request();
        let response = test::call_service(&app, request).await;
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["repoCount"], json!(3));
    }
}

#[actix_web::test]
async fn healthz_reports_ok() {
    let server = MockServer::start().await;
    let app = test::init_service(
        App::new()
            .app_data(state_for(&server))
            .configure(configure_routes),
    )
    .await;

    let request = test::TestRequest::get().uri("/healthz").to_request();
    let response = test::call_service(&app, request).await;

    assert!(response.status().is_success());
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
}
