use chrono::NaiveDate;
use gitfolio::interests::{trending_for_panel, InterestQuery};
use gitfolio::{Config, GitHubClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GitHubClient {
    let config = Config {
        username: "octocat".to_string(),
        github_token: None,
        bind_addr: "127.0.0.1:0".to_string(),
        cache_ttl_secs: 3600,
        cache_stale_secs: 7200,
    };
    GitHubClient::new(&config)
        .expect("client builds")
        .with_base_url(server.uri())
}

fn since() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 22).unwrap()
}

fn search_hit(name: &str, stars: u32, description: &str) -> serde_json::Value {
    json!({
        "full_name": name,
        "description": description,
        "stargazers_count": stars,
        "html_url": format!("https://github.com/{}", name),
        "language": "Rust"
    })
}

async fn mount_search(server: &MockServer, query: &str, items: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", format!("{} created:>2026-08-22", query)))
        .and(query_param("sort", "stars"))
        .and(query_param("order", "desc"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn empty_keywords_are_omitted_from_a_ten_entry_panel() {
    let panel: Vec<InterestQuery> = [
        ("K0", "q0"),
        ("K1", "q1"),
        ("K2", "q2"),
        ("K3", "q3"),
        ("K4", "q4"),
        ("K5", "q5"),
        ("K6", "q6"),
        ("K7", "q7"),
        ("K8", "q8"),
        ("K9", "q9"),
    ]
    .iter()
    .map(|&(keyword, query)| InterestQuery { keyword, query })
    .collect();

    let server = MockServer::start().await;
    // two keywords come back empty, the rest carry one hit each
    for interest in &panel {
        let items = if interest.keyword == "K3" || interest.keyword == "K7" {
            json!([])
        } else {
            json!([search_hit("someone/hot-repo", 50, "a fresh repo")])
        };
        mount_search(&server, interest.query, items).await;
    }

    let client = client_for(&server);
    let interests = trending_for_panel(&client, &panel, since()).await;

    assert_eq!(interests.len(), 8);
    assert!(!interests.iter().any(|i| i.keyword == "K3"));
    assert!(!interests.iter().any(|i| i.keyword == "K7"));
    // panel order survives the fanout
    assert_eq!(interests[0].keyword, "K0");
    assert_eq!(interests[7].keyword, "K9");
}

#[tokio::test]
async fn one_failing_search_does_not_take_down_its_siblings() {
    let panel = [
        InterestQuery {
            keyword: "Good",
            query: "good",
        },
        InterestQuery {
            keyword: "Bad",
            query: "bad",
        },
    ];

    let server = MockServer::start().await;
    mount_search(
        &server,
        "good",
        json!([search_hit("a/alive", 12, "still here")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "bad created:>2026-08-22"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let interests = trending_for_panel(&client, &panel, since()).await;

    assert_eq!(interests.len(), 1);
    assert_eq!(interests[0].keyword, "Good");
    assert_eq!(interests[0].repos[0].name, "a/alive");
    assert_eq!(interests[0].repos[0].stars, 12);
}

#[tokio::test]
async fn hits_map_with_truncated_descriptions() {
    let panel = [InterestQuery {
        keyword: "Wordy",
        query: "wordy",
    }];

    let long = "d".repeat(180);
    // the second hit has no description or language at all
    let mut quiet = search_hit("a/quiet", 7, "");
    quiet["description"] = json!(null);
    quiet["language"] = json!(null);

    let server = MockServer::start().await;
    mount_search(
        &server,
        "wordy",
        json!([search_hit("a/verbose", 40, &long), quiet]),
    )
    .await;

    let client = client_for(&server);
    let interests = trending_for_panel(&client, &panel, since()).await;

    let repos = &interests[0].repos;
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].description.chars().count(), 100);
    assert_eq!(repos[0].url, "https://github.com/a/verbose");
    assert_eq!(repos[1].description, "");
    assert!(repos[1].language.is_none());
}
