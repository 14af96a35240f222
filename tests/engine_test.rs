//! Integration tests for the trend engine using wiremock
//!
//! These tests point real feed providers at a mock server and validate the
//! full fetch → normalize → dedupe → rank pipeline, including partial and
//! total source failure.

use chrono::{Duration, Utc};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trendpulse::config::Config;
use trendpulse::feeds::{FeedClient, FeedProvider, HackerNewsProvider, RedditProvider};
use trendpulse::models::TrendSource;
use trendpulse::TrendEngine;

fn test_config() -> Config {
    let mut config = Config::default();
    config.feeds.subreddits = vec!["artificial".to_string()];
    config.feeds.requests_per_second = 50;
    config.feeds.source_timeout_secs = 5;
    config
}

fn reddit_provider(config: &Config, base_url: &str) -> Box<dyn FeedProvider> {
    let client = FeedClient::with_base_url(&config.feeds, base_url).unwrap();
    Box::new(RedditProvider::new(client, config.feeds.subreddits.clone()))
}

fn hn_provider(config: &Config, base_url: &str) -> Box<dyn FeedProvider> {
    let client = FeedClient::with_base_url(&config.feeds, base_url).unwrap();
    Box::new(HackerNewsProvider::new(client))
}

fn reddit_post(id: &str, title: &str, score: f64, comments: f64, age_hours: i64) -> serde_json::Value {
    json!({
        "data": {
            "id": id,
            "title": title,
            "selftext": "",
            "url": format!("https://www.reddit.com/r/artificial/comments/{id}/"),
            "permalink": format!("/r/artificial/comments/{id}/"),
            "score": score,
            "num_comments": comments,
            "created_utc": (Utc::now() - Duration::hours(age_hours)).timestamp(),
            "stickied": false,
            "over_18": false
        }
    })
}

async fn mount_reddit(server: &MockServer, children: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/r/artificial/hot.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "children": children } })),
        )
        .mount(server)
        .await;
}

async fn mount_hn(server: &MockServer, hits: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hits": hits })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn ranked_output_is_sorted_and_deduplicated() {
    let server = MockServer::start().await;

    mount_reddit(
        &server,
        vec![
            reddit_post("fresh1", "AI agent builds website in 3 minutes", 4200.0, 310.0, 2),
            reddit_post("stale1", "Old automation story from last week", 10.0, 2.0, 120),
        ],
    )
    .await;

    mount_hn(
        &server,
        json!([
            {
                "objectID": "41000000",
                "title": "AI agent builds website in 3 minutes",
                "url": "https://example.com/agent-website",
                "points": 30.0,
                "num_comments": 10.0,
                "created_at": (Utc::now() - Duration::hours(3)).to_rfc3339()
            },
            {
                "objectID": "41000001",
                "title": "Autonomous agents hit the enterprise",
                "url": "https://example.com/enterprise-agents",
                "points": 550.0,
                "num_comments": 320.0,
                "created_at": (Utc::now() - Duration::hours(1)).to_rfc3339()
            }
        ]),
    )
    .await;

    let config = test_config();
    let providers = vec![
        reddit_provider(&config, &server.uri()),
        hn_provider(&config, &server.uri()),
    ];
    let engine = TrendEngine::with_providers(config, providers);

    let trends = engine.trend_insights().await;
    assert!(!trends.is_empty());

    // Sorted descending by score
    for pair in trends.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    // No duplicate ids
    let mut ids: Vec<&str> = trends.iter().map(|t| t.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), trends.len());

    // Near-duplicate title across sources keeps only the higher-scored copy
    let website_stories: Vec<_> = trends
        .iter()
        .filter(|t| t.title.to_lowercase().contains("builds website"))
        .collect();
    assert_eq!(website_stories.len(), 1);
    assert_eq!(website_stories[0].source, TrendSource::Reddit);

    // Fresh high-engagement post outranks the stale low-engagement one
    let fresh_pos = trends.iter().position(|t| t.id == "reddit:fresh1").unwrap();
    let stale_pos = trends.iter().position(|t| t.id == "reddit:stale1").unwrap();
    assert!(fresh_pos < stale_pos);
}

#[tokio::test]
async fn items_missing_required_fields_are_dropped_without_failing_siblings() {
    let server = MockServer::start().await;

    let mut broken = reddit_post("broken1", "Story with no link", 900.0, 50.0, 1);
    broken["data"]["url"] = json!("");
    broken["data"]["permalink"] = json!("");

    mount_reddit(
        &server,
        vec![
            broken,
            reddit_post("good1", "Valid sibling story about agents", 120.0, 9.0, 1),
        ],
    )
    .await;

    let config = test_config();
    let providers = vec![reddit_provider(&config, &server.uri())];
    let engine = TrendEngine::with_providers(config, providers);

    let trends = engine.trend_insights().await;
    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].id, "reddit:good1");
}

#[tokio::test]
async fn one_failing_source_still_yields_partial_results() {
    let server = MockServer::start().await;

    mount_reddit(
        &server,
        vec![reddit_post("only1", "Reddit keeps working", 300.0, 40.0, 1)],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut config = test_config();
    config.feeds.max_retries = 0;
    let providers = vec![
        reddit_provider(&config, &server.uri()),
        hn_provider(&config, &server.uri()),
    ];
    let engine = TrendEngine::with_providers(config, providers);

    let trends = engine.trend_insights().await;
    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].source, TrendSource::Reddit);
}

#[tokio::test]
async fn all_sources_failing_returns_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut config = test_config();
    config.feeds.max_retries = 0;
    let providers = vec![
        reddit_provider(&config, &server.uri()),
        hn_provider(&config, &server.uri()),
    ];
    let engine = TrendEngine::with_providers(config, providers);

    let trends = engine.trend_insights().await;
    assert!(trends.is_empty());
}

#[tokio::test]
async fn result_set_is_bounded_by_max_trends() {
    let server = MockServer::start().await;

    let children: Vec<_> = (0..20)
        .map(|i| {
            reddit_post(
                &format!("post{i}"),
                &format!("Distinct agent story number {i}"),
                100.0 + i as f64,
                5.0,
                1,
            )
        })
        .collect();
    mount_reddit(&server, children).await;

    let mut config = test_config();
    config.ranking.max_trends = 6;
    let providers = vec![reddit_provider(&config, &server.uri())];
    let engine = TrendEngine::with_providers(config, providers);

    let trends = engine.trend_insights().await;
    assert_eq!(trends.len(), 6);
}
