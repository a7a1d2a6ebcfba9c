use folio_content::core::mock_data::mock_items;
use folio_content::{
    ContentSource, FallbackResolver, IntermediarySource, ResolverSettings, Section, Tier,
};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const DATABASE_ID: &str = "209803d3-0664-813d-829e-eed91d2d9600";

fn resolver_for(server: &MockServer) -> FallbackResolver<IntermediarySource> {
    let source = IntermediarySource::new(&server.base_url(), DATABASE_ID).unwrap();
    FallbackResolver::with_settings(
        source,
        ResolverSettings {
            step_timeout: Duration::from_millis(500),
        },
    )
}

async fn healthy(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({
                "status": "ok",
                "timestamp": "2025-06-05T13:18:00.000Z"
            }));
        })
        .await;
}

fn item(id: &str, section: &str, order: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Title {}", id),
        "content": format!("Content {}", id),
        "section": section,
        "order": order
    })
}

#[tokio::test]
async fn test_remote_items_are_sorted_with_stable_ties() {
    let server = MockServer::start_async().await;
    healthy(&server).await;
    let portfolio = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/portfolio/Projects");
            then.status(200).json_body(json!([
                item("c", "Projects", 3),
                item("a1", "Projects", 1),
                item("a2", "Projects", 1),
                item("b", "Projects", 2)
            ]));
        })
        .await;

    let resolution = resolver_for(&server)
        .resolve_detailed(Some(Section::Projects), &CancellationToken::new())
        .await;

    portfolio.assert_async().await;
    assert_eq!(resolution.tier, Tier::Remote);
    let ids: Vec<&str> = resolution.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "b", "c"]);
    let orders: Vec<i64> = resolution.items.iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![1, 1, 2, 3]);
}

#[tokio::test]
async fn test_health_ignores_timestamp_format() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200)
                .json_body(json!({"status": "ok", "timestamp": 1717593480000_i64}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/portfolio/Skills");
            then.status(200).json_body(json!([item("s1", "Skills", 1)]));
        })
        .await;

    let resolver = resolver_for(&server);
    assert!(resolver.source().check_health().await.unwrap());

    let resolution = resolver
        .resolve_detailed(Some(Section::Skills), &CancellationToken::new())
        .await;

    assert_eq!(resolution.tier, Tier::Remote);
    assert_eq!(resolution.items[0].id, "s1");
}

#[tokio::test]
async fn test_section_filter_applies_to_remote_results() {
    let server = MockServer::start_async().await;
    healthy(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/portfolio/Projects");
            then.status(200).json_body(json!([
                item("p1", "Projects", 1),
                item("s1", "Skills", 1),
                item("x1", "Unknown", 2),
                "not an object",
                item("p2", "Projects", 2)
            ]));
        })
        .await;

    let items = resolver_for(&server).resolve(Some(Section::Projects)).await;

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.section == Section::Projects));
}

#[tokio::test]
async fn test_unhealthy_backend_uses_mock_without_fetching() {
    let server = MockServer::start_async().await;
    let health = server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({"status": "degraded"}));
        })
        .await;
    let portfolio = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/portfolio/Projects");
            then.status(200).json_body(json!([item("p1", "Projects", 1)]));
        })
        .await;

    let resolution = resolver_for(&server)
        .resolve_detailed(Some(Section::Projects), &CancellationToken::new())
        .await;

    health.assert_async().await;
    portfolio.assert_hits_async(0).await;
    assert_eq!(resolution.tier, Tier::Mock);
    assert_eq!(resolution.items, mock_items(Some(Section::Projects)));
    assert!(resolution.items.iter().all(|i| i.section == Section::Projects));
}

#[tokio::test]
async fn test_health_error_status_uses_mock() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(503).json_body(json!({"error": "maintenance"}));
        })
        .await;

    let resolution = resolver_for(&server)
        .resolve_detailed(Some(Section::Skills), &CancellationToken::new())
        .await;

    assert_eq!(resolution.tier, Tier::Mock);
    assert_eq!(resolution.items, mock_items(Some(Section::Skills)));
}

#[tokio::test]
async fn test_fetch_failure_uses_mock() {
    let server = MockServer::start_async().await;
    healthy(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/portfolio/About");
            then.status(500)
                .json_body(json!({"error": "Notion API Error 401: unauthorized"}));
        })
        .await;
    let verify = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/api/database/{}", DATABASE_ID));
            then.status(200).json_body(json!({"title": [{"plain_text": "Portfolio"}]}));
        })
        .await;

    let resolution = resolver_for(&server)
        .resolve_detailed(Some(Section::About), &CancellationToken::new())
        .await;

    verify.assert_hits_async(0).await;
    assert_eq!(resolution.tier, Tier::Mock);
    assert_eq!(resolution.items, mock_items(Some(Section::About)));
}

#[tokio::test]
async fn test_empty_fetch_with_reachable_database_returns_empty() {
    let server = MockServer::start_async().await;
    healthy(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/portfolio/Certificates");
            then.status(200).json_body(json!([]));
        })
        .await;
    let verify = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/api/database/{}", DATABASE_ID));
            then.status(200).json_body(json!({"title": [{"plain_text": "Portfolio"}]}));
        })
        .await;

    let resolution = resolver_for(&server)
        .resolve_detailed(Some(Section::Certificates), &CancellationToken::new())
        .await;

    verify.assert_async().await;
    assert_eq!(resolution.tier, Tier::RemoteEmpty);
    assert!(resolution.items.is_empty());
}

#[tokio::test]
async fn test_empty_fetch_with_unreachable_database_uses_mock() {
    let server = MockServer::start_async().await;
    healthy(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/portfolio/Certificates");
            then.status(200).json_body(json!([]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/api/database/{}", DATABASE_ID));
            then.status(500).json_body(json!({"error": "object_not_found"}));
        })
        .await;

    let resolution = resolver_for(&server)
        .resolve_detailed(Some(Section::Certificates), &CancellationToken::new())
        .await;

    assert_eq!(resolution.tier, Tier::Mock);
    assert_eq!(resolution.items.len(), 6);
}

#[tokio::test]
async fn test_unfiltered_resolution_spans_all_sections() {
    let server = MockServer::start_async().await;
    healthy(&server).await;
    let portfolio = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/portfolio");
            then.status(200).json_body(json!([
                item("contact", "Contact", 4),
                item("skills", "Skills", 2),
                item("about", "About", 1),
                item("projects", "Projects", 3),
                item("certs", "Certificates", 5)
            ]));
        })
        .await;

    let items = resolver_for(&server).resolve(None).await;

    portfolio.assert_async().await;
    assert_eq!(items.len(), 5);
    for section in Section::ALL {
        assert!(items.iter().any(|i| i.section == section), "missing {}", section);
    }
    assert!(items.windows(2).all(|w| w[0].order <= w[1].order));
}

#[tokio::test]
async fn test_unfiltered_mock_fallback_spans_all_sections() {
    let source = IntermediarySource::new("http://127.0.0.1:9", DATABASE_ID).unwrap();
    let resolver = FallbackResolver::with_settings(
        source,
        ResolverSettings {
            step_timeout: Duration::from_millis(500),
        },
    );

    let resolution = resolver
        .resolve_detailed(None, &CancellationToken::new())
        .await;

    assert_eq!(resolution.tier, Tier::Mock);
    for section in Section::ALL {
        let within: Vec<i64> = resolution
            .items
            .iter()
            .filter(|i| i.section == section)
            .map(|i| i.order)
            .collect();
        assert!(!within.is_empty());
        assert!(within.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[tokio::test]
async fn test_slow_backend_times_out_to_mock() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!({"status": "ok"}));
        })
        .await;
    let source = IntermediarySource::new(&server.base_url(), DATABASE_ID).unwrap();
    let resolver = FallbackResolver::with_settings(
        source,
        ResolverSettings {
            step_timeout: Duration::from_millis(100),
        },
    );

    let resolution = resolver
        .resolve_detailed(Some(Section::Contact), &CancellationToken::new())
        .await;

    assert_eq!(resolution.tier, Tier::Mock);
    assert_eq!(resolution.items, mock_items(Some(Section::Contact)));
}

#[tokio::test]
async fn test_resolve_all_sections_keys_every_section() {
    let server = MockServer::start_async().await;
    healthy(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/portfolio/Skills");
            then.status(200).json_body(json!([item("s1", "Skills", 1)]));
        })
        .await;
    // Every other section fails at fetch and falls back to mock data.
    for name in ["Certificates", "Projects", "About", "Contact"] {
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/api/portfolio/{}", name));
                then.status(500);
            })
            .await;
    }

    let all = resolver_for(&server)
        .resolve_all_sections(&CancellationToken::new())
        .await;

    assert_eq!(all.len(), 5);
    assert_eq!(all[&Section::Skills].len(), 1);
    assert_eq!(all[&Section::Skills][0].id, "s1");
    assert_eq!(all[&Section::Projects], mock_items(Some(Section::Projects)));
}
