//! End-to-end tests for the celebration pipeline: shopping-list domain
//! events feed the engine through the publisher bridge, and frames come out
//! on the real SSE endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use futures::StreamExt;
use tokio::time::timeout;
use tower::util::ServiceExt;

use celebrations::{
    routes, CelebrationEngine, CelebrationFrame, CelebrationPublisher, CelebrationsConfig,
};
use shopping_list::domain::Service;
use shopping_list::infra::storage::MemoryRepository;
use shopping_list::model::{GroceryItemPatch, NewGroceryItem};

/// Small, fast bursts so every test drains in a handful of virtual ticks.
fn fast_config() -> CelebrationsConfig {
    CelebrationsConfig {
        frame_ms: 5,
        burst_min: 10,
        burst_max: 15,
        ..CelebrationsConfig::default()
    }
}

fn service_with_celebrations(engine: &Arc<CelebrationEngine>) -> Service {
    let repo = Arc::new(MemoryRepository::new());
    let publisher = Arc::new(CelebrationPublisher::new(Arc::clone(engine)));
    Service::new(repo, publisher)
}

fn grocery(name: &str) -> NewGroceryItem {
    NewGroceryItem {
        name: name.to_string(),
        ..Default::default()
    }
}

/// Pull complete SSE events out of the buffer and parse their frames.
/// Keepalive comments carry no `data:` line and fall through.
fn drain_frames(buffer: &mut String) -> Vec<CelebrationFrame> {
    let mut frames = Vec::new();
    while let Some(end) = buffer.find("\n\n") {
        let block: String = buffer.drain(..end + 2).collect();
        for line in block.lines() {
            if let Some(json) = line.strip_prefix("data: ") {
                frames.push(serde_json::from_str(json).expect("unparsable frame on the wire"));
            }
        }
    }
    frames
}

#[tokio::test(start_paused = true)]
async fn celebration_frames_arrive_over_the_sse_endpoint() {
    let engine = CelebrationEngine::new(fast_config());
    let app = routes::router(Arc::clone(&engine));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/celebrations/events")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let mut body = response.into_body().into_data_stream();

    let service = service_with_celebrations(&engine);
    let created = service.create_item(grocery("Milk")).await.unwrap();
    service
        .update_item(
            created.id,
            GroceryItemPatch {
                bought: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Read the whole celebration off the wire: at least one populated frame,
    // strictly increasing sequence numbers, and a final empty frame.
    let mut buffer = String::new();
    let mut seen = Vec::new();
    while !seen.last().is_some_and(|f: &CelebrationFrame| f.particles.is_empty()) {
        let chunk = timeout(Duration::from_secs(60), body.next())
            .await
            .expect("stream stalled")
            .expect("stream ended early")
            .expect("body error");
        buffer.push_str(std::str::from_utf8(&chunk).expect("non-utf8 chunk"));
        seen.extend(drain_frames(&mut buffer));
    }

    assert!(seen.len() >= 2, "expected a burst and a terminating frame");
    assert!(!seen[0].particles.is_empty(), "first frame should be populated");
    assert!(seen.windows(2).all(|w| w[0].seq < w[1].seq));
    assert!(seen.last().unwrap().particles.is_empty());
    assert!(engine.is_idle());
}

#[tokio::test(start_paused = true)]
async fn unchecking_an_item_does_not_celebrate() {
    let engine = CelebrationEngine::new(fast_config());
    let service = service_with_celebrations(&engine);

    let created = service.create_item(grocery("Eggs")).await.unwrap();
    service
        .update_item(
            created.id,
            GroceryItemPatch {
                bought: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!engine.is_idle(), "checking off should start a celebration");

    while !engine.is_idle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    service
        .update_item(
            created.id,
            GroceryItemPatch {
                bought: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(engine.is_idle(), "unchecking must not burst");
}

#[tokio::test(start_paused = true)]
async fn clearing_bought_items_celebrates_only_when_something_was_removed() {
    let engine = CelebrationEngine::new(fast_config());
    let service = service_with_celebrations(&engine);

    // Nothing bought yet: the clear removes zero rows and stays quiet.
    assert_eq!(service.clear_bought().await.unwrap(), 0);
    assert!(engine.is_idle());

    let created = service.create_item(grocery("Bread")).await.unwrap();
    service
        .update_item(
            created.id,
            GroceryItemPatch {
                bought: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    while !engine.is_idle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(service.clear_bought().await.unwrap(), 1);
    assert!(!engine.is_idle(), "a non-empty clear should celebrate");
    while !engine.is_idle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
