use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use backlog_core::BacklogError;
use backlog_domain::{
    ConvertRequest, FieldUpdate, ItemPosition, ItemQuery, ItemUpdate, NewBacklogItem, Priority,
};
use backlog_remote::{BacklogApi, HttpBacklogApi};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Recorded = Arc<Mutex<Vec<Value>>>;

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn client(base_url: &str) -> HttpBacklogApi {
    HttpBacklogApi::new(base_url, None, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_list_forwards_filters_and_keeps_server_order() {
    let seen: Recorded = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/api/backlog",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(json!(params));
                Json(json!({
                    "success": true,
                    "data": [
                        {"_id": "c", "title": "Third", "priority": "low", "position": 0},
                        {"_id": "a", "title": "First", "priority": "high", "storyPoints": 3}
                    ]
                }))
            }
        }),
    );
    let api = client(&spawn_server(router).await);

    let query = ItemQuery {
        search: Some("fir".into()),
        priority: Some(Priority::High),
    };
    let items = api.list_backlog_items(&query).await.unwrap();

    assert_eq!(
        items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
        vec!["c", "a"]
    );
    assert_eq!(items[1].story_points, Some(3));
    assert_eq!(
        seen.lock().unwrap()[0],
        json!({"search": "fir", "priority": "high"})
    );
}

#[tokio::test]
async fn test_list_unsuccessful_envelope_is_rejected() {
    let router = Router::new().route(
        "/api/backlog",
        get(|| async { Json(json!({"success": false, "message": "Workspace locked"})) }),
    );
    let api = client(&spawn_server(router).await);

    let err = api
        .list_backlog_items(&ItemQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BacklogError::Rejected { .. }));
    assert_eq!(err.server_message(), Some("Workspace locked"));
}

#[tokio::test]
async fn test_reorder_sends_full_payload() {
    let seen: Recorded = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/api/backlog/reorder",
        put(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(body);
                Json(json!({"success": true}))
            }
        }),
    );
    let api = client(&spawn_server(router).await);

    api.reorder_backlog_items(vec![
        ItemPosition::new("A", 0),
        ItemPosition::new("D", 1),
        ItemPosition::new("B", 2),
        ItemPosition::new("C", 3),
    ])
    .await
    .unwrap();

    assert_eq!(
        seen.lock().unwrap()[0],
        json!({"items": [
            {"itemId": "A", "position": 0},
            {"itemId": "D", "position": 1},
            {"itemId": "B", "position": 2},
            {"itemId": "C", "position": 3}
        ]})
    );
}

#[tokio::test]
async fn test_reorder_server_error_carries_message() {
    let router = Router::new().route(
        "/api/backlog/reorder",
        put(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "message": "database unavailable"})),
            )
        }),
    );
    let api = client(&spawn_server(router).await);

    let err = api
        .reorder_backlog_items(vec![ItemPosition::new("A", 0)])
        .await
        .unwrap_err();
    match err {
        BacklogError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message.as_deref(), Some("database unavailable"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_convert_returns_body_as_is() {
    let seen: Recorded = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/api/backlog/convert",
        post(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(body);
                Json(json!({"success": false, "message": "Board is archived"}))
            }
        }),
    );
    let api = client(&spawn_server(router).await);

    let response = api
        .convert_backlog_items_to_board(ConvertRequest::weekly_board(
            vec!["b".into(), "c".into()],
            "Weekly Board",
        ))
        .await
        .unwrap();

    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("Board is archived"));
    assert_eq!(
        seen.lock().unwrap()[0],
        json!({
            "itemIds": ["b", "c"],
            "createWeeklyBoard": true,
            "weekly": {"baseTitle": "Weekly Board"}
        })
    );
}

#[tokio::test]
async fn test_fetch_my_boards_passes_limit() {
    let seen: Recorded = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/api/boards/mine",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(json!(params));
                Json(json!({"success": true, "data": [{"_id": "b1", "title": "Sprint 4"}]}))
            }
        }),
    );
    let api = client(&spawn_server(router).await);

    let boards = api.fetch_my_boards(25).await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].title, "Sprint 4");
    assert_eq!(seen.lock().unwrap()[0], json!({"limit": "25"}));
}

#[tokio::test]
async fn test_item_crud_round_trip() {
    let router = Router::new()
        .route(
            "/api/backlog",
            post(|Json(body): Json<Value>| async move {
                (
                    StatusCode::CREATED,
                    Json(json!({
                        "success": true,
                        "data": {"_id": "n1", "title": body["title"], "priority": body["priority"]}
                    })),
                )
            }),
        )
        .route(
            "/api/backlog/:id",
            patch(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                Json(json!({
                    "success": true,
                    "data": {"_id": id, "title": "Renamed", "priority": "low", "storyPoints": body["storyPoints"]}
                }))
            })
            .delete(|| async { StatusCode::NO_CONTENT }),
        );
    let api = client(&spawn_server(router).await);

    let created = api
        .create_backlog_item(NewBacklogItem::new("Draft release notes", Priority::Medium))
        .await
        .unwrap();
    assert_eq!(created.id, "n1");
    assert_eq!(created.priority, Priority::Medium);

    let updated = api
        .update_backlog_item(
            "n1",
            ItemUpdate {
                story_points: FieldUpdate::Set(8),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.story_points, Some(8));

    api.delete_backlog_item("n1").await.unwrap();
}

#[tokio::test]
async fn test_bearer_token_and_request_id_are_sent() {
    let seen: Recorded = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/api/boards/mine",
        get(move |headers: HeaderMap| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(json!({
                    "auth": headers.get("authorization").and_then(|v| v.to_str().ok()),
                    "has_request_id": headers.contains_key("x-request-id"),
                }));
                Json(json!({"success": true, "data": []}))
            }
        }),
    );
    let base_url = spawn_server(router).await;
    let api = HttpBacklogApi::new(&base_url, Some("s3cret".into()), Duration::from_secs(5)).unwrap();

    api.fetch_my_boards(10).await.unwrap();
    assert_eq!(
        seen.lock().unwrap()[0],
        json!({"auth": "Bearer s3cret", "has_request_id": true})
    );
}

#[tokio::test]
async fn test_connection_refused_is_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{}/api", addr));
    let err = api
        .list_backlog_items(&ItemQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BacklogError::Connection(_)));
}
