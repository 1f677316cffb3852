use super::*;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::StickerId;
use tokio::{net::TcpListener, sync::Mutex};

use crate::controller::FormController;

#[derive(Clone, Default)]
struct ServerState {
    created: Arc<Mutex<Vec<Value>>>,
    deleted: Arc<Mutex<Vec<Value>>>,
}

async fn handle_message_types() -> Json<Value> {
    Json(json!(["Happy Birthday", "Festival", "Basic"]))
}

async fn handle_font_sizes() -> Json<Value> {
    Json(json!([10, 12, 70]))
}

async fn handle_text_colors() -> Json<Value> {
    Json(json!(["Black", "White"]))
}

async fn handle_create(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.created.lock().await.push(body);
    (
        StatusCode::CREATED,
        Json(json!({
            "id": "abc",
            "imageSrc": "/image/abc?t=1",
            "imageViewUrl": "/view/abc",
        })),
    )
}

async fn handle_create_failure() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "server error")
}

async fn handle_delete(State(state): State<ServerState>, Json(body): Json<Value>) -> StatusCode {
    state.deleted.lock().await.push(body);
    StatusCode::OK
}

async fn handle_image(Path(id): Path<String>) -> Vec<u8> {
    format!("jpeg:{id}").into_bytes()
}

fn sticker_router(state: ServerState) -> Router {
    Router::new()
        .route("/MessageTypes", post(handle_message_types))
        .route("/FontSizes", post(handle_font_sizes))
        .route("/TextColors", post(handle_text_colors))
        .route("/create/", post(handle_create))
        .route("/delete/", post(handle_delete))
        .route("/image/:id", get(handle_image))
        .with_state(state)
}

async fn spawn_server(app: Router) -> std::io::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn sample_request() -> CreateStickerRequest {
    CreateStickerRequest {
        id: StickerId::default(),
        to: "Asha".to_string(),
        from: "Ravi".to_string(),
        message: "Happy Diwali".to_string(),
        message_type: "Festival".to_string(),
        font_size: "40".to_string(),
        text_color: "Red".to_string(),
    }
}

#[test]
fn base_url_keeps_path_prefix_for_relative_endpoints() {
    let base = parse_base_url(" http://stickers.example/app ").expect("base url");
    assert_eq!(
        base.join("create/").expect("join").as_str(),
        "http://stickers.example/app/create/"
    );
}

#[test]
fn invalid_server_url_is_rejected() {
    let err = HttpStickerApi::new("not a url").expect_err("must fail");
    assert!(matches!(err, ApiError::InvalidUrl(_)));
}

#[tokio::test]
async fn lists_options_from_each_lookup_endpoint() {
    let server_url = spawn_server(sticker_router(ServerState::default()))
        .await
        .expect("spawn server");
    let api = HttpStickerApi::new(&server_url).expect("api");

    let message_types = api
        .list_options(LookupKind::MessageType)
        .await
        .expect("message types");
    let font_sizes = api.list_options(LookupKind::FontSize).await.expect("sizes");
    let text_colors = api.list_options(LookupKind::TextColor).await.expect("colors");

    assert_eq!(message_types, vec!["Happy Birthday", "Festival", "Basic"]);
    assert_eq!(font_sizes, vec!["10", "12", "70"]);
    assert_eq!(text_colors, vec!["Black", "White"]);
}

#[tokio::test]
async fn create_posts_camel_case_body_and_decodes_response() {
    let state = ServerState::default();
    let server_url = spawn_server(sticker_router(state.clone()))
        .await
        .expect("spawn server");
    let api = HttpStickerApi::new(&server_url).expect("api");

    let response = api.create_sticker(&sample_request()).await.expect("create");

    assert_eq!(response.id, StickerId::new("abc"));
    assert_eq!(response.image_src, "/image/abc?t=1");
    assert_eq!(response.image_view_url, "/view/abc");

    let created = state.created.lock().await;
    assert_eq!(
        created[0],
        json!({
            "id": "",
            "to": "Asha",
            "from": "Ravi",
            "message": "Happy Diwali",
            "messageType": "Festival",
            "fontSize": "40",
            "textColor": "Red",
        })
    );
}

#[tokio::test]
async fn failed_create_keeps_the_response_body_as_payload() {
    let app = Router::new().route("/create/", post(handle_create_failure));
    let server_url = spawn_server(app).await.expect("spawn server");
    let api = HttpStickerApi::new(&server_url).expect("api");

    let err = api
        .create_sticker(&sample_request())
        .await
        .expect_err("must fail");

    match &err {
        ApiError::Status { status, .. } => {
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.failure_payload(), "server error");
}

#[tokio::test]
async fn missing_lookup_route_is_a_status_failure() {
    let server_url = spawn_server(Router::new()).await.expect("spawn server");
    let api = HttpStickerApi::new(&server_url).expect("api");

    let err = api
        .list_options(LookupKind::TextColor)
        .await
        .expect_err("must fail");
    assert!(matches!(err, ApiError::Status { .. }));
}

#[tokio::test]
async fn delete_posts_the_sticker_id() {
    let state = ServerState::default();
    let server_url = spawn_server(sticker_router(state.clone()))
        .await
        .expect("spawn server");
    let api = HttpStickerApi::new(&server_url).expect("api");

    api.delete_sticker(&DeleteStickerRequest {
        id: StickerId::new("abc"),
    })
    .await
    .expect("delete");

    let deleted = state.deleted.lock().await;
    assert_eq!(deleted.as_slice(), &[json!({ "id": "abc" })]);
}

#[tokio::test]
async fn fetch_image_resolves_source_path_against_server() {
    let server_url = spawn_server(sticker_router(ServerState::default()))
        .await
        .expect("spawn server");
    let api = HttpStickerApi::new(&server_url).expect("api");

    let bytes = api.fetch_image("/image/abc?t=1").await.expect("image");
    assert_eq!(bytes, b"jpeg:abc");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let api = HttpStickerApi::new(&format!("http://{addr}")).expect("api");

    let err = api
        .delete_sticker(&DeleteStickerRequest {
            id: StickerId::new("abc"),
        })
        .await
        .expect_err("must fail");
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn controller_drives_full_workflow_over_http() {
    let state = ServerState::default();
    let server_url = spawn_server(sticker_router(state.clone()))
        .await
        .expect("spawn server");
    let api = HttpStickerApi::new(&server_url).expect("api");
    let mut controller = FormController::new();

    controller.initialize(&api).await;
    assert_eq!(controller.state().font_size_options, vec!["10", "12", "70"]);

    controller.state_mut().recipient = "Asha".to_string();
    controller.submit_create(&api).await;
    assert_eq!(controller.state().sticker.id, StickerId::new("abc"));
    assert!(controller.state().flags.success_visible);

    controller.submit_reset(&api).await;
    assert!(controller.state().sticker.is_empty());
    assert!(controller.state().flags.success_visible);

    let created = state.created.lock().await;
    assert_eq!(created[0]["messageType"], "Basic");
    let deleted = state.deleted.lock().await;
    assert_eq!(deleted[0]["id"], "abc");
}
