mod common;

use actix_web::test::{self, TestRequest};
use actix_web::App;
use common::{
    app_state, app_state_with_timeout, parse_sse_events, MockChatModel,
};
use samaki_api::handlers;
use samaki_types::{ChatMessage, ChatRequest};
use serde_json::json;
use std::time::Duration;

fn chat_body(text: &str) -> ChatRequest {
    ChatRequest {
        messages: vec![ChatMessage::user(text)],
    }
}

#[actix_rt::test]
async fn chat_route_streams_deltas_and_one_terminal_event() {
    let state = app_state(MockChatModel::with_responses(vec![
        MockChatModel::text_response("Habari! Karibu SamakiCash."),
    ]));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .service(handlers::chat::chat)
            .service(handlers::health::health),
    )
    .await;

    let req = TestRequest::post()
        .uri("/api/chat")
        .set_json(chat_body("hello"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/event-stream"
    );

    let body = test::read_body(resp).await;
    let events = parse_sse_events(&body);

    assert!(events
        .iter()
        .any(|e| e["event"] == "text_delta" && e["text"] == "Habari! Karibu SamakiCash."));

    let terminals: Vec<_> = events
        .iter()
        .filter(|e| e["event"] == "completed" || e["event"] == "failed")
        .collect();
    assert_eq!(terminals.len(), 1);
    assert_eq!(terminals[0]["event"], "completed");
    assert_eq!(terminals[0]["message"]["role"], "assistant");
}

#[actix_rt::test]
async fn chat_route_surfaces_tool_calls_as_events() {
    let state = app_state(MockChatModel::with_responses(vec![
        MockChatModel::tool_call_response(
            "connect_to_human",
            json!({"reason": "loan dispute"}),
        ),
        MockChatModel::text_response("A human will reach out shortly."),
    ]));
    let app = test::init_service(App::new().app_data(state).service(handlers::chat::chat)).await;

    let req = TestRequest::post()
        .uri("/api/chat")
        .set_json(chat_body("I want to talk to a person"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let events = parse_sse_events(&body);

    assert!(events
        .iter()
        .any(|e| e["event"] == "tool_call_started" && e["name"] == "connect_to_human"));
    let completed_call = events
        .iter()
        .find(|e| e["event"] == "tool_call_completed")
        .unwrap();
    let result = completed_call["result"].as_str().unwrap();
    assert!(result.contains("loan dispute"));
    assert!(result.contains("+255 123 456 789"));
}

#[actix_rt::test]
async fn chat_route_model_failure_yields_failed_event() {
    let state = app_state(MockChatModel::failing("provider exploded"));
    let app = test::init_service(App::new().app_data(state).service(handlers::chat::chat)).await;

    let req = TestRequest::post()
        .uri("/api/chat")
        .set_json(chat_body("hello"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // The turn fails but the stream itself is a well-formed 200
    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    let events = parse_sse_events(&body);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "failed");
    assert!(events[0]["error"]
        .as_str()
        .unwrap()
        .contains("provider exploded"));
}

#[actix_rt::test]
async fn chat_route_enforces_turn_time_cap() {
    let state = app_state_with_timeout(
        MockChatModel::with_responses(vec![MockChatModel::text_response("too late")])
            .with_delay(Duration::from_secs(2)),
        Duration::from_millis(50),
    );
    let app = test::init_service(App::new().app_data(state).service(handlers::chat::chat)).await;

    let req = TestRequest::post()
        .uri("/api/chat")
        .set_json(chat_body("hello"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let events = parse_sse_events(&body);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "failed");
    assert!(events[0]["error"].as_str().unwrap().contains("timed out"));
}

#[actix_rt::test]
async fn health_route_reports_ok() {
    let state = app_state(MockChatModel::with_responses(vec![]));
    let app = test::init_service(App::new().app_data(state).service(handlers::health::health)).await;

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
