use std::time::Duration;

use actix_web::{post, web, HttpResponse, Responder};
use futures_util::{Stream, StreamExt};
use samaki_assistant::engine::TurnEvent;
use samaki_types::ChatRequest;

use crate::AppState;

/// Streaming chat proxy. Accepts the caller's transcript, injects the
/// assistant persona server-side, and streams [`TurnEvent`]s back as
/// server-sent events. The stream closes after the turn's terminal event
/// or once the turn cap elapses, whichever comes first.
#[post("/api/chat")]
pub async fn chat(state: web::Data<AppState>, request: web::Json<ChatRequest>) -> impl Responder {
    let events = state.engine.run_turn(request.into_inner().messages);
    let body = sse_body(events, state.turn_timeout);

    HttpResponse::Ok()
        .insert_header(("content-type", "text/event-stream"))
        .insert_header(("cache-control", "no-cache"))
        .streaming(body)
}

fn sse_body(
    mut events: impl Stream<Item = TurnEvent> + Unpin + Send + 'static,
    turn_timeout: Duration,
) -> impl Stream<Item = Result<web::Bytes, actix_web::Error>> {
    async_stream::stream! {
        let deadline = tokio::time::sleep(turn_timeout);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = &mut deadline => {
                    tracing::warn!(?turn_timeout, "turn exceeded time cap");
                    yield Ok(encode_event(&TurnEvent::Failed {
                        error: "turn timed out".to_string(),
                    }));
                    break;
                }
                next = events.next() => match next {
                    Some(event) => {
                        let terminal = event.is_terminal();
                        yield Ok(encode_event(&event));
                        if terminal {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }
}

fn encode_event(event: &TurnEvent) -> web::Bytes {
    let json = serde_json::to_string(event).unwrap_or_else(|e| {
        format!(
            "{{\"event\":\"failed\",\"error\":\"serialization: {}\"}}",
            e
        )
    });
    web::Bytes::from(format!("data: {}\n\n", json))
}
