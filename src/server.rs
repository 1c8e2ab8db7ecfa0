//! WebSocket transport edge and dispatch loop.
//!
//! Each accepted socket gets a monotonic [`ConnId`] and a pair of tasks: a
//! writer forwarding router events onto the socket and a read loop parsing
//! text frames into intents. All state lives behind the single dispatch task;
//! connection tasks only translate frames to events and back.

use crate::connection::ConnId;
use crate::protocol::{ClientIntent, ServerEvent};
use crate::router::{Event, Router};
use anyhow::Result;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Shared handle from connection tasks into the dispatch loop.
#[derive(Debug, Clone)]
struct AppState {
    events: mpsc::UnboundedSender<Event>,
    next_conn: Arc<AtomicU64>,
}

/// Binds the listener, spawns the dispatch loop, and serves the `/ws`
/// upgrade route until the process is stopped.
pub async fn serve(host: &str, port: u16) -> Result<()> {
    let (events, inbox) = mpsc::unbounded_channel();
    tokio::spawn(dispatch_loop(inbox));

    let state = AppState {
        events,
        next_conn: Arc::new(AtomicU64::new(1)),
    };
    let app = axum::Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(host, port, "Listening for connections");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Drains the event channel into the router, one event to completion at a
/// time. This task is the sole owner of all matchmaking and session state.
async fn dispatch_loop(mut inbox: mpsc::UnboundedReceiver<Event>) {
    let mut router = Router::new();
    while let Some(event) = inbox.recv().await {
        router.handle(event);
    }
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Runs one connection: registers it with the router, pumps frames both
/// ways, and emits the disconnect event once the read loop ends.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn = ConnId::from(state.next_conn.fetch_add(1, Ordering::Relaxed));
    info!(%conn, "Connection opened");

    let (outbound, mut events) = mpsc::unbounded_channel::<ServerEvent>();
    if state.events.send(Event::Connected(conn, outbound)).is_err() {
        warn!(%conn, "Dispatch loop gone, dropping connection");
        return;
    }

    let (mut sink, mut stream) = socket.split();

    let writer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(err) => {
                    warn!(error = %err, "Failed to serialize event");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientIntent>(&text) {
                Ok(intent) => {
                    if state.events.send(Event::Intent(conn, intent)).is_err() {
                        break;
                    }
                }
                // Tolerant of garbage: drop the frame, keep the connection.
                Err(err) => debug!(%conn, error = %err, "Ignoring malformed frame"),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                debug!(%conn, error = %err, "Socket error");
                break;
            }
        }
    }

    // Must reach the router before any later event could involve this
    // connection again.
    let _ = state.events.send(Event::Disconnected(conn));
    writer.abort();
    info!(%conn, "Connection closed");
}
