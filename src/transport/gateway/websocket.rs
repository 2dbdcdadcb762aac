use super::AppState;
use super::events::{ClientMessage, ServerMessage};
use crate::error::TransportError;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use std::collections::HashSet;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

type WsSink = SplitSink<WebSocket, Message>;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let mut feed = BroadcastStream::new(state.pipeline.ratings_receiver());
    let mut watched: HashSet<String> = HashSet::new();

    if send_message(&mut sink, &ServerMessage::connected())
        .await
        .is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            incoming = stream.next() => {
                let Some(result) = incoming else { break };
                let message = match result {
                    Ok(message) => message,
                    Err(error) => {
                        tracing::debug!(%error, "ws.receive_failed");
                        break;
                    }
                };
                let keep_open = match message {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_message) => handle_client_message(
                            &mut sink,
                            &state,
                            &mut watched,
                            client_message,
                        )
                        .await
                        .is_ok(),
                        Err(error) => {
                            let reply = ServerMessage::error(format!("invalid message: {error}"));
                            send_message(&mut sink, &reply).await.is_ok()
                        }
                    },
                    Message::Close(_) => false,
                    Message::Ping(data) => sink.send(Message::Pong(data)).await.is_ok(),
                    _ => true,
                };
                if !keep_open {
                    break;
                }
            }
            event = feed.next() => {
                let event = match event {
                    Some(Ok(event)) => event,
                    Some(Err(BroadcastStreamRecvError::Lagged(skipped))) => {
                        tracing::warn!(skipped, "ws.feed_lagged");
                        continue;
                    }
                    None => break,
                };
                let dish_id = event.dish_id().to_string();
                let pushed = ServerMessage::RatingInserted { rating: event.rating };
                if send_message(&mut sink, &pushed).await.is_err() {
                    break;
                }
                if watched.contains(&dish_id)
                    && send_counts(&mut sink, &state, &dish_id).await.is_err()
                {
                    break;
                }
            }
        }
    }
    tracing::debug!(watched = watched.len(), "ws.closed");
}

async fn handle_client_message(
    sink: &mut WsSink,
    state: &AppState,
    watched: &mut HashSet<String>,
    message: ClientMessage,
) -> Result<(), TransportError> {
    match message {
        ClientMessage::Watch { dish_id } => {
            send_counts(sink, state, &dish_id).await?;
            watched.insert(dish_id);
        }
        ClientMessage::Unwatch { dish_id } => {
            watched.remove(&dish_id);
        }
        ClientMessage::Ping => {
            send_message(sink, &ServerMessage::Pong).await?;
        }
    }
    Ok(())
}

/// Re-fetch the aggregate for `dish_id` and push it. A failed fetch is
/// reported to the client and does not close the socket.
async fn send_counts(
    sink: &mut WsSink,
    state: &AppState,
    dish_id: &str,
) -> Result<(), TransportError> {
    let message = match state.pipeline.get_ratings_count(dish_id).await {
        Ok(counts) => ServerMessage::counts(dish_id, counts),
        Err(error) => {
            tracing::error!(dish_id, %error, "counts.fetch_failed");
            ServerMessage::error(format!("counts unavailable for {dish_id}"))
        }
    };
    send_message(sink, &message).await
}

async fn send_message(sink: &mut WsSink, message: &ServerMessage) -> Result<(), TransportError> {
    let json = message.to_json();
    sink.send(Message::Text(json.into()))
        .await
        .map_err(|error| TransportError::WebSocket(error.to_string()))
}
