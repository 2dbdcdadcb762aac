use std::time::Duration;

use dishswipe::ratings::Outcome;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::gateway_harness::GatewayTestServer;
use crate::store_harness::{seeded_order, temp_pipeline};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(server: &GatewayTestServer) -> Socket {
    let (mut socket, _) = connect_async(server.ws_url())
        .await
        .expect("websocket handshake should succeed");
    let hello = next_json(&mut socket).await;
    assert_eq!(hello["type"], "connected");
    assert_eq!(hello["version"], env!("CARGO_PKG_VERSION"));
    socket
}

async fn send_json(socket: &mut Socket, value: Value) {
    socket
        .send(Message::text(value.to_string()))
        .await
        .expect("websocket send should succeed");
}

/// Next text frame as JSON; control frames are skipped.
async fn next_json(socket: &mut Socket) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(2), socket.next())
            .await
            .expect("server message should arrive in time")
            .expect("socket should stay open")
            .expect("frame should be readable");
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).expect("server frames are json");
        }
    }
}

/// Round-trips a ping so every earlier client message has been handled and
/// every earlier server push has been read.
async fn sync(socket: &mut Socket) {
    send_json(socket, json!({ "type": "ping" })).await;
    let reply = next_json(socket).await;
    assert_eq!(reply["type"], "pong", "unexpected frame before pong: {reply}");
}

#[tokio::test]
async fn ping_gets_pong() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let server = GatewayTestServer::start(pipeline).await;
    let mut socket = connect(&server).await;

    sync(&mut socket).await;
}

#[tokio::test]
async fn watched_dish_gets_insert_then_fresh_counts() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let dishes = seeded_order(&pipeline).await;
    let server = GatewayTestServer::start(pipeline.clone()).await;
    let mut socket = connect(&server).await;
    let dish_id = dishes[0].id.clone();

    send_json(&mut socket, json!({ "type": "watch", "dish_id": dish_id })).await;
    let initial = next_json(&mut socket).await;
    assert_eq!(initial["type"], "counts");
    assert_eq!(initial["dish_id"], dish_id.as_str());
    assert_eq!(initial["likes"], 0);

    pipeline
        .submit_rating(&dish_id, Outcome::Like, Some("crispy".into()))
        .await
        .expect("rating should be stored");

    let inserted = next_json(&mut socket).await;
    assert_eq!(inserted["type"], "rating_inserted");
    assert_eq!(inserted["rating"]["dish_id"], dish_id.as_str());
    assert_eq!(inserted["rating"]["comment"], "crispy");

    let counts = next_json(&mut socket).await;
    assert_eq!(counts["type"], "counts");
    assert_eq!(counts["likes"], 1);
    assert_eq!(counts["dislikes"], 0);
}

#[tokio::test]
async fn inserts_for_other_dishes_are_pushed_without_counts() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let dishes = seeded_order(&pipeline).await;
    let server = GatewayTestServer::start(pipeline.clone()).await;
    let mut socket = connect(&server).await;

    send_json(&mut socket, json!({ "type": "watch", "dish_id": dishes[0].id })).await;
    assert_eq!(next_json(&mut socket).await["type"], "counts");

    pipeline
        .submit_rating(&dishes[1].id, Outcome::Dislike, None)
        .await
        .expect("rating should be stored");

    let inserted = next_json(&mut socket).await;
    assert_eq!(inserted["type"], "rating_inserted");
    assert_eq!(inserted["rating"]["dish_id"], dishes[1].id.as_str());
    sync(&mut socket).await;
}

#[tokio::test]
async fn unwatch_stops_counts() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let dishes = seeded_order(&pipeline).await;
    let server = GatewayTestServer::start(pipeline.clone()).await;
    let mut socket = connect(&server).await;
    let dish_id = dishes[0].id.clone();

    send_json(&mut socket, json!({ "type": "watch", "dish_id": dish_id })).await;
    assert_eq!(next_json(&mut socket).await["type"], "counts");
    send_json(&mut socket, json!({ "type": "unwatch", "dish_id": dish_id })).await;
    sync(&mut socket).await;

    pipeline
        .submit_rating(&dish_id, Outcome::Like, None)
        .await
        .expect("rating should be stored");

    assert_eq!(next_json(&mut socket).await["type"], "rating_inserted");
    sync(&mut socket).await;
}

#[tokio::test]
async fn invalid_message_gets_error_and_socket_stays_open() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let server = GatewayTestServer::start(pipeline).await;
    let mut socket = connect(&server).await;

    send_json(&mut socket, json!({ "type": "chat", "message": "hi" })).await;
    let reply = next_json(&mut socket).await;
    assert_eq!(reply["type"], "error");
    assert!(
        reply["message"]
            .as_str()
            .is_some_and(|message| message.starts_with("invalid message")),
        "{reply}"
    );

    sync(&mut socket).await;
}
