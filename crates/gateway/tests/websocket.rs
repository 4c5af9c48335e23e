use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use adpulse_gateway::{create_router, create_test_gateway_state, GatewayState};

type TestResult<T = ()> = anyhow::Result<T>;
type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

async fn spawn_server() -> TestResult<(String, GatewayState)> {
    let (address, state) = spawn_server_at().await?;
    Ok((format!("ws://{address}/ws"), state))
}

async fn spawn_server_at() -> TestResult<(SocketAddr, GatewayState)> {
    let state = create_test_gateway_state().await?;
    let app = create_router(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok((address, state))
}

/// Sends one JSON POST over plain HTTP/1.1 and returns the status code and body.
async fn post_json(address: SocketAddr, path: &str, body: Value) -> TestResult<(u16, Value)> {
    let payload = body.to_string();
    let request = format!(
        "POST {path} HTTP/1.1\r\nHost: {address}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    );

    let mut stream = TcpStream::connect(address).await?;
    stream.write_all(request.as_bytes()).await?;
    let mut raw = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut raw)).await??;

    let text = String::from_utf8(raw)?;
    let (head, body) = text
        .split_once("\r\n\r\n")
        .ok_or_else(|| anyhow::anyhow!("malformed http response"))?;
    let status = head
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("missing status line"))?
        .parse()?;
    Ok((status, serde_json::from_str(body)?))
}

fn assert_change(event: &Value, channel: &str, action: &str, id: i64) {
    assert_eq!(event["type"], "entity_changed");
    assert_eq!(event["channel"], channel);
    assert_eq!(event["action"], action);
    assert_eq!(event["id"], id);
}

async fn next_event(socket: &mut Socket) -> TestResult<Value> {
    loop {
        let message = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await?
            .ok_or_else(|| anyhow::anyhow!("socket closed"))??;
        if let Message::Text(text) = message {
            return Ok(serde_json::from_str(&text)?);
        }
    }
}

async fn wait_for_connections(state: &GatewayState, expected: usize) -> TestResult {
    for _ in 0..50 {
        if state.hub.connection_count().await == expected {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    anyhow::bail!("hub never reached {expected} connections")
}

#[tokio::test(flavor = "multi_thread")]
async fn socket_is_greeted_and_answers_ping_and_subscribe() -> TestResult {
    let (url, _state) = spawn_server().await?;
    let (mut socket, _) = connect_async(url.as_str()).await?;

    let greeting = next_event(&mut socket).await?;
    assert_eq!(greeting["type"], "connected");
    assert!(greeting["connection_id"].is_string());

    socket
        .send(Message::Text(json!({ "type": "subscribe", "channel": "campaigns" }).to_string()))
        .await?;
    let ack = next_event(&mut socket).await?;
    assert_eq!(ack["type"], "subscribed");
    assert_eq!(ack["channel"], "campaigns");

    socket
        .send(Message::Text(json!({ "type": "ping" }).to_string()))
        .await?;
    assert_eq!(next_event(&mut socket).await?["type"], "pong");

    socket.send(Message::Text("not json".into())).await?;
    assert_eq!(next_event(&mut socket).await?["type"], "error");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn changes_reach_every_socket_and_closed_ones_are_dropped() -> TestResult {
    let (url, state) = spawn_server().await?;
    let (mut first, _) = connect_async(url.as_str()).await?;
    let (mut second, _) = connect_async(url.as_str()).await?;
    next_event(&mut first).await?;
    next_event(&mut second).await?;
    wait_for_connections(&state, 2).await?;

    state.publish("clients", "created", 7).await;

    for socket in [&mut first, &mut second] {
        let event = next_event(socket).await?;
        assert_eq!(event["type"], "entity_changed");
        assert_eq!(event["channel"], "clients");
        assert_eq!(event["action"], "created");
        assert_eq!(event["id"], 7);
    }

    second.close(None).await?;
    wait_for_connections(&state, 1).await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rest_mutations_are_pushed_to_connected_sockets() -> TestResult {
    let (address, state) = spawn_server_at().await?;
    let (mut socket, _) = connect_async(format!("ws://{address}/ws").as_str()).await?;
    assert_eq!(next_event(&mut socket).await?["type"], "connected");
    wait_for_connections(&state, 1).await?;

    let (status, client) = post_json(
        address,
        "/api/clients",
        json!({ "name": "Cairo Bakes", "email": "orders@cairobakes.eg" }),
    )
    .await?;
    assert_eq!(status, 201);
    let client_id = client["id"].as_i64().expect("client id");
    assert_change(&next_event(&mut socket).await?, "clients", "created", client_id);

    let (status, campaign) = post_json(
        address,
        "/api/campaigns",
        json!({ "name": "Eid launch", "platform": "instagram", "budget": 800.0 }),
    )
    .await?;
    assert_eq!(status, 201);
    let campaign_id = campaign["id"].as_i64().expect("campaign id");
    assert_change(&next_event(&mut socket).await?, "campaigns", "created", campaign_id);

    let (status, archived) =
        post_json(address, &format!("/api/campaigns/{campaign_id}/archive"), json!({})).await?;
    assert_eq!(status, 200);
    assert_eq!(archived["is_archived"], true);
    assert_change(&next_event(&mut socket).await?, "campaigns", "archived", campaign_id);

    let (status, seeded) = post_json(address, "/api/seed", json!({})).await?;
    assert_eq!(status, 200);
    let rows: i64 = seeded["counts"]
        .as_object()
        .expect("seed counts")
        .values()
        .filter_map(Value::as_i64)
        .sum();
    assert!(rows > 0);
    assert_change(&next_event(&mut socket).await?, "seed", "completed", rows);
    Ok(())
}
