//! Integration tests for `MudServer`: a real listener, real files, and a
//! plain `TcpStream` playing the telnet client.

use std::time::Duration;

use mudforge::prelude::*;
use mudforge::protocol::text;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedReadHalf;
use tokio::sync::oneshot;

async fn next_line(lines: &mut Lines<BufReader<OwnedReadHalf>>) -> String {
    tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .expect("line in time")
        .expect("read ok")
        .expect("connection open")
        .trim_end()
        .to_string()
}

async fn start(dir: &tempfile::TempDir) -> (std::net::SocketAddr, oneshot::Sender<()>) {
    let server = MudServer::builder()
        .bind("127.0.0.1:0")
        .world_path(dir.path().join("world.json"))
        .players_path(Some(dir.path().join("players.json")))
        .tick_config(TickConfig::with_rate(50))
        .build()
        .await
        .expect("server should start");
    let addr = server.local_addr();

    let (stop, stopped) = oneshot::channel::<()>();
    tokio::spawn(server.run_until(stopped));
    (addr, stop)
}

#[tokio::test]
async fn test_server_seeds_world_file() {
    let dir = tempfile::tempdir().unwrap();
    let (_addr, stop) = start(&dir).await;

    let json = std::fs::read_to_string(dir.path().join("world.json")).unwrap();
    assert!(json.contains(START_ROOM));
    assert!(json.contains("Esterno"));
    let _ = stop.send(());
}

#[tokio::test]
async fn test_server_name_and_say_over_tcp() {
    let dir = tempfile::tempdir().unwrap();
    let (addr, stop) = start(&dir).await;

    let client = TcpStream::connect(addr).await.unwrap();
    let (read_half, mut write_half) = client.into_split();
    let mut lines = BufReader::new(read_half).lines();

    assert_eq!(next_line(&mut lines).await, text::ASK_NAME);
    write_half.write_all(b"Alice\r\n").await.unwrap();
    assert_eq!(next_line(&mut lines).await, text::entered_game("Alice"));
    assert_eq!(next_line(&mut lines).await, text::welcome("Alice"));
    let _description = next_line(&mut lines).await;

    write_half.write_all(b"di ciao\n").await.unwrap();
    assert_eq!(next_line(&mut lines).await, "Alice says: ciao");

    let records = std::fs::read_to_string(dir.path().join("players.json")).unwrap();
    assert!(records.contains("Alice"));
    let _ = stop.send(());
}

#[tokio::test]
async fn test_server_bind_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = MudServer::builder()
        .bind("not-an-address")
        .world_path(dir.path().join("world.json"))
        .players_path(None)
        .build()
        .await;

    assert!(matches!(result, Err(MudError::Transport(_))));
}

#[tokio::test]
async fn test_server_corrupt_world_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let result = MudServer::builder()
        .bind("127.0.0.1:0")
        .world_path(path)
        .players_path(None)
        .build()
        .await;

    assert!(matches!(result, Err(MudError::World(_))));
}
