//! Integration tests for the TCP line transport.
//!
//! These spin up a real listener on an OS-assigned port and talk to it
//! with a plain `TcpStream`, the way a telnet client would.

#[cfg(feature = "tcp")]
mod tcp {
    use std::time::Duration;

    use mudforge_transport::{ConnectionId, InboundCommand, TcpLineTransport, Transport};
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpStream;

    /// New connections, disconnects and commands seen in one tick.
    type Batch = (Vec<ConnectionId>, Vec<ConnectionId>, Vec<InboundCommand>);

    /// One round of polls in the order the engine's tick makes them.
    fn tick(transport: &mut TcpLineTransport) -> Batch {
        let new = transport.poll_new_connections();
        let gone = transport.poll_disconnected();
        let cmds = transport.poll_commands();
        (new, gone, cmds)
    }

    /// Ticks until `done` holds or a second elapses, returning every tick's
    /// batches in order.
    async fn tick_until(
        transport: &mut TcpLineTransport,
        mut done: impl FnMut(&[Batch]) -> bool,
    ) -> Vec<Batch> {
        let mut ticks = Vec::new();
        for _ in 0..100 {
            ticks.push(tick(transport));
            if done(&ticks) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        ticks
    }

    /// Index of the first tick where `pick` yields something.
    fn first_tick<T>(ticks: &[Batch], pick: impl Fn(&Batch) -> &Vec<T>) -> Option<usize> {
        ticks.iter().position(|t| !pick(t).is_empty())
    }

    /// Polls `f` until it yields a non-empty batch or a second elapses.
    async fn poll_until<T>(mut f: impl FnMut() -> Vec<T>) -> Vec<T> {
        for _ in 0..100 {
            let got = f();
            if !got.is_empty() {
                return got;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        Vec::new()
    }

    #[tokio::test]
    async fn test_tcp_connect_line_and_reply() {
        let mut transport = TcpLineTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr();

        let client = TcpStream::connect(addr).await.expect("client should connect");
        let (read_half, mut write_half) = client.into_split();
        let mut lines = BufReader::new(read_half).lines();

        let new = poll_until(|| transport.poll_new_connections()).await;
        assert_eq!(new.len(), 1);
        let id = new[0];

        write_half.write_all(b"say ciao a tutti\r\n").await.unwrap();
        let cmds = poll_until(|| {
            transport.poll_new_connections();
            transport.poll_commands()
        })
        .await;
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].id, id);
        assert_eq!(cmds[0].verb, "say");
        assert_eq!(cmds[0].args, "ciao a tutti");

        transport.send(id, "Qual è il tuo nome?");
        let reply = tokio::time::timeout(Duration::from_secs(1), lines.next_line())
            .await
            .expect("reply in time")
            .unwrap()
            .expect("a line");
        assert_eq!(reply.trim_end(), "Qual è il tuo nome?");
    }

    #[tokio::test]
    async fn test_tcp_client_close_reports_disconnect() {
        let mut transport = TcpLineTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let client = TcpStream::connect(transport.local_addr()).await.unwrap();

        let new = poll_until(|| transport.poll_new_connections()).await;
        assert_eq!(new.len(), 1);

        drop(client);
        let gone = poll_until(|| {
            transport.poll_new_connections();
            transport.poll_disconnected()
        })
        .await;
        assert_eq!(gone, new);

        // Sending after the disconnect is swallowed.
        transport.send(new[0], "anyone?");
    }

    #[tokio::test]
    async fn test_tcp_blank_lines_are_ignored() {
        let mut transport = TcpLineTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let mut client = TcpStream::connect(transport.local_addr()).await.unwrap();
        poll_until(|| transport.poll_new_connections()).await;

        client.write_all(b"\r\n   \r\nlook\r\n").await.unwrap();
        let cmds = poll_until(|| {
            transport.poll_new_connections();
            transport.poll_commands()
        })
        .await;
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].verb, "look");
    }

    #[tokio::test]
    async fn test_tcp_first_line_never_precedes_its_connection() {
        let mut transport = TcpLineTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");

        // The tick starts before the client shows up.
        assert!(transport.poll_new_connections().is_empty());
        let mut client = TcpStream::connect(transport.local_addr()).await.unwrap();
        client.write_all(b"Alice\r\n").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        // The rest of that tick sees nothing of the late arrival.
        assert!(transport.poll_disconnected().is_empty());
        assert!(transport.poll_commands().is_empty());

        let ticks = tick_until(&mut transport, |ticks| first_tick(ticks, |t| &t.2).is_some()).await;
        let connected = first_tick(&ticks, |t| &t.0).expect("connection reported");
        let named = first_tick(&ticks, |t| &t.2).expect("name line reported");
        assert!(connected <= named);

        let id = ticks[connected].0[0];
        let cmd = &ticks[named].2[0];
        assert_eq!(cmd.id, id);
        assert_eq!(cmd.verb, "Alice");
    }

    #[tokio::test]
    async fn test_tcp_disconnect_never_precedes_its_connection() {
        let mut transport = TcpLineTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");

        assert!(transport.poll_new_connections().is_empty());
        let client = TcpStream::connect(transport.local_addr()).await.unwrap();
        drop(client);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(transport.poll_disconnected().is_empty());
        assert!(transport.poll_commands().is_empty());

        let ticks = tick_until(&mut transport, |ticks| first_tick(ticks, |t| &t.1).is_some()).await;
        let connected = first_tick(&ticks, |t| &t.0).expect("connection reported");
        let closed = first_tick(&ticks, |t| &t.1).expect("disconnect reported");
        assert!(connected <= closed);
        assert_eq!(ticks[closed].1, ticks[connected].0);
    }
}
