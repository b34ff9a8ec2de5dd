//! Line-oriented TCP transport (plain telnet clients work).
//!
//! Every connection gets a reader task and a writer task. Readers funnel
//! their events into one unbounded channel; the game loop drains that
//! channel once at the start of each tick, so all world mutation stays on
//! the loop.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{ConnectionId, InboundCommand, LineDecoder, Transport, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

type LineSender = mpsc::UnboundedSender<String>;

enum Event {
    Connected(ConnectionId, LineSender),
    Line(ConnectionId, String),
    Disconnected(ConnectionId),
}

/// A TCP [`Transport`] speaking newline-terminated text.
pub struct TcpLineTransport {
    local_addr: SocketAddr,
    events: mpsc::UnboundedReceiver<Event>,
    writers: HashMap<ConnectionId, LineSender>,
    new: Vec<ConnectionId>,
    gone: Vec<ConnectionId>,
    commands: Vec<InboundCommand>,
    accept_task: JoinHandle<()>,
}

impl TcpLineTransport {
    /// Binds the listener and starts accepting in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| TransportError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(%local_addr, "TCP transport listening");

        let (tx, events) = mpsc::unbounded_channel();
        let accept_task = tokio::spawn(accept_loop(listener, tx));

        Ok(Self {
            local_addr,
            events,
            writers: HashMap::new(),
            new: Vec::new(),
            gone: Vec::new(),
            commands: Vec::new(),
            accept_task,
        })
    }

    /// Returns the address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Moves everything the connection tasks produced into the poll queues.
    ///
    /// Runs once per tick, from `poll_new_connections`. Events leave each
    /// connection task in order, so one drain reports a connection no
    /// later than its lines and its disconnect.
    fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                Event::Connected(id, writer) => {
                    self.writers.insert(id, writer);
                    self.new.push(id);
                }
                Event::Line(id, line) => {
                    if let Some(cmd) = InboundCommand::from_line(id, &line) {
                        self.commands.push(cmd);
                    }
                }
                Event::Disconnected(id) => {
                    self.writers.remove(&id);
                    self.gone.push(id);
                }
            }
        }
    }
}

impl Drop for TcpLineTransport {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

impl Transport for TcpLineTransport {
    fn poll_new_connections(&mut self) -> Vec<ConnectionId> {
        self.pump();
        std::mem::take(&mut self.new)
    }

    fn poll_disconnected(&mut self) -> Vec<ConnectionId> {
        std::mem::take(&mut self.gone)
    }

    fn poll_commands(&mut self) -> Vec<InboundCommand> {
        std::mem::take(&mut self.commands)
    }

    fn send(&mut self, id: ConnectionId, line: &str) {
        if let Some(writer) = self.writers.get(&id) {
            // The writer task may already be gone; the disconnect shows up
            // on a later tick.
            let _ = writer.send(line.to_string());
        }
    }
}

async fn accept_loop(listener: TcpListener, events: mpsc::UnboundedSender<Event>) {
    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!(error = %e, "accept failed");
                continue;
            }
        };

        let id = ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%id, %addr, "accepted TCP connection");

        let (line_tx, line_rx) = mpsc::unbounded_channel();
        if events.send(Event::Connected(id, line_tx)).is_err() {
            // Transport dropped; nobody is polling any more.
            return;
        }
        tokio::spawn(handle_connection(id, stream, events.clone(), line_rx));
    }
}

async fn handle_connection(
    id: ConnectionId,
    stream: TcpStream,
    events: mpsc::UnboundedSender<Event>,
    mut outbound: mpsc::UnboundedReceiver<String>,
) {
    let (mut reader, mut writer) = stream.into_split();

    let write_task = tokio::spawn(async move {
        while let Some(line) = outbound.recv().await {
            let mut bytes = line.into_bytes();
            bytes.extend_from_slice(b"\r\n");
            if let Err(e) = writer.write_all(&bytes).await {
                tracing::debug!(%id, error = %e, "write failed");
                break;
            }
        }
    });

    let mut decoder = LineDecoder::new();
    let mut buf = [0u8; 4096];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => {
                tracing::debug!(%id, "connection closed by peer");
                break;
            }
            Ok(n) => {
                for line in decoder.feed(&buf[..n]) {
                    if events.send(Event::Line(id, line)).is_err() {
                        write_task.abort();
                        return;
                    }
                }
            }
            Err(e) => {
                tracing::debug!(%id, error = %e, "read failed");
                break;
            }
        }
    }

    let _ = events.send(Event::Disconnected(id));
    // The transport drops its sender on Disconnected, which ends the
    // writer after it flushes what is queued.
    let _ = write_task.await;
}
