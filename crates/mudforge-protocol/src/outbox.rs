//! Outbound lines produced during a tick.
//!
//! Handlers never write to the network. They queue lines in an [`Outbox`];
//! the engine flushes it through the transport before the tick ends, so
//! delivery is still synchronous with the command that caused it.

use mudforge_transport::ConnectionId;

/// One line for one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub to: ConnectionId,
    pub line: String,
}

/// Ordered queue of outbound lines.
#[derive(Debug, Default)]
pub struct Outbox {
    lines: Vec<Outbound>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a line for a single connection.
    pub fn send(&mut self, to: ConnectionId, line: impl Into<String>) {
        self.lines.push(Outbound {
            to,
            line: line.into(),
        });
    }

    /// Queues the same line for several connections.
    pub fn send_all(&mut self, to: impl IntoIterator<Item = ConnectionId>, line: &str) {
        for id in to {
            self.send(id, line);
        }
    }

    /// Removes and yields everything queued so far, in order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Outbound> {
        self.lines.drain(..)
    }

    /// Lines queued for `id`, in order. Mostly useful in tests.
    pub fn lines_for(&self, id: ConnectionId) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|o| o.to == id)
            .map(|o| o.line.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
