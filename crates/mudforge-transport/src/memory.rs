//! In-process transport for tests and embedding.
//!
//! `MemoryTransport` is a cheap-to-clone handle around shared state: hand
//! one clone to the engine and keep another to script connections and
//! read what was sent.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{ConnectionId, InboundCommand, Transport};

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    open: HashSet<ConnectionId>,
    new: Vec<ConnectionId>,
    gone: Vec<ConnectionId>,
    commands: Vec<InboundCommand>,
    sent: HashMap<ConnectionId, Vec<String>>,
}

/// A [`Transport`] with no sockets behind it.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a test panicked mid-call; the data is
        // still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Opens a new connection, reported on the next `poll_new_connections`.
    pub fn connect(&self) -> ConnectionId {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = ConnectionId::new(inner.next_id);
        inner.open.insert(id);
        inner.new.push(id);
        id
    }

    /// Closes a connection, reported on the next `poll_disconnected`.
    pub fn disconnect(&self, id: ConnectionId) {
        let mut inner = self.lock();
        if inner.open.remove(&id) {
            inner.gone.push(id);
        }
    }

    /// Simulates the client typing `line`. Blank lines are dropped, as
    /// a real connection would.
    pub fn push_line(&self, id: ConnectionId, line: &str) {
        let mut inner = self.lock();
        if !inner.open.contains(&id) {
            return;
        }
        if let Some(cmd) = InboundCommand::from_line(id, line) {
            inner.commands.push(cmd);
        }
    }

    /// Removes and returns every line sent to `id` so far.
    pub fn take_sent(&self, id: ConnectionId) -> Vec<String> {
        self.lock().sent.remove(&id).unwrap_or_default()
    }
}

impl Transport for MemoryTransport {
    fn poll_new_connections(&mut self) -> Vec<ConnectionId> {
        std::mem::take(&mut self.lock().new)
    }

    fn poll_disconnected(&mut self) -> Vec<ConnectionId> {
        std::mem::take(&mut self.lock().gone)
    }

    fn poll_commands(&mut self) -> Vec<InboundCommand> {
        std::mem::take(&mut self.lock().commands)
    }

    fn send(&mut self, id: ConnectionId, line: &str) {
        let mut inner = self.lock();
        if inner.open.contains(&id) {
            inner.sent.entry(id).or_default().push(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_drains_each_event_once() {
        let handle = MemoryTransport::new();
        let mut transport = handle.clone();

        let a = handle.connect();
        handle.push_line(a, "Alice");

        assert_eq!(transport.poll_new_connections(), vec![a]);
        assert!(transport.poll_new_connections().is_empty());
        assert_eq!(transport.poll_commands().len(), 1);
        assert!(transport.poll_commands().is_empty());
    }

    #[test]
    fn test_send_to_closed_connection_is_swallowed() {
        let handle = MemoryTransport::new();
        let mut transport = handle.clone();

        let a = handle.connect();
        handle.disconnect(a);
        transport.send(a, "hello?");

        assert!(handle.take_sent(a).is_empty());
        assert_eq!(transport.poll_disconnected(), vec![a]);
    }

    #[test]
    fn test_ids_are_unique() {
        let handle = MemoryTransport::new();
        assert_ne!(handle.connect(), handle.connect());
    }
}
