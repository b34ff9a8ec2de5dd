//! The game loop.
//!
//! One [`Engine`] owns the whole world. Each tick runs the same steps, in
//! order, on one task:
//!
//! 1. greet new connections
//! 2. drop disconnected players and tell everyone
//! 3. advance the spawner
//! 4. dispatch every pending command
//! 5. flush the outbox through the transport

use std::future::Future;

use mudforge_protocol::{Outbound, Outbox, text};
use mudforge_session::SessionRegistry;
use mudforge_tick::{TickConfig, TickScheduler};
use mudforge_transport::Transport;
use mudforge_world::{CreatureSpawner, WorldStore};

use crate::Dispatcher;

/// Owns the transport and all game state.
pub struct Engine<T: Transport> {
    transport: T,
    world: WorldStore,
    sessions: SessionRegistry,
    spawner: CreatureSpawner,
    outbox: Outbox,
    tick_config: TickConfig,
}

impl<T: Transport> Engine<T> {
    pub fn new(
        transport: T,
        world: WorldStore,
        sessions: SessionRegistry,
        spawner: CreatureSpawner,
    ) -> Self {
        Self {
            transport,
            world,
            sessions,
            spawner,
            outbox: Outbox::new(),
            tick_config: TickConfig::default(),
        }
    }

    /// Sets the clock used by [`run`](Self::run) and
    /// [`run_until`](Self::run_until).
    pub fn with_tick_config(mut self, config: TickConfig) -> Self {
        self.tick_config = config;
        self
    }

    /// Runs one tick. Never blocks on the network.
    pub fn tick(&mut self) {
        for id in self.transport.poll_new_connections() {
            self.sessions.on_connect(id);
            self.outbox.send(id, text::ASK_NAME);
        }

        for id in self.transport.poll_disconnected() {
            if let Some(name) = self.sessions.on_disconnect(id) {
                self.sessions
                    .broadcast(&mut self.outbox, |_| true, &text::left_game(&name));
            }
        }

        if let Some(event) = self.spawner.tick(&mut self.world) {
            self.sessions.broadcast_room(
                &mut self.outbox,
                &event.room,
                None,
                &text::creature_appeared(event.kind.name()),
            );
        }

        let commands = self.transport.poll_commands();
        let mut dispatcher = Dispatcher::new(&mut self.world, &mut self.sessions, &mut self.outbox);
        for command in commands {
            dispatcher.handle(command);
        }

        for Outbound { to, line } in self.outbox.drain() {
            self.transport.send(to, &line);
        }
    }

    /// Ticks forever.
    pub async fn run(self) {
        self.run_until(std::future::pending::<()>()).await;
    }

    /// Ticks until `shutdown` resolves. The tick in progress always
    /// finishes first.
    pub async fn run_until<F: Future>(mut self, shutdown: F) {
        let mut clock = TickScheduler::new(self.tick_config.clone());
        tracing::info!(
            rate_hz = clock.tick_rate_hz(),
            rooms = self.world.len(),
            "game loop started"
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = clock.wait_for_tick() => {
                    self.tick();
                    clock.record_tick_end();
                }
            }
        }

        tracing::info!(
            ticks = clock.tick_count(),
            overruns = clock.metrics().total_overruns,
            players = self.sessions.len(),
            "game loop stopped"
        );
    }

    pub fn world(&self) -> &WorldStore {
        &self.world
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn spawner(&self) -> &CreatureSpawner {
        &self.spawner
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> std::fmt::Debug for Engine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("world", &self.world)
            .field("sessions", &self.sessions.len())
            .field("spawner", &self.spawner)
            .finish_non_exhaustive()
    }
}
