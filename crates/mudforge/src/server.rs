//! `MudServer` builder: wires TCP, the snapshots on disk and the engine.

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;

use mudforge_protocol::FileStorage;
use mudforge_session::{PlayerRegistry, SessionRegistry};
use mudforge_tick::TickConfig;
use mudforge_transport::TcpLineTransport;
use mudforge_world::{CreatureSpawner, SpawnerConfig, WorldStore};

use crate::{Engine, MudError};

/// Builder for configuring and starting a Mudforge server.
///
/// # Example
///
/// ```rust,ignore
/// use mudforge::prelude::*;
///
/// let server = MudServer::builder()
///     .bind("0.0.0.0:1234")
///     .world_path("world.json")
///     .build()
///     .await?;
/// server.run_until(tokio::signal::ctrl_c()).await;
/// ```
#[derive(Debug, Clone)]
pub struct MudServerBuilder {
    bind_addr: String,
    world_path: PathBuf,
    players_path: Option<PathBuf>,
    tick_config: TickConfig,
    spawner_config: SpawnerConfig,
}

impl MudServerBuilder {
    pub const DEFAULT_BIND: &'static str = "0.0.0.0:1234";

    pub fn new() -> Self {
        Self {
            bind_addr: Self::DEFAULT_BIND.to_string(),
            world_path: PathBuf::from("world.json"),
            players_path: Some(PathBuf::from("players.json")),
            tick_config: TickConfig::default(),
            spawner_config: SpawnerConfig::default(),
        }
    }

    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Where the room graph is kept.
    pub fn world_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.world_path = path.into();
        self
    }

    /// Where player records are kept. `None` forgets players on
    /// disconnect: every name starts in the starting room.
    pub fn players_path(mut self, path: Option<PathBuf>) -> Self {
        self.players_path = path;
        self
    }

    pub fn tick_config(mut self, config: TickConfig) -> Self {
        self.tick_config = config;
        self
    }

    pub fn spawner_config(mut self, config: SpawnerConfig) -> Self {
        self.spawner_config = config;
        self
    }

    /// Loads the snapshots and binds the listener.
    ///
    /// # Errors
    /// [`MudError::World`] or [`MudError::Session`] if a snapshot can't
    /// be loaded, [`MudError::Transport`] if the address can't be bound.
    pub async fn build(self) -> Result<MudServer, MudError> {
        let world = WorldStore::open(FileStorage::new(&self.world_path))?;
        let records = self
            .players_path
            .as_ref()
            .map(|path| PlayerRegistry::open(FileStorage::new(path)))
            .transpose()?;
        let transport = TcpLineTransport::bind(&self.bind_addr).await?;

        tracing::info!(
            addr = %transport.local_addr(),
            world = %self.world_path.display(),
            rooms = world.len(),
            player_records = records.is_some(),
            "Mudforge server ready"
        );

        let engine = Engine::new(
            transport,
            world,
            SessionRegistry::new(records),
            CreatureSpawner::new(self.spawner_config),
        )
        .with_tick_config(self.tick_config);
        Ok(MudServer { engine })
    }
}

impl Default for MudServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Mudforge server. Nothing ticks until [`run`](Self::run) or
/// [`run_until`](Self::run_until) is awaited.
#[derive(Debug)]
pub struct MudServer {
    engine: Engine<TcpLineTransport>,
}

impl MudServer {
    pub fn builder() -> MudServerBuilder {
        MudServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.engine.transport().local_addr()
    }

    /// Runs the game loop until the process is terminated.
    pub async fn run(self) {
        self.engine.run().await;
    }

    /// Runs the game loop until `shutdown` resolves.
    pub async fn run_until<F: Future>(self, shutdown: F) {
        self.engine.run_until(shutdown).await;
    }
}
