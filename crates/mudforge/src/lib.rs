//! # Mudforge
//!
//! A small multiplayer text-adventure world engine.
//!
//! Players connect over telnet, pick a name, talk, walk the room graph
//! and build it further (create, describe, zone and delete rooms) while
//! creatures spawn on a timer. Everything runs on one game loop ticking
//! five times a second.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mudforge::prelude::*;
//!
//! # async fn start() -> Result<(), MudError> {
//! let server = MudServer::builder()
//!     .bind("0.0.0.0:1234")
//!     .build()
//!     .await?;
//! server.run().await;
//! # Ok(())
//! # }
//! ```

mod dispatcher;
mod engine;
mod error;
mod server;

pub use dispatcher::Dispatcher;
pub use engine::Engine;
pub use error::MudError;
pub use server::{MudServer, MudServerBuilder};

pub use mudforge_protocol as protocol;
pub use mudforge_session as session;
pub use mudforge_tick as tick;
pub use mudforge_transport as transport;
pub use mudforge_world as world;

/// Everything needed to start a server or drive an engine in tests.
pub mod prelude {
    pub use crate::{Dispatcher, Engine, MudError, MudServer, MudServerBuilder};
    pub use mudforge_protocol::{FileStorage, MemoryStorage, START_ROOM, Storage};
    pub use mudforge_session::{PlayerRegistry, SessionRegistry};
    pub use mudforge_tick::{TickConfig, TickPolicy};
    pub use mudforge_transport::{ConnectionId, MemoryTransport, TcpLineTransport, Transport};
    pub use mudforge_world::{CreatureSpawner, SpawnerConfig, WorldStore};
}
