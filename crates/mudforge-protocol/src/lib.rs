//! Text protocol for Mudforge.
//!
//! This crate defines the "language" between players and the world:
//!
//! - **Commands** ([`Verb`], [`Command`]): what a player can type, as a
//!   sum type instead of string comparisons.
//! - **Outbound text** ([`Outbox`], [`text`]): every line the engine
//!   sends, queued per connection and flushed once per tick.
//! - **Snapshots** ([`Codec`], [`JsonCodec`], [`Storage`]): how the room
//!   graph and the player registry are turned into bytes and kept on disk.
//!
//! ```text
//! Transport (lines) → Protocol (Command / Outbox) → Engine
//! ```

mod codec;
mod command;
mod error;
mod outbox;
mod storage;
pub mod text;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use command::{Command, Verb};
pub use error::ProtocolError;
pub use outbox::{Outbound, Outbox};
pub use storage::{FileStorage, MemoryStorage, Storage};

/// The room every new player starts in.
pub const START_ROOM: &str = "Taverna";
