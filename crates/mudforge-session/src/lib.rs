//! Player session management for Mudforge.
//!
//! This crate handles the lifecycle of a player:
//!
//! 1. **Connection**: a connection id shows up with no name and no room
//! 2. **Naming**: the first line typed becomes the player's name and
//!    places them in a room ([`SessionRegistry::bind_name`])
//! 3. **Movement**: room changes, mirrored into the durable
//!    [`PlayerRegistry`] so a returning name resumes where it left off
//! 4. **Disconnection**: the live player goes away; the record stays
//!
//! # How it fits in the stack
//!
//! ```text
//! Engine (above)  ← asks who is where, broadcasts to rooms
//!     ↕
//! Session Layer (this crate)  ← live players + durable records
//!     ↕
//! Protocol / Transport (below)  ← ConnectionId, Outbox, Storage
//! ```

mod error;
mod player;
mod records;
mod registry;

pub use error::SessionError;
pub use player::{Player, PlayerRecord};
pub use records::PlayerRegistry;
pub use registry::{BindOutcome, SessionRegistry};
