//! Quickmatch - realtime matchmaking and session server for two-player
//! tic-tac-toe.
//!
//! # Architecture
//!
//! - **Matchmaker**: single-slot FIFO pairing of anonymous connections
//! - **Room**: authoritative per-room board, turn, and participant state
//! - **Registry**: room-key to room session map
//! - **Router**: single-consumer dispatch of client intents and broadcasts
//! - **Server**: WebSocket transport edge (axum)
//!
//! Clients connect over WebSocket, request matchmaking, and receive every
//! state transition of their room as a JSON event. The server is the sole
//! arbiter of truth: invalid or stale intents are silently dropped.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod connection;
mod game;
mod matchmaker;
mod protocol;
mod registry;
mod room;
mod router;

/// WebSocket transport edge.
pub mod server;

// Crate-level exports - connection identity
pub use connection::ConnId;

// Crate-level exports - game types
pub use game::{Board, Cell, Mark};

// Crate-level exports - matchmaking
pub use matchmaker::{Enqueue, Matchmaker, Pairing};

// Crate-level exports - wire protocol
pub use protocol::{ClientIntent, ServerEvent};

// Crate-level exports - session registry
pub use registry::Registry;

// Crate-level exports - room state
pub use room::{MoveOutcome, MoveRejection, Room, RoomKey, RoomStatus};

// Crate-level exports - event routing
pub use router::{Event, EventSink, Router};
