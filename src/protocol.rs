//! Wire protocol: inbound client intents and outbound server events.
//!
//! Messages travel as JSON text frames, internally tagged on `type` with
//! kebab-case names (`join-queue`, `session-started`, ...). Malformed frames
//! are dropped at the transport edge without a reply.

use crate::game::{Cell, Mark};
use crate::room::RoomKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An inbound message from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientIntent {
    /// Request matchmaking while idle.
    JoinQueue,
    /// Withdraw from matchmaking while still unpaired.
    LeaveQueue,
    /// Place a mark in a cell of the named room.
    PlayMove {
        /// Room the move targets.
        room: RoomKey,
        /// Cell index, 0-8 row-major.
        cell: usize,
    },
    /// Reset the named room's board.
    Restart {
        /// Room to reset.
        room: RoomKey,
    },
}

/// An outbound notification from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Sent to a connection that now occupies the waiting slot.
    Waiting,
    /// Sent to both participants when a room is created.
    SessionStarted {
        /// Key of the new room.
        room: RoomKey,
        /// Connection identifier to assigned mark, for both participants.
        marks: HashMap<String, Mark>,
        /// Mark that opens the game.
        turn: Mark,
    },
    /// Sent to both participants after an accepted, non-terminal move.
    MoveApplied {
        /// Board after the move.
        board: [Cell; 9],
        /// Mark to move next.
        turn: Mark,
    },
    /// Sent to both participants when a move ends the game.
    GameOver {
        /// Winning mark, or `None` for a draw.
        winner: Option<Mark>,
        /// Final board.
        board: [Cell; 9],
    },
    /// Sent to both participants after a restart.
    RoomRestarted {
        /// The reset (empty) board.
        board: [Cell; 9],
        /// Mark that opens the fresh game.
        turn: Mark,
    },
    /// Sent to the remaining participant when the other disconnects.
    OpponentLeft,
}
