//! Authoritative per-room game state and its transitions.

use crate::connection::ConnId;
use crate::game::{Board, Mark};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Unique identifier for a room, derived from both connection identifiers
/// plus a monotonic pairing counter so keys never collide across
/// reconnect/rematch cycles.
pub type RoomKey = String;

/// Lifecycle status of a room's game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    /// Moves are being accepted.
    InProgress,
    /// A mark completed a line; no further moves until restart.
    Won(Mark),
    /// Board filled with no line; no further moves until restart.
    Draw,
}

/// Outcome of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Game continues; the turn has flipped to the other mark.
    Continued,
    /// The move completed a line; the room is now terminal.
    Won(Mark),
    /// The move filled the board with no line; the room is now terminal.
    Drawn,
}

/// Why a move was not applied.
///
/// Rejections are logged internally but never surface to clients; the wire
/// stays silent for untrusted or stale input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveRejection {
    /// The room has already reached a terminal state.
    #[display("game already over")]
    GameOver,
    /// The connection is not a participant of this room.
    #[display("not a participant")]
    NotAParticipant,
    /// The cell index is outside the board.
    #[display("cell index out of range")]
    OutOfRange,
    /// The cell already holds a mark.
    #[display("cell occupied")]
    CellOccupied,
    /// It is the other mark's turn.
    #[display("not this connection's turn")]
    OutOfTurn,
}

/// Authoritative paired-game session between exactly two connections.
///
/// Created atomically when the matchmaker pairs two connections and destroyed
/// when either participant disconnects. The participant map holds exactly two
/// entries with distinct marks for the room's entire life.
#[derive(Debug, Clone)]
pub struct Room {
    key: RoomKey,
    board: Board,
    turn: Mark,
    players: HashMap<ConnId, Mark>,
    status: RoomStatus,
}

impl Room {
    /// Creates a new room pairing two connections.
    ///
    /// `first` is the connection that was waiting and receives the first mark
    /// along with the opening turn; `second` receives the other mark. The
    /// assignment is fixed and deterministic.
    #[instrument]
    pub fn new(key: RoomKey, first: ConnId, second: ConnId) -> Self {
        info!(room = %key, %first, %second, "Creating room");
        let mut players = HashMap::new();
        players.insert(first, Mark::FIRST);
        players.insert(second, Mark::FIRST.opponent());
        Self {
            key,
            board: Board::new(),
            turn: Mark::FIRST,
            players,
            status: RoomStatus::InProgress,
        }
    }

    /// Returns the room key.
    pub fn key(&self) -> &RoomKey {
        &self.key
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark whose turn it is.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Returns the room's lifecycle status.
    pub fn status(&self) -> RoomStatus {
        self.status
    }

    /// Returns the participant-to-mark mapping.
    pub fn players(&self) -> &HashMap<ConnId, Mark> {
        &self.players
    }

    /// Returns the mark assigned to the given connection, if it participates.
    pub fn mark_of(&self, conn: ConnId) -> Option<Mark> {
        self.players.get(&conn).copied()
    }

    /// Checks whether the given connection participates in this room.
    pub fn is_participant(&self, conn: ConnId) -> bool {
        self.players.contains_key(&conn)
    }

    /// Returns the other participant, if `conn` is one of the two.
    pub fn opponent_of(&self, conn: ConnId) -> Option<ConnId> {
        if !self.is_participant(conn) {
            return None;
        }
        self.players.keys().copied().find(|p| *p != conn)
    }

    /// Validates and applies a move for the given connection.
    ///
    /// Checks run in a fixed order for deterministic diagnostics: terminal
    /// status, participant, cell range, cell occupancy, turn. Every rejection
    /// leaves the board and turn untouched.
    #[instrument(skip(self), fields(room = %self.key))]
    pub fn apply_move(&mut self, conn: ConnId, cell: usize) -> Result<MoveOutcome, MoveRejection> {
        if self.status != RoomStatus::InProgress {
            return Err(MoveRejection::GameOver);
        }
        let mark = self.mark_of(conn).ok_or(MoveRejection::NotAParticipant)?;
        match self.board.get(cell) {
            None => return Err(MoveRejection::OutOfRange),
            Some(Some(_)) => return Err(MoveRejection::CellOccupied),
            Some(None) => {}
        }
        if self.turn != mark {
            return Err(MoveRejection::OutOfTurn);
        }

        self.board.set(cell, mark);

        if let Some(winner) = self.board.winner() {
            info!(room = %self.key, ?winner, board = %self.board.display(), "Game won");
            self.status = RoomStatus::Won(winner);
            return Ok(MoveOutcome::Won(winner));
        }
        if self.board.is_full() {
            info!(room = %self.key, board = %self.board.display(), "Game drawn");
            self.status = RoomStatus::Draw;
            return Ok(MoveOutcome::Drawn);
        }

        self.turn = mark.opponent();
        debug!(room = %self.key, next = ?self.turn, "Move applied");
        Ok(MoveOutcome::Continued)
    }

    /// Checks whether the given connection may reset this room.
    ///
    /// Currently permissive: any connection that names the room key may reset
    /// the board, mid-game or terminal. Kept as a single policy point so the
    /// check is one line to tighten.
    pub fn may_restart(&self, _conn: ConnId) -> bool {
        true
    }

    /// Unconditionally resets the board and hands the opening turn back to
    /// the first mark, regardless of the current state.
    #[instrument(skip(self), fields(room = %self.key))]
    pub fn restart(&mut self) {
        info!(room = %self.key, "Restarting room");
        self.board.clear();
        self.turn = Mark::FIRST;
        self.status = RoomStatus::InProgress;
    }
}
