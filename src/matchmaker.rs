//! Single-slot matchmaking queue.

use crate::connection::ConnId;
use crate::room::RoomKey;
use tracing::{debug, info, instrument};

/// A freshly formed pairing, ready to become a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    /// Key for the room about to be created. Unique per pairing instance:
    /// both connection identifiers joined with `#` plus a monotonic counter,
    /// so a key is never reused even if raw identifiers recur after
    /// reconnects.
    pub key: RoomKey,
    /// The connection that was waiting; receives the first mark and the
    /// opening turn.
    pub first: ConnId,
    /// The requester that consumed the slot; receives the second mark.
    pub second: ConnId,
}

/// Result of an enqueue request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enqueue {
    /// The connection now occupies the waiting slot.
    Waiting,
    /// The connection was already the waiting occupant; nothing changed.
    AlreadyWaiting,
    /// The waiting occupant has been paired with the requester.
    Paired(Pairing),
}

/// Single-capacity holding area for an unpaired connection seeking a match.
///
/// Pairing is strictly FIFO at depth one: the waiting occupant pairs with the
/// very next distinct requester.
#[derive(Debug, Default)]
pub struct Matchmaker {
    waiting: Option<ConnId>,
    pairings: u64,
}

impl Matchmaker {
    /// Creates an empty matchmaker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current waiting occupant, if any.
    pub fn waiting(&self) -> Option<ConnId> {
        self.waiting
    }

    /// Requests matchmaking for a connection.
    ///
    /// An empty slot is occupied; a slot held by a different connection is
    /// atomically consumed into a [`Pairing`]. A request from the connection
    /// already holding the slot is a no-op.
    #[instrument(skip(self))]
    pub fn enqueue(&mut self, conn: ConnId) -> Enqueue {
        match self.waiting {
            None => {
                info!(%conn, "Connection waiting for an opponent");
                self.waiting = Some(conn);
                Enqueue::Waiting
            }
            Some(occupant) if occupant == conn => {
                debug!(%conn, "Duplicate queue request ignored");
                Enqueue::AlreadyWaiting
            }
            Some(occupant) => {
                self.waiting = None;
                self.pairings += 1;
                let key = format!("{occupant}#{conn}#{}", self.pairings);
                info!(room = %key, first = %occupant, second = %conn, "Paired");
                Enqueue::Paired(Pairing {
                    key,
                    first: occupant,
                    second: conn,
                })
            }
        }
    }

    /// Clears the waiting slot iff this connection holds it.
    ///
    /// Returns whether the slot was cleared.
    #[instrument(skip(self))]
    pub fn cancel(&mut self, conn: ConnId) -> bool {
        if self.waiting == Some(conn) {
            info!(%conn, "Waiting connection left the queue");
            self.waiting = None;
            true
        } else {
            false
        }
    }
}
