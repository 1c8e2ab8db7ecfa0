//! Event router: single-consumer dispatch of connection events.
//!
//! One router instance owns all mutable matchmaking and session state. It is
//! driven by a single task draining an event channel, so every event is
//! handled to completion before the next and no locking is required anywhere
//! in the core.

use crate::connection::ConnId;
use crate::matchmaker::{Enqueue, Matchmaker};
use crate::protocol::{ClientIntent, ServerEvent};
use crate::registry::Registry;
use crate::room::{MoveOutcome, Room};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Per-connection outbound channel for server events.
///
/// The transport edge owns the receiving half and forwards events onto the
/// socket; the router only ever pushes.
pub type EventSink = mpsc::UnboundedSender<ServerEvent>;

/// An inbound unit of work for the dispatch loop.
#[derive(Debug)]
pub enum Event {
    /// A connection opened and registered its outbound channel.
    Connected(ConnId, EventSink),
    /// A parsed intent arrived from a connection.
    Intent(ConnId, ClientIntent),
    /// A connection's transport closed. Emitted by the transport edge after
    /// its read loop ends, so no intent from this connection can follow.
    Disconnected(ConnId),
}

/// Owns the waiting slot, the session registry, and the peer outboxes, and
/// processes one event at a time to completion.
#[derive(Debug, Default)]
pub struct Router {
    matchmaker: Matchmaker,
    rooms: Registry,
    peers: HashMap<ConnId, EventSink>,
}

impl Router {
    /// Creates a router with no connections, no waiter, and no rooms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session registry, for inspection.
    pub fn rooms(&self) -> &Registry {
        &self.rooms
    }

    /// Returns the matchmaker, for inspection.
    pub fn matchmaker(&self) -> &Matchmaker {
        &self.matchmaker
    }

    /// Handles one event to completion.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Connected(conn, sink) => self.connected(conn, sink),
            Event::Intent(conn, intent) => self.dispatch(conn, intent),
            Event::Disconnected(conn) => self.disconnected(conn),
        }
    }

    fn connected(&mut self, conn: ConnId, sink: EventSink) {
        info!(%conn, "Connection registered");
        if self.peers.insert(conn, sink).is_some() {
            warn!(%conn, "Replaced an existing outbound channel");
        }
    }

    fn dispatch(&mut self, conn: ConnId, intent: ClientIntent) {
        match intent {
            ClientIntent::JoinQueue => self.join_queue(conn),
            ClientIntent::LeaveQueue => {
                self.matchmaker.cancel(conn);
            }
            ClientIntent::PlayMove { room, cell } => self.play_move(conn, &room, cell),
            ClientIntent::Restart { room } => self.restart(conn, &room),
        }
    }

    /// Routes a matchmaking request: occupy the slot, or pair with the
    /// current waiter and open a room. A request from a connection already
    /// waiting or already in a room is a no-op.
    fn join_queue(&mut self, conn: ConnId) {
        if self.rooms.contains_participant(conn) {
            debug!(%conn, "Queue request ignored, connection already in a room");
            return;
        }
        match self.matchmaker.enqueue(conn) {
            Enqueue::Waiting => self.send(conn, ServerEvent::Waiting),
            Enqueue::AlreadyWaiting => {}
            Enqueue::Paired(pairing) => {
                let room = Room::new(pairing.key, pairing.first, pairing.second);
                let marks = room
                    .players()
                    .iter()
                    .map(|(peer, mark)| (peer.to_string(), *mark))
                    .collect();
                let event = ServerEvent::SessionStarted {
                    room: room.key().clone(),
                    marks,
                    turn: room.turn(),
                };
                let audience: Vec<ConnId> = room.players().keys().copied().collect();
                self.rooms.insert(room);
                self.broadcast(&audience, event);
            }
        }
    }

    /// Applies a move and broadcasts the resulting state change. Missing
    /// rooms and rejected moves produce no observable output.
    fn play_move(&mut self, conn: ConnId, key: &str, cell: usize) {
        let Some(room) = self.rooms.get_mut(key) else {
            return;
        };
        let outcome = match room.apply_move(conn, cell) {
            Ok(outcome) => outcome,
            Err(reason) => {
                debug!(%conn, room = key, %reason, "Move rejected");
                return;
            }
        };
        let board = *room.board().cells();
        let event = match outcome {
            MoveOutcome::Continued => ServerEvent::MoveApplied {
                board,
                turn: room.turn(),
            },
            MoveOutcome::Won(winner) => ServerEvent::GameOver {
                winner: Some(winner),
                board,
            },
            MoveOutcome::Drawn => ServerEvent::GameOver {
                winner: None,
                board,
            },
        };
        let audience: Vec<ConnId> = room.players().keys().copied().collect();
        self.broadcast(&audience, event);
    }

    /// Resets a room's board and broadcasts the fresh state. A missing room
    /// is a no-op.
    fn restart(&mut self, conn: ConnId, key: &str) {
        let Some(room) = self.rooms.get_mut(key) else {
            return;
        };
        if !room.may_restart(conn) {
            debug!(%conn, room = key, "Restart rejected by policy");
            return;
        }
        room.restart();
        let event = ServerEvent::RoomRestarted {
            board: *room.board().cells(),
            turn: room.turn(),
        };
        let audience: Vec<ConnId> = room.players().keys().copied().collect();
        self.broadcast(&audience, event);
    }

    /// Tears down everything a connection held: the waiting slot if it was
    /// the occupant, and every room it participated in. The other participant
    /// of each torn-down room is notified before deletion.
    fn disconnected(&mut self, conn: ConnId) {
        self.matchmaker.cancel(conn);
        for key in self.rooms.rooms_of(conn) {
            if let Some(room) = self.rooms.remove(&key) {
                info!(room = %key, %conn, "Room torn down after disconnect");
                if let Some(other) = room.opponent_of(conn) {
                    self.send(other, ServerEvent::OpponentLeft);
                }
            }
        }
        self.peers.remove(&conn);
        info!(%conn, "Connection deregistered");
    }

    fn send(&self, conn: ConnId, event: ServerEvent) {
        if let Some(sink) = self.peers.get(&conn) {
            if sink.send(event).is_err() {
                // The disconnect event for this peer is already in flight.
                debug!(%conn, "Peer channel closed, dropping event");
            }
        }
    }

    fn broadcast(&self, audience: &[ConnId], event: ServerEvent) {
        for conn in audience {
            self.send(*conn, event.clone());
        }
    }
}
