//! Session registry: the room-key to room mapping.

use crate::connection::ConnId;
use crate::room::{Room, RoomKey};
use std::collections::HashMap;
use tracing::debug;

/// Mapping from room key to authoritative room state.
///
/// Insertion and removal only; no implicit expiry. Rooms are created by
/// pairing and deleted when a participant disconnects, nothing else. The
/// registry has a single owner (the router task), so no lock is needed.
#[derive(Debug, Default)]
pub struct Registry {
    rooms: HashMap<RoomKey, Room>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a room under its key.
    pub fn insert(&mut self, room: Room) {
        self.rooms.insert(room.key().clone(), room);
    }

    /// Looks up a room by key.
    pub fn get(&self, key: &str) -> Option<&Room> {
        self.rooms.get(key)
    }

    /// Looks up a room by key for mutation.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Room> {
        let room = self.rooms.get_mut(key);
        if room.is_none() {
            debug!(room = key, "Room not found");
        }
        room
    }

    /// Removes a room by key, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Room> {
        self.rooms.remove(key)
    }

    /// Checks whether the connection participates in any registered room.
    pub fn contains_participant(&self, conn: ConnId) -> bool {
        self.rooms.values().any(|r| r.is_participant(conn))
    }

    /// Returns the keys of every room the connection participates in.
    ///
    /// At most one by invariant, but collected as a set for generality in
    /// disconnect sweeps.
    pub fn rooms_of(&self, conn: ConnId) -> Vec<RoomKey> {
        self.rooms
            .values()
            .filter(|r| r.is_participant(conn))
            .map(|r| r.key().clone())
            .collect()
    }

    /// Returns the number of registered rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Checks whether no rooms are registered.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
