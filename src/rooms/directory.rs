//! Room lookup and roster write-back.

use log::debug;
use rustc_hash::FxHashMap;

use super::{Room, RoomId};
use crate::core::{GameError, Player, PlayerId, Result, Roster};

/// Lookup and roster write-back for the rooms a `GameEngine` serves.
pub trait RoomDirectory {
    /// Look up a room.
    fn room(&self, id: &RoomId) -> Option<&Room>;

    /// Replace a room's roster with the one produced by a successful action.
    fn commit_roster(&mut self, id: &RoomId, roster: Roster) -> Result<()>;
}

/// Map-backed room directory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRooms {
    rooms: FxHashMap<RoomId, Room>,
}

impl InMemoryRooms {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a room.
    pub fn insert(&mut self, room: Room) {
        self.rooms.insert(room.id.clone(), room);
    }

    /// Remove a room.
    pub fn remove(&mut self, id: &RoomId) -> Option<Room> {
        self.rooms.remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Seat a player. Joining a room twice is a no-op.
    pub fn join(&mut self, id: &RoomId, player: Player) -> Result<()> {
        let room = self.room_mut(id)?;
        if !room.players.contains(&player.id) {
            debug!("{} joined room {id}", player.id);
            room.players.push(player);
        }
        Ok(())
    }

    /// Unseat a player. A room left empty is removed.
    pub fn leave(&mut self, id: &RoomId, player: &PlayerId) -> Result<()> {
        let room = self.room_mut(id)?;
        room.players.remove(player);
        if room.players.is_empty() {
            debug!("room {id} is empty, removing");
            self.rooms.remove(id);
        }
        Ok(())
    }

    /// Set a seated player's ready flag.
    pub fn set_ready(&mut self, id: &RoomId, player: &PlayerId, ready: bool) -> Result<()> {
        let room = self.room_mut(id)?;
        let seat = room.players.get_mut(player).ok_or_else(|| GameError::PlayerNotInRoom {
            room: id.clone(),
            player: player.clone(),
        })?;
        seat.is_ready = ready;
        Ok(())
    }

    fn room_mut(&mut self, id: &RoomId) -> Result<&mut Room> {
        self.rooms.get_mut(id).ok_or_else(|| GameError::RoomNotFound(id.clone()))
    }
}

impl RoomDirectory for InMemoryRooms {
    fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    fn commit_roster(&mut self, id: &RoomId, roster: Roster) -> Result<()> {
        self.room_mut(id)?.players = roster;
        Ok(())
    }
}
