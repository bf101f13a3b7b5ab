//! Rooms: where a game's roster and declared game type live.
//!
//! Room membership, ready checks, and lifecycle belong to the caller. The
//! engine only needs to look a room up and write its roster back after an
//! action succeeds, which is the `RoomDirectory` seam. `InMemoryRooms` is a
//! plain map-backed directory for callers without their own storage.

mod directory;

use serde::{Deserialize, Serialize};

use crate::core::{GameType, Roster};

pub use directory::{InMemoryRooms, RoomDirectory};

/// Room identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A room as the engine sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub game_type: GameType,
    pub players: Roster,
}

impl Room {
    /// Create an empty room.
    #[must_use]
    pub fn new(id: impl Into<RoomId>, name: impl Into<String>, game_type: GameType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            game_type,
            players: Roster::default(),
        }
    }

    /// Seat the given players, in order.
    #[must_use]
    pub fn with_players(mut self, players: Roster) -> Self {
        self.players = players;
        self
    }
}
