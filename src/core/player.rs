//! Player identification and the per-room roster.
//!
//! ## PlayerId
//!
//! Opaque player identifier assigned by the transport (e.g. a connection id).
//!
//! ## Roster
//!
//! Ordered list of a room's players. Order is significant: seat 0 is the
//! first player dealt to and the initial current player.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;

/// Opaque player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A seated player.
///
/// `hand` order is significant: the front is the next card to reveal in War,
/// and positions are slots in Speed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vector<Card>,
    pub score: u32,
    pub is_ready: bool,
    pub is_active: bool,
}

impl Player {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hand: Vector::new(),
            score: 0,
            is_ready: false,
            is_active: false,
        }
    }

    /// Number of cards in hand.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Position of a card in hand.
    #[must_use]
    pub fn find_card(&self, card: super::card::CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == card)
    }
}

/// Ordered roster of a room's players.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Create a roster from seated players.
    #[must_use]
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Number of seated players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if nobody is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Seat a player at the end of the table.
    pub fn push(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Unseat a player, returning them if they were seated.
    pub fn remove(&mut self, id: &PlayerId) -> Option<Player> {
        let index = self.position(id)?;
        Some(self.players.remove(index))
    }

    /// Check if a player is seated.
    #[must_use]
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.position(id).is_some()
    }

    /// Seat index of a player.
    #[must_use]
    pub fn position(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    /// Get a player by ID.
    #[must_use]
    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Get a mutable player by ID.
    pub fn get_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// Get a player by seat index.
    #[must_use]
    pub fn seat(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Get a mutable player by seat index.
    pub fn seat_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    /// Iterate over players in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate mutably over players in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Player IDs in seat order.
    #[must_use]
    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    /// Total cards held across all hands.
    #[must_use]
    pub fn cards_in_hands(&self) -> usize {
        self.players.iter().map(Player::hand_size).sum()
    }
}
