//! Game state: the shared envelope plus per-game data.
//!
//! ## TableState
//!
//! Fields every game carries:
//! - Current player, phase
//! - Shared deck and discard pile
//! - Turn and round counters
//!
//! ## GameData
//!
//! Tagged union of the per-game shapes. The engine matches on it once per
//! action and hands the rule module its own variant.
//!
//! Piles use `im` persistent vectors so the engine can clone a state per
//! action in O(1) and commit only on success.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::config::GameType;
use super::player::{PlayerId, Roster};
use crate::games::speed::SpeedData;
use crate::games::war::WarData;

/// Game phase shown to clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Waiting,
    Dealing,
    Playing,
    /// War: a battle has a winner awaiting acknowledgement.
    Battle,
    /// War: the last battle tied.
    War,
    Ended,
}

/// Envelope fields shared by every game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    /// Player whose turn it is (informational in War and Speed).
    pub current_player: PlayerId,

    /// Current phase.
    pub phase: Phase,

    /// Shared draw pile (top = end).
    pub deck: Vector<Card>,

    /// Shared discard pile (top = end).
    pub discard_pile: Vector<Card>,

    /// Turn counter (starts at 1).
    pub turn: u32,

    /// Round counter (starts at 1).
    pub round: u32,
}

impl TableState {
    /// Create a table in the playing phase with the given draw pile.
    #[must_use]
    pub fn new(current_player: PlayerId, deck: Vector<Card>) -> Self {
        Self {
            current_player,
            phase: Phase::Playing,
            deck,
            discard_pile: Vector::new(),
            turn: 1,
            round: 1,
        }
    }
}

/// Data for games played with the generic turn-based module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericData {
    pub game_type: GameType,
}

/// Per-game data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameData {
    War(WarData),
    Speed(SpeedData),
    Generic(GenericData),
}

impl GameData {
    /// Game type this data belongs to.
    #[must_use]
    pub fn game_type(&self) -> GameType {
        match self {
            GameData::War(_) => GameType::War,
            GameData::Speed(_) => GameType::Speed,
            GameData::Generic(data) => data.game_type,
        }
    }

    /// Cards held in game-specific piles.
    #[must_use]
    pub fn cards_held(&self) -> usize {
        match self {
            GameData::War(data) => data.cards_held(),
            GameData::Speed(data) => data.cards_held(),
            GameData::Generic(_) => 0,
        }
    }

    /// War data, if this is a War game.
    #[must_use]
    pub fn as_war(&self) -> Option<&WarData> {
        match self {
            GameData::War(data) => Some(data),
            _ => None,
        }
    }

    /// Speed data, if this is a Speed game.
    #[must_use]
    pub fn as_speed(&self) -> Option<&SpeedData> {
        match self {
            GameData::Speed(data) => Some(data),
            _ => None,
        }
    }
}

/// Complete state of one room's game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(flatten)]
    pub table: TableState,
    pub game_data: GameData,
}

impl GameState {
    /// Game type being played.
    #[must_use]
    pub fn game_type(&self) -> GameType {
        self.game_data.game_type()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.table.phase
    }

    /// Cards outside player hands: deck, discard, and game piles.
    #[must_use]
    pub fn cards_on_table(&self) -> usize {
        self.table.deck.len() + self.table.discard_pile.len() + self.game_data.cards_held()
    }

    /// All cards in the game, including the roster's hands.
    ///
    /// Always equals the deck size for a live game.
    #[must_use]
    pub fn total_cards(&self, roster: &Roster) -> usize {
        self.cards_on_table() + roster.cards_in_hands()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{create_deck, GameRng};

    fn generic_state() -> GameState {
        let deck: Vector<Card> = create_deck(&mut GameRng::new(1)).into_iter().collect();
        GameState {
            table: TableState::new(PlayerId::new("p1"), deck),
            game_data: GameData::Generic(GenericData {
                game_type: GameType::Poker,
            }),
        }
    }

    #[test]
    fn test_table_defaults() {
        let state = generic_state();

        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.table.turn, 1);
        assert_eq!(state.table.round, 1);
        assert!(state.table.discard_pile.is_empty());
        assert_eq!(state.game_type(), GameType::Poker);
    }

    #[test]
    fn test_total_cards_counts_hands() {
        let mut state = generic_state();
        let mut roster = Roster::new(vec![crate::core::Player::new("p1", "Alice")]);

        for _ in 0..5 {
            if let (Some(card), Some(player)) = (state.table.deck.pop_back(), roster.seat_mut(0)) {
                player.hand.push_back(card);
            }
        }

        assert_eq!(state.cards_on_table(), 47);
        assert_eq!(state.total_cards(&roster), 52);
    }

    #[test]
    fn test_serialization_shape() {
        let state = generic_state();
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["currentPlayer"], "p1");
        assert_eq!(json["phase"], "playing");
        assert_eq!(json["gameData"]["kind"], "generic");
        assert_eq!(json["gameData"]["gameType"], "poker");

        let back: GameState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
