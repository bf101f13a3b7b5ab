//! Speed game data.

use im::{OrdSet, Vector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Card, PileSide, PlayerId};

/// Speed's own progression, mirrored into the envelope phase on end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedPhase {
    #[default]
    WaitingForReady,
    Playing,
    Ended,
}

/// Speed-specific state.
///
/// Pile tops are the last element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedData {
    pub left_stock_pile: Vector<Card>,
    pub right_stock_pile: Vector<Card>,
    pub left_play_pile: Vector<Card>,
    pub right_play_pile: Vector<Card>,

    /// Face-down reserve behind each player's visible hand.
    pub player_decks: FxHashMap<PlayerId, Vector<Card>>,

    pub game_phase: SpeedPhase,
    pub last_played_card: Option<Card>,
    pub last_played_by: Option<PlayerId>,
    pub winner: Option<PlayerId>,

    /// Players asking to flip new stock cards.
    pub flip_requests: OrdSet<PlayerId>,

    /// Players asking to restart.
    pub restart_requests: OrdSet<PlayerId>,
}

impl SpeedData {
    /// Cards held in stock piles, play piles, and reserves.
    #[must_use]
    pub fn cards_held(&self) -> usize {
        self.left_stock_pile.len()
            + self.right_stock_pile.len()
            + self.left_play_pile.len()
            + self.right_play_pile.len()
            + self.player_decks.values().map(Vector::len).sum::<usize>()
    }

    /// Play pile on the given side.
    #[must_use]
    pub fn play_pile(&self, side: PileSide) -> &Vector<Card> {
        match side {
            PileSide::Left => &self.left_play_pile,
            PileSide::Right => &self.right_play_pile,
        }
    }

    /// Stock pile on the given side.
    #[must_use]
    pub fn stock_pile(&self, side: PileSide) -> &Vector<Card> {
        match side {
            PileSide::Left => &self.left_stock_pile,
            PileSide::Right => &self.right_stock_pile,
        }
    }

    /// Top card of a play pile.
    #[must_use]
    pub fn top_card(&self, side: PileSide) -> Option<&Card> {
        self.play_pile(side).back()
    }

    /// Size of a player's reserve.
    #[must_use]
    pub fn reserve_size(&self, player: &PlayerId) -> usize {
        self.player_decks.get(player).map_or(0, Vector::len)
    }

    /// Place a card face up on a play pile.
    pub fn push_play(&mut self, side: PileSide, card: Card) {
        match side {
            PileSide::Left => self.left_play_pile.push_back(card.revealed()),
            PileSide::Right => self.right_play_pile.push_back(card.revealed()),
        }
    }

    /// Move the top stock card onto the play pile on the same side.
    ///
    /// Returns false if the stock pile is empty.
    pub fn flip_stock(&mut self, side: PileSide) -> bool {
        let card = match side {
            PileSide::Left => self.left_stock_pile.pop_back(),
            PileSide::Right => self.right_stock_pile.pop_back(),
        };
        match card {
            Some(card) => {
                self.push_play(side, card);
                true
            }
            None => false,
        }
    }
}
