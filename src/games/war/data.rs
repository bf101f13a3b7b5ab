//! War game data.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Card, PlayerId};

/// Outcome of the current battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleResult {
    /// Waiting for reveals.
    #[default]
    Pending,
    /// Decided; the winner collects on acknowledgement.
    Winner,
    /// Tied; the pot stays frozen until a battle is won.
    War,
}

/// War-specific state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarData {
    /// Cards revealed this battle and not yet resolved, per player.
    pub battle_cards: FxHashMap<PlayerId, SmallVec<[Card; 2]>>,

    /// Resolved battle cards awaiting a winner.
    pub war_pile: Vector<Card>,

    /// Winner of the last decided battle, or of the game once ended.
    pub last_battle_winner: Option<PlayerId>,

    /// Set once a battle ties, until the pot is collected.
    pub is_in_war: bool,

    pub battle_result: BattleResult,

    /// Ties since the pot was last collected.
    pub war_count: u32,
}

impl WarData {
    /// Cards held in the battle area and pot.
    #[must_use]
    pub fn cards_held(&self) -> usize {
        self.battle_cards.values().map(SmallVec::len).sum::<usize>() + self.war_pile.len()
    }

    /// Check if `player` has an unresolved reveal.
    #[must_use]
    pub fn has_revealed(&self, player: &PlayerId) -> bool {
        self.battle_cards.get(player).is_some_and(|cards| !cards.is_empty())
    }

    /// Most recent card `player` revealed this battle.
    #[must_use]
    pub fn revealed(&self, player: &PlayerId) -> Option<&Card> {
        self.battle_cards.get(player).and_then(|cards| cards.last())
    }
}
