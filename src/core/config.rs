//! Engine configuration.
//!
//! - `GameType`: the game a room declares, selecting its rule module
//! - `SpeedLayout`: deal sizes for Speed
//! - `EngineConfig`: combines all configuration

use serde::{Deserialize, Serialize};

use super::deck::DECK_SIZE;
use super::error::{GameError, Result};

/// Game a room is configured to play.
///
/// `War` and `Speed` have dedicated rule modules; every other type is
/// played with the generic turn-based module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameType {
    Poker,
    Blackjack,
    Hearts,
    Spades,
    GoFish,
    War,
    Speed,
    Solitaire,
}

impl GameType {
    /// Wire name of the game type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GameType::Poker => "poker",
            GameType::Blackjack => "blackjack",
            GameType::Hearts => "hearts",
            GameType::Spades => "spades",
            GameType::GoFish => "go-fish",
            GameType::War => "war",
            GameType::Speed => "speed",
            GameType::Solitaire => "solitaire",
        }
    }

    /// Cards dealt to each player when a generic game starts.
    ///
    /// ```
    /// use rust_cardroom::core::GameType;
    ///
    /// assert_eq!(GameType::Poker.initial_hand_size(), 5);
    /// assert_eq!(GameType::Hearts.initial_hand_size(), 13);
    /// assert_eq!(GameType::Solitaire.initial_hand_size(), 7);
    /// ```
    #[must_use]
    pub const fn initial_hand_size(self) -> usize {
        match self {
            GameType::Poker => 5,
            GameType::Blackjack => 2,
            GameType::Hearts => 13,
            GameType::GoFish => 7,
            GameType::War => 0,
            _ => 7,
        }
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Deal sizes for Speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedLayout {
    /// Visible hand slots per player.
    pub hand_slots: usize,
    /// Face-down reserve behind each player's hand.
    pub reserve_size: usize,
    /// Cards in each of the two stock piles.
    pub stock_size: usize,
}

impl Default for SpeedLayout {
    fn default() -> Self {
        Self {
            hand_slots: 5,
            reserve_size: 10,
            stock_size: 6,
        }
    }
}

impl SpeedLayout {
    /// Cards the layout deals out of the deck for two players.
    ///
    /// Saturates at `usize::MAX`, which no deck can satisfy.
    #[must_use]
    pub const fn cards_dealt(&self) -> usize {
        let per_player = self.hand_slots.saturating_add(self.reserve_size);
        per_player.saturating_mul(2).saturating_add(self.stock_size.saturating_mul(2))
    }
}

/// Engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the engine RNG. `None` seeds from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Speed deal sizes.
    #[serde(default)]
    pub speed: SpeedLayout,
}

impl EngineConfig {
    /// Use a fixed seed so deals and card IDs are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the Speed layout.
    #[must_use]
    pub fn with_speed_layout(mut self, layout: SpeedLayout) -> Self {
        self.speed = layout;
        self
    }

    /// Check the configuration can be played with one deck.
    pub fn validate(&self) -> Result<()> {
        if self.speed.hand_slots == 0 || self.speed.stock_size == 0 {
            return Err(GameError::InvalidConfig {
                reason: "speed hand and stock piles must hold at least one card".into(),
            });
        }
        if self.speed.cards_dealt() > DECK_SIZE {
            return Err(GameError::InvalidConfig {
                reason: format!(
                    "speed layout deals {} cards from a {}-card deck",
                    self.speed.cards_dealt(),
                    DECK_SIZE
                ),
            });
        }
        Ok(())
    }
}
