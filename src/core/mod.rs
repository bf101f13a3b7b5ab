//! Core types: cards, deck, RNG, players, actions, state, configuration, errors.
//!
//! Everything here is shared by the rule modules. Game-specific data lives
//! with its rule module under `games`.

pub mod card;
pub mod deck;
pub mod rng;
pub mod player;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use card::{Card, CardId, Rank, Suit};
pub use deck::{create_deck, shuffle, shuffled_deck, DECK_SIZE};
pub use rng::GameRng;
pub use player::{Player, PlayerId, Roster};
pub use config::{EngineConfig, GameType, SpeedLayout};
pub use action::{ActionKind, GameAction, PileSide, RawAction};
pub use state::{GameData, GameState, GenericData, Phase, TableState};
pub use error::{ErrorKind, GameError, InvalidMove, Result};
