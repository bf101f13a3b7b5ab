//! # rust-cardroom
//!
//! Authoritative game logic for a multiplayer card room.
//!
//! Given a room's roster and declared game type, the engine deals a shuffled
//! deck, applies player actions, enforces each game's rules, and produces the
//! next canonical `GameState`. Transport, room lifecycle, and persistence are
//! the caller's concern.
//!
//! ## Games
//!
//! - **War**: two players reveal cards; ties go to war
//! - **Speed**: two players race to shed rank-adjacent cards onto shared piles
//! - **Generic**: a turn-based discard/draw/fold skeleton for every other game type
//!
//! ## Architecture
//!
//! - **Explicit game data**: `GameData` is a tagged union dispatched once per action
//! - **Transactional actions**: each action runs on O(1) clones of persistent
//!   (`im-rs`) state and is committed only on success
//! - **Deterministic**: a seeded engine reproduces deals and card IDs exactly
//!
//! ## Modules
//!
//! - `core`: cards, deck, RNG, players, actions, state, configuration, errors
//! - `rules`: `RulesEngine` trait implemented by each game
//! - `games`: War, Speed, and Generic rule modules
//! - `rooms`: room lookup and roster write-back
//! - `engine`: `GameEngine`, one live game per room

pub mod core;
pub mod engine;
pub mod games;
pub mod rooms;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, Card, CardId, EngineConfig, ErrorKind, GameAction, GameData, GameError, GameRng,
    GameState, GameType, InvalidMove, Phase, PileSide, Player, PlayerId, Rank, RawAction, Result,
    Roster, SpeedLayout, Suit, TableState,
};

pub use crate::engine::GameEngine;

pub use crate::games::{BattleResult, GenericGame, SpeedData, SpeedGame, SpeedPhase, WarData, WarGame};

pub use crate::rooms::{InMemoryRooms, Room, RoomDirectory, RoomId};

pub use crate::rules::{RulesEngine, TurnContext};
