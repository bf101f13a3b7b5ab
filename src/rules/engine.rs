//! Rules engine trait for game implementations.
//!
//! Each rule module implements `RulesEngine` over its own data variant:
//! - `start`: deal from a shuffled deck and build the opening state
//! - `apply_action`: validate and apply one player action
//! - `winner`: detect the end of the game

use crate::core::action::ActionKind;
use crate::core::card::Card;
use crate::core::config::GameType;
use crate::core::error::{GameError, Result};
use crate::core::player::{PlayerId, Roster};
use crate::core::rng::GameRng;
use crate::core::state::{GameState, TableState};

/// Mutable view of a room handed to a rule module for one action.
///
/// The engine builds it from clones of the live state, so a rule module
/// may fail part-way without corrupting the stored game.
pub struct TurnContext<'a> {
    /// Envelope fields of the game state.
    pub table: &'a mut TableState,
    /// The room's roster; hands, scores, and flags are edited in place.
    pub roster: &'a mut Roster,
    /// The room's RNG stream.
    pub rng: &'a mut GameRng,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `start` receives an already shuffled 52-card deck
/// - `apply_action` must reject action kinds the game does not play with
///   `GameError::UnknownAction`
/// - `winner` returns `None` while the game continues
pub trait RulesEngine {
    /// Per-game data carried in `GameData`.
    type Data;

    /// Game type this module plays.
    fn game_type(&self) -> GameType;

    /// Deal the opening state from a shuffled deck.
    fn start(&self, roster: &mut Roster, deck: Vec<Card>) -> Result<GameState>;

    /// Apply an action from `player`, who is known to be seated.
    fn apply_action(
        &self,
        ctx: &mut TurnContext<'_>,
        data: &mut Self::Data,
        player: &PlayerId,
        action: &ActionKind,
    ) -> Result<()>;

    /// The winning player, if the game is decided.
    fn winner(&self, table: &TableState, data: &Self::Data, roster: &Roster) -> Option<PlayerId>;

    // === Convenience Methods ===

    /// Fail unless the roster has exactly `required` players.
    fn require_players(&self, roster: &Roster, required: usize) -> Result<()> {
        if roster.len() == required {
            Ok(())
        } else {
            Err(GameError::PlayerCount {
                game: self.game_type(),
                required,
                found: roster.len(),
            })
        }
    }

    /// Error for an action kind this game does not play.
    fn unknown(&self, action: &ActionKind) -> GameError {
        GameError::UnknownAction {
            game: self.game_type(),
            action: action.name(),
        }
    }
}
