//! Errors raised while starting games and applying actions.
//!
//! Every failure is synchronous and local to one action. The `Display`
//! text is the description relayed to the offending client; `kind()`
//! groups errors for callers that react by category.

use super::action::PileSide;
use super::card::{CardId, Rank};
use super::config::GameType;
use super::player::PlayerId;
use crate::rooms::RoomId;

/// Result alias used throughout the crate.
pub type Result<T, E = GameError> = std::result::Result<T, E>;

/// Error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Room or game absent.
    NotFound,
    /// Wrong player count, player not seated, not the caller's turn.
    Precondition,
    /// The move breaks a game rule.
    InvalidMove,
    /// Unrecognized or malformed action for the active game.
    UnknownAction,
    /// Engine configuration cannot be played.
    Config,
}

/// Rule violations for a single move.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("card {0} not found in hand")]
    CardNotInHand(CardId),

    #[error("no cards left to reveal")]
    NoCardsToReveal,

    #[error("no cards left in deck")]
    DeckEmpty,

    #[error("no card to play on in the {0} pile")]
    EmptyPlayPile(PileSide),

    #[error("{played} is not consecutive with {top}")]
    NotConsecutive { played: Rank, top: Rank },

    #[error("a target pile is required")]
    MissingTargetPile,

    #[error("already revealed a card this battle")]
    AlreadyRevealed,

    #[error("battle result must be acknowledged first")]
    AwaitingAcknowledgement,

    #[error("game is over")]
    GameOver,
}

/// Errors that abort an action.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error("game not found for room {0}")]
    GameNotFound(RoomId),

    #[error("player {player} not in room {room}")]
    PlayerNotInRoom { room: RoomId, player: PlayerId },

    #[error("player {0} is not seated")]
    NotSeated(PlayerId),

    #[error("{game} requires exactly {required} players, found {found}")]
    PlayerCount {
        game: GameType,
        required: usize,
        found: usize,
    },

    #[error("not your turn")]
    NotYourTurn { player: PlayerId },

    #[error(transparent)]
    InvalidMove(#[from] InvalidMove),

    #[error("unknown action type: {0}")]
    UnrecognizedAction(String),

    #[error("unknown {game} action type: {action}")]
    UnknownAction { game: GameType, action: &'static str },

    #[error("malformed {action} action: {source}")]
    MalformedAction {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl GameError {
    /// Category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::RoomNotFound(_) | GameError::GameNotFound(_) => ErrorKind::NotFound,
            GameError::PlayerNotInRoom { .. }
            | GameError::NotSeated(_)
            | GameError::PlayerCount { .. }
            | GameError::NotYourTurn { .. } => ErrorKind::Precondition,
            GameError::InvalidMove(_) => ErrorKind::InvalidMove,
            GameError::UnrecognizedAction(_)
            | GameError::UnknownAction { .. }
            | GameError::MalformedAction { .. } => ErrorKind::UnknownAction,
            GameError::InvalidConfig { .. } => ErrorKind::Config,
        }
    }
}
