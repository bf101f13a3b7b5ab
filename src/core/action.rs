//! Player actions.
//!
//! The transport delivers actions as `{type, playerId, data}` JSON
//! (`RawAction`). Converting to `GameAction` decodes `data` into the typed
//! payload of the named action kind:
//!
//! ```
//! use rust_cardroom::core::{ActionKind, GameAction, PileSide, RawAction};
//!
//! let raw: RawAction = serde_json::from_str(r#"{
//!     "type": "play_card",
//!     "playerId": "p1",
//!     "data": {"cardId": "67e55044-10b1-426f-9247-bb680e5fe0c8", "targetPile": "left"}
//! }"#).unwrap();
//!
//! let action = GameAction::try_from(raw).unwrap();
//! assert!(matches!(
//!     action.kind,
//!     ActionKind::PlayCard { target_pile: Some(PileSide::Left), .. }
//! ));
//! ```

use serde::{Deserialize, Serialize};

use super::card::CardId;
use super::error::GameError;
use super::player::PlayerId;

/// One of the two Speed play piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PileSide {
    Left,
    Right,
}

impl std::fmt::Display for PileSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PileSide::Left => "left",
            PileSide::Right => "right",
        })
    }
}

/// What a player asks to do.
///
/// Kinds are shared across games; a rule module rejects the ones it does
/// not play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ActionKind {
    /// War: turn over the front card of your hand.
    RevealCard,
    /// War: collect a decided battle.
    AcknowledgeResult,
    /// Speed: flip the first stock cards and begin.
    ReadyToStart,
    /// Speed and generic: play a card from hand.
    PlayCard {
        #[serde(rename = "cardId")]
        card_id: CardId,
        #[serde(rename = "targetPile", default, skip_serializing_if = "Option::is_none")]
        target_pile: Option<PileSide>,
    },
    /// Speed: ask to flip new stock cards (needs both players).
    FlipNewCards,
    /// Speed: ask to restart (needs both players).
    RestartGame,
    /// Generic: draw the top card of the deck.
    DrawCard,
    /// Generic: end the turn without acting.
    PassTurn,
    /// Generic: leave the hand.
    Fold,
}

impl ActionKind {
    /// Wire name of this action kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ActionKind::RevealCard => "reveal_card",
            ActionKind::AcknowledgeResult => "acknowledge_result",
            ActionKind::ReadyToStart => "ready_to_start",
            ActionKind::PlayCard { .. } => "play_card",
            ActionKind::FlipNewCards => "flip_new_cards",
            ActionKind::RestartGame => "restart_game",
            ActionKind::DrawCard => "draw_card",
            ActionKind::PassTurn => "pass_turn",
            ActionKind::Fold => "fold",
        }
    }
}

/// An action attributed to a player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameAction {
    pub player_id: PlayerId,
    pub kind: ActionKind,
}

impl GameAction {
    /// Create a new action.
    #[must_use]
    pub fn new(player_id: impl Into<PlayerId>, kind: ActionKind) -> Self {
        Self {
            player_id: player_id.into(),
            kind,
        }
    }

    /// Play a card in a generic game.
    #[must_use]
    pub fn play(player_id: impl Into<PlayerId>, card_id: CardId) -> Self {
        Self::new(
            player_id,
            ActionKind::PlayCard {
                card_id,
                target_pile: None,
            },
        )
    }

    /// Play a card onto a Speed pile.
    #[must_use]
    pub fn play_on(player_id: impl Into<PlayerId>, card_id: CardId, pile: PileSide) -> Self {
        Self::new(
            player_id,
            ActionKind::PlayCard {
                card_id,
                target_pile: Some(pile),
            },
        )
    }
}

/// Action as delivered by the transport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub player_id: PlayerId,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayCardData {
    card_id: CardId,
    #[serde(default)]
    target_pile: Option<PileSide>,
}

impl TryFrom<RawAction> for GameAction {
    type Error = GameError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let kind = match raw.action_type.as_str() {
            "reveal_card" => ActionKind::RevealCard,
            "acknowledge_result" => ActionKind::AcknowledgeResult,
            "ready_to_start" => ActionKind::ReadyToStart,
            "play_card" => {
                let data: PlayCardData = serde_json::from_value(raw.data)
                    .map_err(|source| GameError::MalformedAction {
                        action: "play_card",
                        source,
                    })?;
                ActionKind::PlayCard {
                    card_id: data.card_id,
                    target_pile: data.target_pile,
                }
            }
            "flip_new_cards" => ActionKind::FlipNewCards,
            "restart_game" => ActionKind::RestartGame,
            "draw_card" => ActionKind::DrawCard,
            "pass_turn" => ActionKind::PassTurn,
            "fold" => ActionKind::Fold,
            other => return Err(GameError::UnrecognizedAction(other.to_string())),
        };

        Ok(Self {
            player_id: raw.player_id,
            kind,
        })
    }
}
