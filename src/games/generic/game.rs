//! Generic turn-based rules.

use im::Vector;
use log::{debug, info};

use crate::core::{
    ActionKind, Card, GameData, GameError, GameState, GameType, GenericData, InvalidMove, Phase, PlayerId,
    Result, Roster, TableState,
};
use crate::rules::{RulesEngine, TurnContext};

/// Turn-based skeleton for every game without a dedicated module.
///
/// Players act in seat order; each successful action passes the turn to the
/// next active player.
#[derive(Clone, Copy, Debug)]
pub struct GenericGame {
    game_type: GameType,
}

impl GenericGame {
    #[must_use]
    pub fn new(game_type: GameType) -> Self {
        Self { game_type }
    }

    /// Pass the turn to the next active player, or end the game.
    fn advance(&self, table: &mut TableState, roster: &Roster) {
        let active: Vec<&PlayerId> = roster.iter().filter(|p| p.is_active).map(|p| &p.id).collect();
        if active.len() < 2 {
            info!("{}: fewer than two active players, game over", self.game_type);
            table.phase = Phase::Ended;
            return;
        }

        let next = active
            .iter()
            .position(|id| **id == table.current_player)
            .map_or(0, |i| (i + 1) % active.len());
        table.current_player = active[next].clone();
        table.turn += 1;
    }
}

impl RulesEngine for GenericGame {
    type Data = GenericData;

    fn game_type(&self) -> GameType {
        self.game_type
    }

    fn start(&self, roster: &mut Roster, deck: Vec<Card>) -> Result<GameState> {
        let first = roster.seat(0).map(|p| p.id.clone()).ok_or(GameError::PlayerCount {
            game: self.game_type,
            required: 1,
            found: 0,
        })?;

        let mut deck: Vector<Card> = deck.into_iter().map(Card::hidden).collect();
        for _ in 0..self.game_type.initial_hand_size() {
            for player in roster.iter_mut() {
                if let Some(card) = deck.pop_back() {
                    player.hand.push_back(card.revealed());
                }
            }
        }
        for player in roster.iter_mut() {
            player.is_active = true;
        }

        info!(
            "{} started with {} players, {} cards each",
            self.game_type,
            roster.len(),
            self.game_type.initial_hand_size()
        );
        Ok(GameState {
            table: TableState::new(first, deck),
            game_data: GameData::Generic(GenericData {
                game_type: self.game_type,
            }),
        })
    }

    fn apply_action(
        &self,
        ctx: &mut TurnContext<'_>,
        _data: &mut GenericData,
        player: &PlayerId,
        action: &ActionKind,
    ) -> Result<()> {
        if ctx.table.phase == Phase::Ended {
            return Err(InvalidMove::GameOver.into());
        }
        if ctx.table.current_player != *player {
            return Err(GameError::NotYourTurn { player: player.clone() });
        }

        let seat = ctx
            .roster
            .get_mut(player)
            .ok_or_else(|| GameError::NotSeated(player.clone()))?;
        match action {
            ActionKind::PlayCard { card_id, .. } => {
                let slot = seat.find_card(*card_id).ok_or(InvalidMove::CardNotInHand(*card_id))?;
                let card = seat.hand.remove(slot).revealed();
                debug!("{}: {player} discarded {card}", self.game_type);
                ctx.table.discard_pile.push_back(card);
            }
            ActionKind::DrawCard => {
                let card = ctx.table.deck.pop_back().ok_or(InvalidMove::DeckEmpty)?.revealed();
                debug!("{}: {player} drew a card", self.game_type);
                seat.hand.push_back(card);
            }
            ActionKind::PassTurn => debug!("{}: {player} passed", self.game_type),
            ActionKind::Fold => {
                debug!("{}: {player} folded", self.game_type);
                seat.is_active = false;
            }
            other => return Err(self.unknown(other)),
        }

        self.advance(ctx.table, ctx.roster);
        Ok(())
    }

    fn winner(&self, table: &TableState, _data: &GenericData, roster: &Roster) -> Option<PlayerId> {
        if let Some(empty) = roster.iter().find(|p| p.hand.is_empty()) {
            return Some(empty.id.clone());
        }
        if table.phase == Phase::Ended {
            let mut active = roster.iter().filter(|p| p.is_active);
            if let (Some(last), None) = (active.next(), active.next()) {
                return Some(last.id.clone());
            }
        }
        None
    }
}
