//! Speed rules.

use im::OrdSet;
use log::{debug, info};

use super::data::{SpeedData, SpeedPhase};
use crate::core::{
    shuffled_deck, ActionKind, Card, CardId, GameData, GameError, GameState, GameType, InvalidMove,
    PileSide, Phase, PlayerId, Result, Roster, SpeedLayout, TableState,
};
use crate::rules::{RulesEngine, TurnContext};

/// Two-player Speed.
///
/// Players race to empty their hand and reserve by playing cards one rank
/// above or below either play pile's top card. There are no turns: actions
/// apply in the order the transport delivers them, so the first valid play
/// on a pile wins the race.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpeedGame {
    layout: SpeedLayout,
}

impl SpeedGame {
    /// Players required to start.
    pub const PLAYERS: usize = 2;

    /// Create a Speed module with the given deal sizes.
    #[must_use]
    pub fn new(layout: SpeedLayout) -> Self {
        Self { layout }
    }

    /// Deal the opening layout.
    ///
    /// Deck order: each player's hand then reserve, then the left and right
    /// stock piles. Undealt cards stay face down in the envelope deck.
    fn deal(&self, roster: &mut Roster, deck: Vec<Card>) -> Result<(TableState, SpeedData)> {
        self.require_players(roster, Self::PLAYERS)?;

        let mut cards = deck.into_iter();
        let mut data = SpeedData::default();

        for player in roster.iter_mut() {
            player.hand = cards.by_ref().take(self.layout.hand_slots).map(Card::revealed).collect();
            let reserve = cards.by_ref().take(self.layout.reserve_size).map(Card::hidden).collect();
            data.player_decks.insert(player.id.clone(), reserve);
        }
        data.left_stock_pile = cards.by_ref().take(self.layout.stock_size).map(Card::hidden).collect();
        data.right_stock_pile = cards.by_ref().take(self.layout.stock_size).map(Card::hidden).collect();

        for player in roster.iter_mut() {
            player.is_active = true;
            player.score = (player.hand.len() + data.reserve_size(&player.id)) as u32;
        }

        let seats = roster.ids();
        let table = TableState::new(seats[0].clone(), cards.map(Card::hidden).collect());
        info!(
            "speed dealt: {} hand slots, {} in reserve, {} per stock pile",
            self.layout.hand_slots, self.layout.reserve_size, self.layout.stock_size
        );
        Ok((table, data))
    }

    fn ready(&self, data: &mut SpeedData) {
        if data.game_phase != SpeedPhase::WaitingForReady {
            debug!("speed: already playing");
            return;
        }
        data.flip_stock(PileSide::Left);
        data.flip_stock(PileSide::Right);
        data.game_phase = SpeedPhase::Playing;
        info!("speed: play piles flipped, game on");
    }

    fn play(
        &self,
        ctx: &mut TurnContext<'_>,
        data: &mut SpeedData,
        player: &PlayerId,
        card_id: CardId,
        target: Option<PileSide>,
    ) -> Result<()> {
        if data.game_phase == SpeedPhase::Ended {
            return Err(InvalidMove::GameOver.into());
        }
        let side = target.ok_or(InvalidMove::MissingTargetPile)?;

        let seat = ctx
            .roster
            .get_mut(player)
            .ok_or_else(|| GameError::NotSeated(player.clone()))?;
        let slot = seat.find_card(card_id).ok_or(InvalidMove::CardNotInHand(card_id))?;
        let played = seat.hand[slot].revealed();

        let top = *data.top_card(side).ok_or(InvalidMove::EmptyPlayPile(side))?;
        if !played.rank.is_adjacent(top.rank) {
            return Err(InvalidMove::NotConsecutive {
                played: played.rank,
                top: top.rank,
            }
            .into());
        }

        data.push_play(side, played);
        let reserve = data.player_decks.entry(player.clone()).or_default();
        match reserve.pop_back() {
            Some(next) => {
                seat.hand.set(slot, next.revealed());
            }
            None => {
                seat.hand.remove(slot);
            }
        }
        seat.score = (seat.hand.len() + reserve.len()) as u32;
        debug!("speed: {player} played {played} on the {side} pile, {} cards left", seat.score);

        if seat.score == 0 {
            info!("speed: {player} is out of cards and wins");
            data.winner = Some(player.clone());
            data.game_phase = SpeedPhase::Ended;
            ctx.table.phase = Phase::Ended;
        }

        data.flip_requests.remove(player);
        data.restart_requests.remove(player);
        data.last_played_card = Some(played);
        data.last_played_by = Some(player.clone());
        Ok(())
    }

    fn flip(&self, data: &mut SpeedData, player: &PlayerId) {
        data.flip_requests.insert(player.clone());
        if data.flip_requests.len() < Self::PLAYERS {
            debug!("speed: {player} asked to flip, waiting for opponent");
            return;
        }

        let left = data.flip_stock(PileSide::Left);
        let right = data.flip_stock(PileSide::Right);
        data.flip_requests = OrdSet::new();
        debug!("speed: both players agreed to flip (left: {left}, right: {right})");
    }

    fn restart(&self, ctx: &mut TurnContext<'_>, data: &mut SpeedData, player: &PlayerId) -> Result<()> {
        data.restart_requests.insert(player.clone());
        if data.restart_requests.len() < Self::PLAYERS {
            debug!("speed: {player} asked to restart, waiting for opponent");
            return Ok(());
        }

        for seat in ctx.roster.iter_mut() {
            seat.is_ready = false;
            seat.is_active = false;
            seat.score = 0;
            seat.hand.clear();
        }

        let deck = shuffled_deck(ctx.rng);
        let (table, fresh) = self.deal(ctx.roster, deck)?;
        *ctx.table = table;
        *data = fresh;
        info!("speed: restarted by both players");
        Ok(())
    }
}

impl RulesEngine for SpeedGame {
    type Data = SpeedData;

    fn game_type(&self) -> GameType {
        GameType::Speed
    }

    fn start(&self, roster: &mut Roster, deck: Vec<Card>) -> Result<GameState> {
        let (table, data) = self.deal(roster, deck)?;
        Ok(GameState {
            table,
            game_data: GameData::Speed(data),
        })
    }

    fn apply_action(
        &self,
        ctx: &mut TurnContext<'_>,
        data: &mut SpeedData,
        player: &PlayerId,
        action: &ActionKind,
    ) -> Result<()> {
        match action {
            ActionKind::ReadyToStart => {
                self.ready(data);
                Ok(())
            }
            ActionKind::PlayCard { card_id, target_pile } => {
                self.play(ctx, data, player, *card_id, *target_pile)
            }
            ActionKind::FlipNewCards => {
                self.flip(data, player);
                Ok(())
            }
            ActionKind::RestartGame => self.restart(ctx, data, player),
            other => Err(self.unknown(other)),
        }
    }

    fn winner(&self, _table: &TableState, data: &SpeedData, _roster: &Roster) -> Option<PlayerId> {
        data.winner.clone()
    }
}
