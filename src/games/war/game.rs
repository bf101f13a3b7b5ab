//! War rules.

use std::cmp::Ordering;

use im::Vector;
use log::{debug, info};

use super::data::{BattleResult, WarData};
use crate::core::{
    shuffle, ActionKind, Card, GameData, GameError, GameState, GameType, InvalidMove, Phase, PlayerId,
    Result, Roster, TableState,
};
use crate::rules::{RulesEngine, TurnContext};

/// Two-player War.
///
/// Both players reveal the front card of their hand; the higher rank value
/// takes the pot once the result is acknowledged. A tie freezes the pot and
/// the next battle plays for it.
#[derive(Clone, Copy, Debug, Default)]
pub struct WarGame;

impl WarGame {
    /// Players required to start.
    pub const PLAYERS: usize = 2;

    fn reveal(&self, ctx: &mut TurnContext<'_>, data: &mut WarData, player: &PlayerId) -> Result<()> {
        if ctx.table.phase == Phase::Ended {
            return Err(InvalidMove::GameOver.into());
        }
        if data.battle_result == BattleResult::Winner {
            return Err(InvalidMove::AwaitingAcknowledgement.into());
        }
        if data.has_revealed(player) {
            return Err(InvalidMove::AlreadyRevealed.into());
        }

        let seat = ctx
            .roster
            .get_mut(player)
            .ok_or_else(|| GameError::NotSeated(player.clone()))?;
        let card = seat.hand.pop_front().ok_or(InvalidMove::NoCardsToReveal)?.revealed();
        seat.score = seat.hand.len() as u32;

        debug!("war: {player} revealed {card}");
        data.battle_cards.entry(player.clone()).or_default().push(card);
        ctx.table.turn += 1;

        self.resolve_battle(ctx, data);
        Ok(())
    }

    /// Decide the battle once both players have a pending reveal.
    ///
    /// Either way the revealed cards join the pot, leaving `battle_cards` empty.
    fn resolve_battle(&self, ctx: &mut TurnContext<'_>, data: &mut WarData) {
        let seats = ctx.roster.ids();
        let [first_id, second_id] = seats.as_slice() else {
            return;
        };
        let (first, second) = match (data.revealed(first_id), data.revealed(second_id)) {
            (Some(a), Some(b)) => (*a, *b),
            _ => return,
        };

        for id in &seats {
            if let Some(cards) = data.battle_cards.remove(id) {
                data.war_pile.extend(cards);
            }
        }
        data.battle_cards.clear();

        let winner = match first.rank.value().cmp(&second.rank.value()) {
            Ordering::Greater => first_id,
            Ordering::Less => second_id,
            Ordering::Equal => {
                data.war_count += 1;
                data.is_in_war = true;
                data.battle_result = BattleResult::War;
                ctx.table.phase = Phase::War;
                debug!("war: {first} ties {second}, war #{} with {} cards at stake", data.war_count, data.war_pile.len());
                return;
            }
        };

        data.battle_result = BattleResult::Winner;
        data.last_battle_winner = Some(winner.clone());
        ctx.table.phase = Phase::Battle;
        debug!("war: {winner} wins the battle ({first} vs {second})");
    }

    /// Move every card on the table to the back of `winner_id`'s hand and reset the battle.
    fn pay_out(&self, ctx: &mut TurnContext<'_>, data: &mut WarData, winner_id: &PlayerId) -> Result<()> {
        let mut pot: Vec<Card> = data.battle_cards.values().flatten().copied().collect();
        pot.extend(data.war_pile.iter().copied());
        let pot = shuffle(&pot, ctx.rng);

        let winner = ctx
            .roster
            .get_mut(winner_id)
            .ok_or_else(|| GameError::NotSeated(winner_id.clone()))?;
        debug!("war: {winner_id} collects {} cards", pot.len());
        winner.hand.extend(pot.into_iter().map(Card::hidden));
        winner.score = winner.hand.len() as u32;

        *data = WarData::default();
        Ok(())
    }

    /// Pay out a decided battle, then check for a sole card holder.
    ///
    /// The end check runs even without a decided battle, so a player who
    /// runs dry mid-war still loses once anyone acknowledges.
    fn acknowledge(&self, ctx: &mut TurnContext<'_>, data: &mut WarData) -> Result<()> {
        let decided = match (&data.battle_result, &data.last_battle_winner) {
            (BattleResult::Winner, Some(winner)) => Some(winner.clone()),
            _ => None,
        };
        if let Some(winner) = decided {
            self.pay_out(ctx, data, &winner)?;
            ctx.table.phase = Phase::Playing;
        } else {
            debug!("war: no decided battle to pay out");
        }

        let holders: Vec<PlayerId> = ctx
            .roster
            .iter()
            .filter(|p| !p.hand.is_empty())
            .map(|p| p.id.clone())
            .collect();
        if let [sole] = holders.as_slice() {
            if data.cards_held() > 0 {
                self.pay_out(ctx, data, sole)?;
            }
            info!("war: {sole} holds every card and wins");
            data.last_battle_winner = Some(sole.clone());
            ctx.table.phase = Phase::Ended;
        }

        // War has no real turn order; the pointer and round are bookkeeping.
        let next = ctx
            .roster
            .position(&ctx.table.current_player)
            .map_or(0, |i| (i + 1) % ctx.roster.len());
        if let Some(player) = ctx.roster.seat(next) {
            ctx.table.current_player = player.id.clone();
        }
        ctx.table.round += 1;
        Ok(())
    }
}

impl RulesEngine for WarGame {
    type Data = WarData;

    fn game_type(&self) -> GameType {
        GameType::War
    }

    fn start(&self, roster: &mut Roster, mut deck: Vec<Card>) -> Result<GameState> {
        self.require_players(roster, Self::PLAYERS)?;

        let second_half = deck.split_off(deck.len() / 2);
        for (player, cards) in roster.iter_mut().zip([deck, second_half]) {
            player.hand = cards.into_iter().map(Card::hidden).collect();
            player.is_active = true;
            player.score = player.hand.len() as u32;
        }

        let seats = roster.ids();
        info!(
            "war started: {} holds {} cards, {} holds {} cards",
            seats[0],
            roster.seat(0).map_or(0, |p| p.hand_size()),
            seats[1],
            roster.seat(1).map_or(0, |p| p.hand_size()),
        );

        Ok(GameState {
            table: TableState::new(seats[0].clone(), Vector::new()),
            game_data: GameData::War(WarData::default()),
        })
    }

    fn apply_action(
        &self,
        ctx: &mut TurnContext<'_>,
        data: &mut WarData,
        player: &PlayerId,
        action: &ActionKind,
    ) -> Result<()> {
        self.require_players(ctx.roster, Self::PLAYERS)?;
        match action {
            ActionKind::RevealCard => self.reveal(ctx, data, player),
            ActionKind::AcknowledgeResult => self.acknowledge(ctx, data),
            other => Err(self.unknown(other)),
        }
    }

    fn winner(&self, _table: &TableState, _data: &WarData, roster: &Roster) -> Option<PlayerId> {
        let mut holders = roster.iter().filter(|p| !p.hand.is_empty());
        match (holders.next(), holders.next()) {
            (Some(sole), None) => Some(sole.id.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{create_deck, GameRng, Player, Rank, DECK_SIZE};

    /// Deck whose halves start with the given ranks.
    fn arranged_deck(front_a: &[Rank], front_b: &[Rank]) -> Vec<Card> {
        let mut pool = create_deck(&mut GameRng::new(3));
        let mut take = |rank: Rank| {
            let i = pool.iter().position(|c| c.rank == rank).expect("rank available");
            pool.remove(i)
        };
        let mut first: Vec<Card> = front_a.iter().map(|&r| take(r)).collect();
        let second: Vec<Card> = front_b.iter().map(|&r| take(r)).collect();

        let fill = DECK_SIZE / 2 - first.len();
        first.extend(pool.drain(..fill));
        first.extend(second);
        first.extend(pool);
        first
    }

    struct Table {
        state: GameState,
        roster: Roster,
        rng: GameRng,
    }

    impl Table {
        fn new(deck: Vec<Card>) -> Self {
            let mut roster = Roster::new(vec![Player::new("a", "Alice"), Player::new("b", "Bob")]);
            let state = WarGame.start(&mut roster, deck).unwrap();
            Self {
                state,
                roster,
                rng: GameRng::new(11),
            }
        }

        fn act(&mut self, player: &str, action: ActionKind) -> Result<()> {
            let GameState { table, game_data } = &mut self.state;
            let GameData::War(data) = game_data else {
                panic!("not a war game");
            };
            let mut ctx = TurnContext {
                table,
                roster: &mut self.roster,
                rng: &mut self.rng,
            };
            WarGame.apply_action(&mut ctx, data, &PlayerId::new(player), &action)
        }

        fn war(&self) -> &WarData {
            self.state.game_data.as_war().unwrap()
        }

        fn hand(&self, player: &str) -> usize {
            self.roster.get(&PlayerId::new(player)).unwrap().hand_size()
        }

        fn total(&self) -> usize {
            self.state.total_cards(&self.roster)
        }
    }

    #[test]
    fn test_start_splits_deck() {
        let table = Table::new(create_deck(&mut GameRng::new(1)));

        assert_eq!(table.hand("a"), 26);
        assert_eq!(table.hand("b"), 26);
        assert!(table.roster.iter().all(|p| p.is_active && p.score == 26));
        assert_eq!(table.state.phase(), Phase::Playing);
        assert_eq!(table.state.table.current_player, PlayerId::new("a"));
        assert_eq!(table.war().battle_result, BattleResult::Pending);
        assert_eq!(table.total(), DECK_SIZE);
    }

    #[test]
    fn test_start_requires_two_players() {
        let mut roster = Roster::new(vec![Player::new("a", "Alice")]);
        let err = WarGame.start(&mut roster, create_deck(&mut GameRng::new(1))).unwrap_err();
        assert!(matches!(err, GameError::PlayerCount { required: 2, found: 1, .. }));
    }

    #[test]
    fn test_single_reveal_waits() {
        let mut table = Table::new(arranged_deck(&[Rank::Five], &[Rank::Nine]));

        table.act("a", ActionKind::RevealCard).unwrap();

        assert!(table.war().has_revealed(&PlayerId::new("a")));
        assert_eq!(table.war().battle_result, BattleResult::Pending);
        assert_eq!(table.hand("a"), 25);
        assert_eq!(table.state.table.turn, 2);
        assert_eq!(table.total(), DECK_SIZE);
    }

    #[test]
    fn test_cannot_reveal_twice_before_resolution() {
        let mut table = Table::new(arranged_deck(&[Rank::Five], &[Rank::Nine]));

        table.act("a", ActionKind::RevealCard).unwrap();
        let err = table.act("a", ActionKind::RevealCard).unwrap_err();

        assert!(matches!(err, GameError::InvalidMove(InvalidMove::AlreadyRevealed)));
        assert_eq!(table.hand("a"), 25);
    }

    #[test]
    fn test_matching_kings_go_to_war() {
        let mut table = Table::new(arranged_deck(&[Rank::King], &[Rank::King]));

        table.act("a", ActionKind::RevealCard).unwrap();
        table.act("b", ActionKind::RevealCard).unwrap();

        let war = table.war();
        assert_eq!(war.battle_result, BattleResult::War);
        assert_eq!(war.war_count, 1);
        assert!(war.is_in_war);
        assert!(war.battle_cards.values().all(|cards| cards.is_empty()));
        assert_eq!(war.war_pile.len(), 2);
        assert!(war.war_pile.iter().all(|c| c.face_up));
        assert_eq!(table.state.phase(), Phase::War);
        assert_eq!(table.state.table.turn, 3);
        assert_eq!(table.total(), DECK_SIZE);
    }

    #[test]
    fn test_ace_beats_two() {
        let mut table = Table::new(arranged_deck(&[Rank::Ace], &[Rank::Two]));

        table.act("a", ActionKind::RevealCard).unwrap();
        table.act("b", ActionKind::RevealCard).unwrap();

        let war = table.war();
        assert_eq!(war.battle_result, BattleResult::Winner);
        assert_eq!(war.last_battle_winner, Some(PlayerId::new("a")));
        assert_eq!(war.war_count, 0);
        assert_eq!(table.state.phase(), Phase::Battle);
    }

    #[test]
    fn test_reveal_blocked_until_acknowledged() {
        let mut table = Table::new(arranged_deck(&[Rank::Ace], &[Rank::Two]));

        table.act("a", ActionKind::RevealCard).unwrap();
        table.act("b", ActionKind::RevealCard).unwrap();
        let err = table.act("b", ActionKind::RevealCard).unwrap_err();

        assert!(matches!(err, GameError::InvalidMove(InvalidMove::AwaitingAcknowledgement)));
    }

    #[test]
    fn test_acknowledge_pays_winner() {
        let mut table = Table::new(arranged_deck(&[Rank::Three], &[Rank::Jack]));

        table.act("a", ActionKind::RevealCard).unwrap();
        table.act("b", ActionKind::RevealCard).unwrap();
        table.act("a", ActionKind::AcknowledgeResult).unwrap();

        assert_eq!(table.hand("a"), 25);
        assert_eq!(table.hand("b"), 27);
        assert_eq!(table.roster.get(&PlayerId::new("b")).unwrap().score, 27);
        assert_eq!(table.war(), &WarData::default());
        assert_eq!(table.state.phase(), Phase::Playing);
        assert_eq!(table.state.table.round, 2);
        assert_eq!(table.state.table.current_player, PlayerId::new("b"));
        assert_eq!(table.total(), DECK_SIZE);
    }

    #[test]
    fn test_war_pot_goes_to_next_battle_winner() {
        let mut table = Table::new(arranged_deck(&[Rank::Seven, Rank::Queen], &[Rank::Seven, Rank::Four]));

        table.act("a", ActionKind::RevealCard).unwrap();
        table.act("b", ActionKind::RevealCard).unwrap();
        assert_eq!(table.war().battle_result, BattleResult::War);

        table.act("b", ActionKind::RevealCard).unwrap();
        table.act("a", ActionKind::RevealCard).unwrap();
        assert_eq!(table.war().battle_result, BattleResult::Winner);
        assert_eq!(table.war().war_pile.len(), 4);
        assert_eq!(table.war().war_count, 1);

        table.act("b", ActionKind::AcknowledgeResult).unwrap();

        assert_eq!(table.hand("a"), 28);
        assert_eq!(table.hand("b"), 24);
        assert_eq!(table.war().war_count, 0);
        assert!(!table.war().is_in_war);
        assert_eq!(table.total(), DECK_SIZE);
    }

    #[test]
    fn test_collected_cards_return_face_down_to_back() {
        let mut table = Table::new(arranged_deck(&[Rank::Ace], &[Rank::Two]));
        let front_before = table.roster.get(&PlayerId::new("a")).unwrap().hand[0];

        table.act("a", ActionKind::RevealCard).unwrap();
        table.act("b", ActionKind::RevealCard).unwrap();
        table.act("b", ActionKind::AcknowledgeResult).unwrap();

        let hand = &table.roster.get(&PlayerId::new("a")).unwrap().hand;
        assert_ne!(hand[0].id, front_before.id);
        assert!(hand.iter().all(|c| !c.face_up));
        assert!(hand.iter().skip(25).any(|c| c.id == front_before.id));
    }

    #[test]
    fn test_acknowledge_during_war_keeps_pot() {
        let mut table = Table::new(arranged_deck(&[Rank::King], &[Rank::King]));
        table.act("a", ActionKind::RevealCard).unwrap();
        table.act("b", ActionKind::RevealCard).unwrap();
        let before = table.war().clone();

        table.act("a", ActionKind::AcknowledgeResult).unwrap();

        assert_eq!(table.war(), &before);
        assert_eq!(table.state.phase(), Phase::War);
        assert_eq!(table.state.table.round, 2);
        assert_eq!(table.state.table.current_player, PlayerId::new("b"));
        assert_eq!(table.hand("a"), 25);
        assert_eq!(table.total(), DECK_SIZE);
    }

    #[test]
    fn test_running_dry_in_war_loses() {
        let mut table = Table::new(arranged_deck(&[Rank::Nine], &[Rank::Nine]));
        {
            let b = table.roster.get_mut(&PlayerId::new("b")).unwrap();
            let front = b.hand[0];
            let rest: Vec<Card> = b.hand.iter().skip(1).copied().collect();
            b.hand = Vector::unit(front);
            let a = table.roster.get_mut(&PlayerId::new("a")).unwrap();
            a.hand.extend(rest);
        }

        table.act("a", ActionKind::RevealCard).unwrap();
        table.act("b", ActionKind::RevealCard).unwrap();
        assert_eq!(table.state.phase(), Phase::War);
        let err = table.act("b", ActionKind::RevealCard).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove(InvalidMove::NoCardsToReveal)));

        table.act("a", ActionKind::AcknowledgeResult).unwrap();

        assert_eq!(table.state.phase(), Phase::Ended);
        assert_eq!(table.war().last_battle_winner, Some(PlayerId::new("a")));
        assert_eq!(table.war().war_pile.len(), 0);
        assert_eq!(table.hand("a"), DECK_SIZE);
        assert_eq!(
            WarGame.winner(&table.state.table, table.war(), &table.roster),
            Some(PlayerId::new("a"))
        );
        assert_eq!(table.total(), DECK_SIZE);
    }

    #[test]
    fn test_lone_player_cannot_act() {
        let mut table = Table::new(arranged_deck(&[Rank::Five], &[Rank::Nine]));
        table.act("a", ActionKind::RevealCard).unwrap();
        table.roster.remove(&PlayerId::new("b"));

        let err = table.act("a", ActionKind::RevealCard).unwrap_err();
        assert!(matches!(err, GameError::PlayerCount { required: 2, found: 1, .. }));
        let err = table.act("a", ActionKind::AcknowledgeResult).unwrap_err();
        assert!(matches!(err, GameError::PlayerCount { .. }));
    }

    #[test]
    fn test_empty_hand_cannot_reveal() {
        let mut table = Table::new(arranged_deck(&[], &[]));
        table.roster.get_mut(&PlayerId::new("a")).unwrap().hand.clear();

        let err = table.act("a", ActionKind::RevealCard).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove(InvalidMove::NoCardsToReveal)));
    }

    #[test]
    fn test_last_collection_ends_game() {
        let mut table = Table::new(arranged_deck(&[Rank::Ace], &[Rank::Two]));
        {
            let b = table.roster.get_mut(&PlayerId::new("b")).unwrap();
            let front = b.hand[0];
            let rest: Vec<Card> = b.hand.iter().skip(1).copied().collect();
            b.hand = Vector::unit(front);
            let a = table.roster.get_mut(&PlayerId::new("a")).unwrap();
            a.hand.extend(rest);
        }

        table.act("a", ActionKind::RevealCard).unwrap();
        table.act("b", ActionKind::RevealCard).unwrap();
        table.act("a", ActionKind::AcknowledgeResult).unwrap();

        assert_eq!(table.state.phase(), Phase::Ended);
        assert_eq!(table.war().last_battle_winner, Some(PlayerId::new("a")));
        assert_eq!(
            WarGame.winner(&table.state.table, table.war(), &table.roster),
            Some(PlayerId::new("a"))
        );

        let err = table.act("a", ActionKind::RevealCard).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove(InvalidMove::GameOver)));
        assert_eq!(table.total(), DECK_SIZE);
    }

    #[test]
    fn test_speed_actions_are_unknown() {
        let mut table = Table::new(create_deck(&mut GameRng::new(1)));
        let err = table.act("a", ActionKind::FlipNewCards).unwrap_err();

        assert!(matches!(
            err,
            GameError::UnknownAction {
                game: GameType::War,
                action: "flip_new_cards"
            }
        ));
    }
}
