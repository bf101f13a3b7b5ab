use log::{debug, info, warn};
use rustc_hash::FxHashMap;

use crate::core::{
    shuffled_deck, EngineConfig, GameAction, GameData, GameError, GameRng, GameState, GameType, Player,
    PlayerId, RawAction, Result, Roster,
};
use crate::games::{GenericGame, SpeedGame, WarGame};
use crate::rooms::{RoomDirectory, RoomId};
use crate::rules::{RulesEngine, TurnContext};

/// Live game of one room.
#[derive(Clone, Debug)]
struct Session {
    state: GameState,
    rng: GameRng,
}

/// Owns the live game of every room and routes actions to rule modules.
///
/// Actions for one room must be applied one at a time; `&mut self` enforces
/// that within a process. Every action runs against clones of the room's
/// state, roster, and RNG, and is committed only when it succeeds.
#[derive(Debug)]
pub struct GameEngine<D> {
    directory: D,
    sessions: FxHashMap<RoomId, Session>,
    rng: GameRng,
    config: EngineConfig,
}

impl<D: RoomDirectory> GameEngine<D> {
    /// Create an engine serving the rooms in `directory`.
    pub fn new(directory: D, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        debug!("game engine seeded with {}", rng.seed());
        Ok(Self {
            directory,
            sessions: FxHashMap::default(),
            rng,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Mutable access to the directory, e.g. to seat players.
    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    /// Live state of a room's game.
    #[must_use]
    pub fn state(&self, room: &RoomId) -> Option<&GameState> {
        self.sessions.get(room).map(|session| &session.state)
    }

    /// Rooms with a live game.
    pub fn active_rooms(&self) -> impl Iterator<Item = &RoomId> {
        self.sessions.keys()
    }

    /// Deal a new game in `room`, replacing any game already in progress.
    ///
    /// Fails if the room is missing, `initiator` is not seated there, or the
    /// room's game needs a different number of players.
    pub fn start(&mut self, room: &RoomId, initiator: &PlayerId) -> Result<&GameState> {
        let (game_type, mut roster) = self.seated_roster(room, initiator)?;
        for player in roster.iter_mut() {
            player.hand.clear();
            player.score = 0;
        }

        let mut rng = self.rng.fork();
        let deck = shuffled_deck(&mut rng);
        let state = match game_type {
            GameType::War => WarGame.start(&mut roster, deck),
            GameType::Speed => SpeedGame::new(self.config.speed).start(&mut roster, deck),
            other => GenericGame::new(other).start(&mut roster, deck),
        }
        .map_err(|err| {
            warn!("room {room}: cannot start {game_type}: {err}");
            err
        })?;

        self.directory.commit_roster(room, roster)?;
        info!("room {room}: {initiator} started {game_type}");
        self.sessions.insert(room.clone(), Session { state, rng });
        self.state(room).ok_or_else(|| GameError::GameNotFound(room.clone()))
    }

    /// Decode and apply an action in the transport's wire shape.
    pub fn apply_raw(&mut self, room: &RoomId, raw: RawAction) -> Result<&GameState> {
        let action = GameAction::try_from(raw).map_err(|err| {
            warn!("room {room}: rejected action: {err}");
            err
        })?;
        self.apply_action(room, &action)
    }

    /// Apply one player action.
    ///
    /// On error the room's state and roster are left exactly as they were.
    pub fn apply_action(&mut self, room: &RoomId, action: &GameAction) -> Result<&GameState> {
        let player = &action.player_id;
        let (_, mut roster) = self.seated_roster(room, player)?;
        let session = self
            .sessions
            .get(room)
            .ok_or_else(|| GameError::GameNotFound(room.clone()))?;
        let mut state = session.state.clone();
        let mut rng = session.rng.clone();

        let GameState { table, game_data } = &mut state;
        let mut ctx = TurnContext {
            table,
            roster: &mut roster,
            rng: &mut rng,
        };
        let applied = match game_data {
            GameData::War(data) => WarGame.apply_action(&mut ctx, data, player, &action.kind),
            GameData::Speed(data) => {
                SpeedGame::new(self.config.speed).apply_action(&mut ctx, data, player, &action.kind)
            }
            GameData::Generic(data) => {
                GenericGame::new(data.game_type).apply_action(&mut ctx, data, player, &action.kind)
            }
        };
        if let Err(err) = applied {
            warn!("room {room}: rejected {} from {player}: {err}", action.kind.name());
            return Err(err);
        }
        debug!("room {room}: applied {} from {player}", action.kind.name());

        self.directory.commit_roster(room, roster)?;
        let session = self
            .sessions
            .get_mut(room)
            .ok_or_else(|| GameError::GameNotFound(room.clone()))?;
        session.state = state;
        session.rng = rng;
        Ok(&session.state)
    }

    /// The winning player, if the room's game is decided.
    #[must_use]
    pub fn check_end(&self, room: &RoomId) -> Option<Player> {
        let state = &self.sessions.get(room)?.state;
        let roster = &self.directory.room(room)?.players;
        let winner = match &state.game_data {
            GameData::War(data) => WarGame.winner(&state.table, data, roster),
            GameData::Speed(data) => SpeedGame::new(self.config.speed).winner(&state.table, data, roster),
            GameData::Generic(data) => GenericGame::new(data.game_type).winner(&state.table, data, roster),
        }?;
        roster.get(&winner).cloned()
    }

    /// Discard a room's game. Returns its final state, if there was one.
    pub fn end_game(&mut self, room: &RoomId) -> Option<GameState> {
        let session = self.sessions.remove(room)?;
        info!("room {room}: game ended after {} turns", session.state.table.turn);
        Some(session.state)
    }

    /// The room's game type and a copy of its roster, checking `player` is seated.
    fn seated_roster(&self, room: &RoomId, player: &PlayerId) -> Result<(GameType, Roster)> {
        let found = self
            .directory
            .room(room)
            .ok_or_else(|| GameError::RoomNotFound(room.clone()))?;
        if !found.players.contains(player) {
            return Err(GameError::PlayerNotInRoom {
                room: room.clone(),
                player: player.clone(),
            });
        }
        Ok((found.game_type, found.players.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionKind, InvalidMove, Phase, DECK_SIZE};
    use crate::rooms::{InMemoryRooms, Room};

    fn engine(game_type: GameType, players: &[&str]) -> GameEngine<InMemoryRooms> {
        let mut rooms = InMemoryRooms::new();
        let roster = Roster::new(players.iter().map(|&id| Player::new(id, id)).collect());
        rooms.insert(Room::new("r1", "Room", game_type).with_players(roster));
        GameEngine::new(rooms, EngineConfig::default().with_seed(9)).unwrap()
    }

    fn room() -> RoomId {
        RoomId::new("r1")
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.speed.hand_slots = 0;

        let err = GameEngine::new(InMemoryRooms::new(), config).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { .. }));
    }

    #[test]
    fn test_start_commits_roster() {
        let mut engine = engine(GameType::War, &["a", "b"]);

        let state = engine.start(&room(), &PlayerId::new("a")).unwrap();
        assert_eq!(state.game_type(), GameType::War);

        let roster = &engine.directory().room(&room()).unwrap().players;
        assert_eq!(roster.cards_in_hands(), DECK_SIZE);
        assert_eq!(engine.state(&room()).unwrap().total_cards(roster), DECK_SIZE);
    }

    #[test]
    fn test_start_preconditions() {
        let mut engine = engine(GameType::Speed, &["a"]);

        let err = engine.start(&RoomId::new("r2"), &PlayerId::new("a")).unwrap_err();
        assert!(matches!(err, GameError::RoomNotFound(_)));

        let err = engine.start(&room(), &PlayerId::new("z")).unwrap_err();
        assert!(matches!(err, GameError::PlayerNotInRoom { .. }));

        let err = engine.start(&room(), &PlayerId::new("a")).unwrap_err();
        assert!(matches!(err, GameError::PlayerCount { required: 2, found: 1, .. }));
        assert!(engine.state(&room()).is_none());
    }

    #[test]
    fn test_action_without_game() {
        let mut engine = engine(GameType::War, &["a", "b"]);

        let err = engine
            .apply_action(&room(), &GameAction::new("a", ActionKind::RevealCard))
            .unwrap_err();
        assert!(matches!(err, GameError::GameNotFound(_)));
    }

    #[test]
    fn test_rejected_action_leaves_room_untouched() {
        let mut engine = engine(GameType::Poker, &["a", "b"]);
        engine.start(&room(), &PlayerId::new("a")).unwrap();
        let state_before = engine.state(&room()).cloned();
        let roster_before = engine.directory().room(&room()).unwrap().players.clone();

        let err = engine
            .apply_action(&room(), &GameAction::new("b", ActionKind::DrawCard))
            .unwrap_err();

        assert!(matches!(err, GameError::NotYourTurn { .. }));
        assert_eq!(engine.state(&room()).cloned(), state_before);
        assert_eq!(engine.directory().room(&room()).unwrap().players, roster_before);
    }

    #[test]
    fn test_action_from_outsider() {
        let mut engine = engine(GameType::War, &["a", "b"]);
        engine.start(&room(), &PlayerId::new("a")).unwrap();

        let err = engine
            .apply_action(&room(), &GameAction::new("c", ActionKind::RevealCard))
            .unwrap_err();
        assert!(matches!(err, GameError::PlayerNotInRoom { .. }));
    }

    #[test]
    fn test_same_seed_same_deal() {
        let mut first = engine(GameType::War, &["a", "b"]);
        let mut second = engine(GameType::War, &["a", "b"]);

        first.start(&room(), &PlayerId::new("a")).unwrap();
        second.start(&room(), &PlayerId::new("b")).unwrap();

        assert_eq!(
            first.directory().room(&room()).unwrap().players,
            second.directory().room(&room()).unwrap().players
        );
    }

    #[test]
    fn test_restart_redeals_fresh_hands() {
        let mut engine = engine(GameType::Blackjack, &["a", "b"]);
        engine.start(&room(), &PlayerId::new("a")).unwrap();
        engine
            .apply_action(&room(), &GameAction::new("a", ActionKind::DrawCard))
            .unwrap();

        engine.start(&room(), &PlayerId::new("b")).unwrap();

        let roster = &engine.directory().room(&room()).unwrap().players;
        assert!(roster.iter().all(|p| p.hand_size() == 2));
        assert_eq!(engine.state(&room()).unwrap().table.turn, 1);
    }

    #[test]
    fn test_check_end_and_end_game() {
        let mut engine = engine(GameType::Poker, &["a", "b"]);
        assert!(engine.check_end(&room()).is_none());
        engine.start(&room(), &PlayerId::new("a")).unwrap();
        assert!(engine.check_end(&room()).is_none());

        let state = engine
            .apply_action(&room(), &GameAction::new("a", ActionKind::Fold))
            .unwrap();
        assert_eq!(state.phase(), Phase::Ended);

        let winner = engine.check_end(&room()).unwrap();
        assert_eq!(winner.id, PlayerId::new("b"));

        let err = engine
            .apply_action(&room(), &GameAction::new("b", ActionKind::PassTurn))
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidMove(InvalidMove::GameOver)));

        assert!(engine.end_game(&room()).is_some());
        assert!(engine.state(&room()).is_none());
        assert!(engine.end_game(&room()).is_none());
    }

    #[test]
    fn test_apply_raw_rejects_unknown_type() {
        let mut engine = engine(GameType::War, &["a", "b"]);
        engine.start(&room(), &PlayerId::new("a")).unwrap();
        let raw: RawAction =
            serde_json::from_value(serde_json::json!({"type": "shuffle_up", "playerId": "a"})).unwrap();

        let err = engine.apply_raw(&room(), raw).unwrap_err();
        assert!(matches!(err, GameError::UnrecognizedAction(ref t) if t == "shuffle_up"));
    }
}
