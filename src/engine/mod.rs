//! Game engine: one live game per room.
//!
//! The engine looks up a room through its `RoomDirectory`, picks the rule
//! module from the room's game type, and keeps the resulting state with an
//! RNG stream forked for that room.
//!
//! ```
//! use rust_cardroom::core::{ActionKind, EngineConfig, GameAction, GameType, Player, PlayerId, Roster};
//! use rust_cardroom::engine::GameEngine;
//! use rust_cardroom::rooms::{InMemoryRooms, Room, RoomId};
//!
//! let mut rooms = InMemoryRooms::new();
//! let players = Roster::new(vec![Player::new("a", "Alice"), Player::new("b", "Bob")]);
//! rooms.insert(Room::new("r1", "Friday", GameType::War).with_players(players));
//!
//! let mut engine = GameEngine::new(rooms, EngineConfig::default().with_seed(7)).unwrap();
//! let room = RoomId::new("r1");
//! engine.start(&room, &PlayerId::new("a")).unwrap();
//! engine.apply_action(&room, &GameAction::new("a", ActionKind::RevealCard)).unwrap();
//! assert!(engine.check_end(&room).is_none());
//! ```

mod game_engine;

pub use game_engine::GameEngine;
