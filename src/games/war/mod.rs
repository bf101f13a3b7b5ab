//! War: a two-player battle game.
//!
//! - The shuffled deck is split evenly between the two players
//! - Each battle both players reveal the front card of their hand
//! - Higher rank value wins the pot once the result is acknowledged
//! - A tie is a war: the pot stays frozen and the next battle plays for it
//! - A player holding every card wins

mod data;
mod game;

pub use data::{BattleResult, WarData};
pub use game::WarGame;
