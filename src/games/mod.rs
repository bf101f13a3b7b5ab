//! Rule modules.
//!
//! - `war`: two-player battle game
//! - `speed`: two-player real-time race
//! - `generic`: turn-based skeleton for the remaining game types

pub mod generic;
pub mod speed;
pub mod war;

pub use generic::GenericGame;
pub use speed::{SpeedData, SpeedGame, SpeedPhase};
pub use war::{BattleResult, WarData, WarGame};
