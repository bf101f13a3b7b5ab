//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - How the opening deal is laid out
//! - How actions modify state
//! - Win conditions
//!
//! The game engine picks the module from the room's game data and never
//! interprets game-specific concepts directly.

pub mod engine;

pub use engine::{RulesEngine, TurnContext};
