//! Speed: a real-time shedding race for two players.
//!
//! ## Layout
//!
//! - Each player: a face-up hand of slots backed by a face-down reserve
//! - Two face-down stock piles, each feeding the play pile on its side
//! - Two face-up play piles
//!
//! ## Flow
//!
//! 1. `ready_to_start` flips one stock card onto each play pile
//! 2. `play_card` puts a rank-adjacent card on a pile and refills the slot
//!    from the reserve
//! 3. `flip_new_cards` and `restart_game` take effect once both players ask
//!
//! The first player to empty hand and reserve wins.

mod data;
mod game;

pub use data::{SpeedData, SpeedPhase};
pub use game::SpeedGame;
