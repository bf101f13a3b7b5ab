//! Generic turn-based module.
//!
//! Plays every game type without dedicated rules (poker, blackjack, hearts,
//! spades, go-fish, solitaire) as a discard/draw/fold skeleton.

mod game;

pub use game::GenericGame;
