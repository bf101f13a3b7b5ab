//! Standard 52-card deck construction and shuffling.

use super::card::{Card, CardId, Rank, Suit};
use super::rng::GameRng;

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Build a fresh deck: one face-down card per (suit, rank) pair.
///
/// Every card gets a newly generated ID drawn from `rng`.
///
/// ```
/// use rust_cardroom::core::{create_deck, GameRng, DECK_SIZE};
///
/// let mut rng = GameRng::new(1);
/// let deck = create_deck(&mut rng);
/// assert_eq!(deck.len(), DECK_SIZE);
/// assert!(deck.iter().all(|card| !card.face_up));
/// ```
#[must_use]
pub fn create_deck(rng: &mut GameRng) -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| (suit, rank)))
        .map(|(suit, rank)| Card::new(CardId::from_random_bytes(rng.gen_id_bytes()), suit, rank))
        .collect()
}

/// Return a uniformly shuffled copy of `cards`.
///
/// The input is left untouched.
#[must_use]
pub fn shuffle(cards: &[Card], rng: &mut GameRng) -> Vec<Card> {
    let mut shuffled = cards.to_vec();
    rng.shuffle(&mut shuffled);
    shuffled
}

/// Build and shuffle a new deck in one step.
#[must_use]
pub fn shuffled_deck(rng: &mut GameRng) -> Vec<Card> {
    let deck = create_deck(rng);
    shuffle(&deck, rng)
}
