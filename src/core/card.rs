//! Playing cards: suits, ranks, and card instances.
//!
//! ## Rank Values
//!
//! Ranks compare by numeric value with the ace high:
//! `2 = 2`, ..., `10 = 10`, `J = 11`, `Q = 12`, `K = 13`, `A = 14`.
//!
//! For sequencing (Speed) the ace is also adjacent to the two, so the
//! ranks form a circle: `... Q K A 2 3 ...`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique card identifier.
///
/// Generated from the room's RNG stream so a seeded engine is reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub Uuid);

impl CardId {
    /// Build a card ID from 16 random bytes (UUID v4 layout).
    #[must_use]
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All four suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

/// Card rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    /// All thirteen ranks in deck order (ace first).
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Numeric value used for comparisons (ace high).
    ///
    /// ```
    /// use rust_cardroom::core::Rank;
    ///
    /// assert_eq!(Rank::Ace.value(), 14);
    /// assert_eq!(Rank::King.value(), 13);
    /// assert_eq!(Rank::Two.value(), 2);
    /// ```
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Rank::Ace => 14,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
        }
    }

    /// Check whether two ranks are one step apart on the rank circle.
    ///
    /// ```
    /// use rust_cardroom::core::Rank;
    ///
    /// assert!(Rank::Ace.is_adjacent(Rank::King));
    /// assert!(Rank::Ace.is_adjacent(Rank::Two));
    /// assert!(Rank::Seven.is_adjacent(Rank::Six));
    /// assert!(!Rank::Ace.is_adjacent(Rank::Nine));
    /// ```
    #[must_use]
    pub fn is_adjacent(self, other: Rank) -> bool {
        let (a, b) = (self.value(), other.value());
        a.abs_diff(b) == 1 || (a.max(b) == 14 && a.min(b) == 2)
    }

    /// Short label as printed on the card.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A card in play.
///
/// Identity (`id`, `suit`, `rank`) never changes; `face_up` flips as the
/// card moves between hidden and visible piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self {
            id,
            suit,
            rank,
            face_up: false,
        }
    }

    /// Return this card turned face up.
    #[must_use]
    pub fn revealed(mut self) -> Self {
        self.face_up = true;
        self
    }

    /// Return this card turned face down.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.face_up = false;
        self
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {:?}", self.rank, self.suit)
    }
}
