use crate::model::rank::Rank;
use crate::model::suit::{Suit, SuitOrder};
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// The card that must open every set.
    pub const THREE_OF_CLUBS: Card = Card::new(Rank::Three, Suit::Clubs);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    pub const fn is_special(self) -> bool {
        self.rank.is_special()
    }

    pub const fn is_deuce(self) -> bool {
        matches!(self.rank, Rank::Two)
    }

    /// Sort key by value, then by suit rank.
    pub fn sort_key(self, suits: &SuitOrder) -> (u8, u8) {
        (self.value(), suits.rank(self.suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
