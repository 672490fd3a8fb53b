use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Spades = 1,
    Hearts = 2,
    Diamonds = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Spades, Suit::Hearts, Suit::Diamonds];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Clubs),
            1 => Some(Suit::Spades),
            2 => Some(Suit::Hearts),
            3 => Some(Suit::Diamonds),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Clubs => "c",
            Suit::Spades => "s",
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
        };
        f.write_str(symbol)
    }
}

impl FromStr for Suit {
    type Err = SuitOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "clubs" => Ok(Suit::Clubs),
            "s" | "spades" => Ok(Suit::Spades),
            "h" | "hearts" => Ok(Suit::Hearts),
            "d" | "diamonds" => Ok(Suit::Diamonds),
            other => Err(SuitOrderError::UnknownSuit(other.to_string())),
        }
    }
}

/// Rank of each suit, used only to break ties between cards of equal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuitOrder {
    ranks: [u8; 4],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuitOrderError {
    UnknownSuit(String),
    Duplicate(Suit),
    WrongLength(usize),
}

impl fmt::Display for SuitOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuitOrderError::UnknownSuit(raw) => write!(f, "unknown suit '{raw}'"),
            SuitOrderError::Duplicate(suit) => write!(f, "suit {suit} listed more than once"),
            SuitOrderError::WrongLength(len) => {
                write!(f, "suit order must list all 4 suits, got {len}")
            }
        }
    }
}

impl std::error::Error for SuitOrderError {}

impl SuitOrder {
    /// Clubs, spades, hearts, diamonds from low to high.
    pub const STANDARD: SuitOrder = SuitOrder {
        ranks: [1, 2, 3, 4],
    };

    /// Builds an order from suits listed lowest first.
    pub fn from_lowest(suits: &[Suit]) -> Result<Self, SuitOrderError> {
        if suits.len() != Suit::ALL.len() {
            return Err(SuitOrderError::WrongLength(suits.len()));
        }
        let mut ranks = [0u8; 4];
        for (position, suit) in suits.iter().copied().enumerate() {
            if ranks[suit.index()] != 0 {
                return Err(SuitOrderError::Duplicate(suit));
            }
            ranks[suit.index()] = position as u8 + 1;
        }
        Ok(Self { ranks })
    }

    pub const fn rank(&self, suit: Suit) -> u8 {
        self.ranks[suit as usize]
    }

    /// Suits listed lowest first.
    pub fn lowest_first(&self) -> [Suit; 4] {
        let mut suits = Suit::ALL;
        suits.sort_by_key(|suit| self.rank(*suit));
        suits
    }
}

impl Default for SuitOrder {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::{Suit, SuitOrder, SuitOrderError};

    #[test]
    fn display_returns_ascii_symbols() {
        assert_eq!(Suit::Clubs.to_string(), "c");
        assert_eq!(Suit::Diamonds.to_string(), "d");
    }

    #[test]
    fn from_index_maps_valid_values() {
        assert_eq!(Suit::from_index(2), Some(Suit::Hearts));
        assert_eq!(Suit::from_index(4), None);
    }

    #[test]
    fn parses_names_and_symbols() {
        assert_eq!("Spades".parse::<Suit>(), Ok(Suit::Spades));
        assert_eq!("d".parse::<Suit>(), Ok(Suit::Diamonds));
        assert!("stars".parse::<Suit>().is_err());
    }

    #[test]
    fn standard_order_ranks_diamonds_highest() {
        let order = SuitOrder::STANDARD;
        assert!(order.rank(Suit::Diamonds) > order.rank(Suit::Hearts));
        assert!(order.rank(Suit::Hearts) > order.rank(Suit::Spades));
        assert!(order.rank(Suit::Spades) > order.rank(Suit::Clubs));
    }

    #[test]
    fn custom_order_is_built_lowest_first() {
        let order =
            SuitOrder::from_lowest(&[Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades])
                .unwrap();
        assert_eq!(order.rank(Suit::Diamonds), 1);
        assert_eq!(order.rank(Suit::Spades), 4);
        assert_eq!(
            order.lowest_first(),
            [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades]
        );
    }

    #[test]
    fn custom_order_rejects_duplicates_and_gaps() {
        assert_eq!(
            SuitOrder::from_lowest(&[Suit::Clubs, Suit::Clubs, Suit::Hearts, Suit::Spades]),
            Err(SuitOrderError::Duplicate(Suit::Clubs))
        );
        assert_eq!(
            SuitOrder::from_lowest(&[Suit::Clubs]),
            Err(SuitOrderError::WrongLength(1))
        );
    }
}
