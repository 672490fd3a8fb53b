use core::fmt;
use serde::{Deserialize, Serialize};

/// Card rank, declared in game order: the three is the lowest card and the
/// deuce the highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Rank {
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
    Two = 15,
}

impl Rank {
    pub const ORDERED: [Rank; 13] = [
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
        Rank::Ace,
        Rank::Two,
    ];

    pub const LOWEST_VALUE: u8 = Rank::Three.value();

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            15 => Some(Rank::Two),
            _ => None,
        }
    }

    /// Ordering value used by every comparison in the game.
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Jack, queen, king and ace.
    pub const fn is_special(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King | Rank::Ace)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
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
            Rank::Ace => "A",
            Rank::Two => "2",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn from_value_maps() {
        assert_eq!(Rank::from_value(11), Some(Rank::Jack));
        assert_eq!(Rank::from_value(15), Some(Rank::Two));
        assert_eq!(Rank::from_value(2), None);
    }

    #[test]
    fn deuce_outranks_ace_and_three_is_lowest() {
        assert!(Rank::Two > Rank::Ace);
        assert!(Rank::Ace > Rank::King);
        assert_eq!(Rank::ORDERED[0], Rank::Three);
        assert_eq!(Rank::LOWEST_VALUE, 3);
    }

    #[test]
    fn only_named_cards_are_special() {
        assert!(Rank::Ace.is_special());
        assert!(Rank::Jack.is_special());
        assert!(!Rank::Two.is_special());
        assert!(!Rank::Ten.is_special());
    }

    #[test]
    fn display_matches_symbols() {
        assert_eq!(Rank::Queen.to_string(), "Q");
        assert_eq!(Rank::Ten.to_string(), "10");
        assert_eq!(Rank::Two.to_string(), "2");
    }
}
