use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::SuitOrder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

pub const MAX_COMBO_SIZE: usize = 5;

/// Sorted values of the only straight allowed to skip values: 3-4-5-A-2.
const LOW_WRAP_VALUES: [u8; 5] = [
    Rank::Three.value(),
    Rank::Four.value(),
    Rank::Five.value(),
    Rank::Ace.value(),
    Rank::Two.value(),
];

/// Combo kinds in ascending strength; a stronger kind beats any weaker one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ComboKind {
    Single,
    Pair,
    ThreeOfKind,
    Straight,
    Flush,
    FullHouse,
    FourOfKind,
    StraightFlush,
    Undefined,
}

impl ComboKind {
    pub const PLAYABLE: [ComboKind; 8] = [
        ComboKind::Single,
        ComboKind::Pair,
        ComboKind::ThreeOfKind,
        ComboKind::Straight,
        ComboKind::Flush,
        ComboKind::FullHouse,
        ComboKind::FourOfKind,
        ComboKind::StraightFlush,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::PLAYABLE.len() {
            Some(Self::PLAYABLE[index])
        } else {
            None
        }
    }

    pub const fn required_cards(self) -> usize {
        match self {
            ComboKind::Single => 1,
            ComboKind::Pair => 2,
            ComboKind::ThreeOfKind => 3,
            ComboKind::Straight
            | ComboKind::Flush
            | ComboKind::FullHouse
            | ComboKind::FourOfKind
            | ComboKind::StraightFlush => 5,
            ComboKind::Undefined => 0,
        }
    }

    pub const fn is_five_card(self) -> bool {
        self.required_cards() == MAX_COMBO_SIZE
    }

    pub const fn label(self) -> &'static str {
        match self {
            ComboKind::Single => "High Card",
            ComboKind::Pair => "Pair",
            ComboKind::ThreeOfKind => "Three-of-a-Kind",
            ComboKind::Straight => "Straight",
            ComboKind::Flush => "Flush",
            ComboKind::FullHouse => "Full House",
            ComboKind::FourOfKind => "Four-of-a-Kind",
            ComboKind::StraightFlush => "Straight Flush",
            ComboKind::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for ComboKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboError {
    Full {
        kind: ComboKind,
    },
    DuplicateCard(Card),
    RankMismatch {
        kind: ComboKind,
        expected: Rank,
        found: Rank,
    },
    InvalidFiveCard {
        kind: ComboKind,
        reason: &'static str,
    },
    UndefinedKind,
    Incomplete {
        kind: ComboKind,
        have: usize,
        need: usize,
    },
    Incomparable(ComboKind),
}

impl ComboError {
    /// Rejected cards leave the combo untouched and may be retried; every
    /// other variant means the caller broke an invariant.
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            ComboError::Full { .. }
                | ComboError::DuplicateCard(_)
                | ComboError::RankMismatch { .. }
                | ComboError::InvalidFiveCard { .. }
        )
    }
}

impl fmt::Display for ComboError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComboError::Full { kind } => write!(f, "cannot add more cards to {kind} combo"),
            ComboError::DuplicateCard(card) => write!(f, "{card} is already in the combo"),
            ComboError::RankMismatch {
                kind,
                expected,
                found,
            } => write!(
                f,
                "cards in {kind} must be of same rank (expected {expected}, got {found})"
            ),
            ComboError::InvalidFiveCard { kind, reason } => write!(f, "invalid {kind}: {reason}"),
            ComboError::UndefinedKind => write!(f, "cannot add card if combo type not defined"),
            ComboError::Incomplete { kind, have, need } => {
                write!(f, "cannot compare {kind} holding {have} of {need} cards")
            }
            ComboError::Incomparable(kind) => write!(f, "cannot compare combos of type {kind}"),
        }
    }
}

impl std::error::Error for ComboError {}

/// Strength of a combo within its kind. Keys compare lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankKey {
    values: [u8; MAX_COMBO_SIZE],
    suit: u8,
}

impl RankKey {
    fn card(card: Card, suits: &SuitOrder) -> Self {
        Self::value(card.value(), suits.rank(card.suit))
    }

    fn value(value: u8, suit: u8) -> Self {
        let mut values = [0; MAX_COMBO_SIZE];
        values[0] = value;
        Self { values, suit }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combo {
    kind: ComboKind,
    cards: Vec<Card>,
    owner: String,
    suits: SuitOrder,
}

impl Combo {
    pub fn new(kind: ComboKind, suits: SuitOrder) -> Self {
        Self::with_owner("", kind, suits)
    }

    pub fn with_owner(owner: impl Into<String>, kind: ComboKind, suits: SuitOrder) -> Self {
        Self {
            kind,
            cards: Vec::with_capacity(kind.required_cards()),
            owner: owner.into(),
            suits,
        }
    }

    /// Adds every card in turn, stopping at the first rejection.
    pub fn from_cards(
        kind: ComboKind,
        cards: &[Card],
        suits: SuitOrder,
    ) -> Result<Self, ComboError> {
        let mut combo = Self::new(kind, suits);
        for &card in cards {
            combo.add_card(card)?;
        }
        Ok(combo)
    }

    pub fn kind(&self) -> ComboKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: ComboKind) {
        self.kind = kind;
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = owner.into();
    }

    pub fn suit_order(&self) -> &SuitOrder {
        &self.suits
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Holds exactly the card count its kind requires.
    pub fn is_complete(&self) -> bool {
        self.kind != ComboKind::Undefined && self.cards.len() == self.kind.required_cards()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn count_rank(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|card| card.rank == rank).count()
    }

    pub fn high_card(&self) -> Option<Card> {
        self.cards
            .iter()
            .copied()
            .max_by_key(|card| card.sort_key(&self.suits))
    }

    pub fn low_card(&self) -> Option<Card> {
        self.cards
            .iter()
            .copied()
            .min_by_key(|card| card.sort_key(&self.suits))
    }

    pub fn sort(&mut self) {
        let suits = self.suits;
        self.cards.sort_by_key(|card| card.sort_key(&suits));
    }

    pub fn reset_cards(&mut self) {
        self.cards.clear();
    }

    pub fn reset_all(&mut self) {
        self.kind = ComboKind::Undefined;
        self.owner.clear();
        self.cards.clear();
    }

    pub fn add_card(&mut self, card: Card) -> Result<(), ComboError> {
        let result = self.check_card(card);
        if let Err(err) = &result {
            debug!(kind = %self.kind, %card, error = %err, "card rejected");
        }
        result
    }

    fn check_card(&mut self, card: Card) -> Result<(), ComboError> {
        let kind = self.kind;
        if kind == ComboKind::Undefined {
            return Err(ComboError::UndefinedKind);
        }
        let size = self.cards.len();
        if size >= kind.required_cards() || size >= MAX_COMBO_SIZE {
            return Err(ComboError::Full { kind });
        }
        if self.contains(card) {
            return Err(ComboError::DuplicateCard(card));
        }

        match kind {
            ComboKind::Pair | ComboKind::ThreeOfKind => {
                if let Some(first) = self.cards.first() {
                    if first.value() != card.value() {
                        return Err(ComboError::RankMismatch {
                            kind,
                            expected: first.rank,
                            found: card.rank,
                        });
                    }
                }
                self.cards.push(card);
            }
            _ if kind.is_five_card() && size == MAX_COMBO_SIZE - 1 => {
                let mut sorted = self.cards.clone();
                sorted.push(card);
                sorted.sort_by_key(|c| c.sort_key(&self.suits));
                validate_five_card(kind, &sorted)
                    .map_err(|reason| ComboError::InvalidFiveCard { kind, reason })?;
                self.cards = sorted;
            }
            _ => self.cards.push(card),
        }
        Ok(())
    }

    /// `true` when `self` ranks strictly below `other`. Kinds dominate; within
    /// one kind both combos must be complete.
    pub fn is_weaker_than(&self, other: &Combo) -> Result<bool, ComboError> {
        if self.cards.is_empty() {
            return Ok(false);
        }
        if self.kind != other.kind {
            return Ok(self.kind < other.kind);
        }
        let mine = self.rank_key(&self.suits)?;
        let theirs = other.rank_key(&self.suits)?;
        Ok(mine < theirs)
    }

    pub fn rank_key(&self, suits: &SuitOrder) -> Result<RankKey, ComboError> {
        let need = self.kind.required_cards();
        if self.kind == ComboKind::Undefined {
            return Err(ComboError::Incomparable(self.kind));
        }
        if self.cards.len() < need {
            return Err(ComboError::Incomplete {
                kind: self.kind,
                have: self.cards.len(),
                need,
            });
        }

        let mut sorted = self.cards.clone();
        sorted.sort_by_key(|card| card.sort_key(suits));
        let top = sorted[sorted.len() - 1];

        let key = match self.kind {
            ComboKind::Single | ComboKind::Pair | ComboKind::ThreeOfKind => {
                RankKey::card(top, suits)
            }
            ComboKind::Straight | ComboKind::StraightFlush => {
                let high = if is_low_wrap(&sorted) {
                    sorted
                        .iter()
                        .copied()
                        .filter(|card| !matches!(card.rank, Rank::Ace | Rank::Two))
                        .next_back()
                        .unwrap_or(top)
                } else {
                    top
                };
                RankKey::card(high, suits)
            }
            ComboKind::FullHouse | ComboKind::FourOfKind => {
                let counts = value_counts(&sorted);
                let value = counts
                    .iter()
                    .find(|(_, count)| **count > 2)
                    .map(|(value, _)| *value)
                    .unwrap_or(0);
                RankKey::value(value, 0)
            }
            ComboKind::Flush => {
                let mut values = [0; MAX_COMBO_SIZE];
                for (slot, card) in values.iter_mut().zip(sorted.iter().rev()) {
                    *slot = card.value();
                }
                RankKey {
                    values,
                    suit: suits.rank(sorted[0].suit),
                }
            }
            ComboKind::Undefined => return Err(ComboError::Incomparable(self.kind)),
        };
        Ok(key)
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sorted = self.cards.clone();
        sorted.sort_by_key(|card| card.sort_key(&self.suits));
        write!(f, "{:>20} | {:<16} ", self.owner, self.kind.label())?;
        for card in sorted {
            write!(f, " {card}")?;
        }
        Ok(())
    }
}

fn value_counts(cards: &[Card]) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for card in cards {
        *counts.entry(card.value()).or_insert(0) += 1;
    }
    counts
}

fn is_low_wrap(sorted: &[Card]) -> bool {
    sorted.len() == MAX_COMBO_SIZE
        && sorted
            .iter()
            .zip(LOW_WRAP_VALUES.iter())
            .all(|(card, value)| card.value() == *value)
}

fn is_run(sorted: &[Card]) -> bool {
    is_low_wrap(sorted)
        || sorted
            .windows(2)
            .all(|pair| pair[1].value() == pair[0].value() + 1)
}

fn is_single_suit(sorted: &[Card]) -> bool {
    sorted.windows(2).all(|pair| pair[0].suit == pair[1].suit)
}

/// Expects all five cards, sorted ascending.
fn validate_five_card(kind: ComboKind, sorted: &[Card]) -> Result<(), &'static str> {
    match kind {
        ComboKind::Straight => {
            if !is_run(sorted) {
                return Err("straight must be a set of cards with consecutive values");
            }
        }
        ComboKind::Flush => {
            if !is_single_suit(sorted) {
                return Err("all cards in flush must be of same suit");
            }
        }
        ComboKind::FullHouse => {
            let counts = value_counts(sorted);
            if counts.len() != 2 || !counts.values().any(|&count| count == 3) {
                return Err("full house must have one pair and one three-of-a-kind");
            }
        }
        ComboKind::FourOfKind => {
            let counts = value_counts(sorted);
            if counts.len() != 2 || !counts.values().any(|&count| count == 4) {
                return Err("four-of-a-kind must have four cards of the same value");
            }
        }
        ComboKind::StraightFlush => {
            if !is_single_suit(sorted) {
                return Err("all cards in straight flush must be of same suit");
            }
            if !is_run(sorted) {
                return Err("straight flush must be a set of cards with consecutive values");
            }
        }
        _ => return Err("not a five-card combo"),
    }
    Ok(())
}
