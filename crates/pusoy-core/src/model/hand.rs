use crate::model::card::Card;
use crate::model::suit::SuitOrder;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    IndexOutOfRange { index: usize, len: usize },
    DuplicateIndex(usize),
    CardNotInHand(Card),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::IndexOutOfRange { index, len } => {
                write!(f, "card index {index} out of range for hand of {len}")
            }
            HandError::DuplicateIndex(index) => write!(f, "card index {index} given twice"),
            HandError::CardNotInHand(card) => write!(f, "{card} is not in hand"),
        }
    }
}

impl std::error::Error for HandError {}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_at(&self, index: usize) -> Result<Card, HandError> {
        self.cards
            .get(index)
            .copied()
            .ok_or(HandError::IndexOutOfRange {
                index,
                len: self.cards.len(),
            })
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Card, HandError> {
        self.card_at(index)?;
        Ok(self.cards.remove(index))
    }

    /// Removes every listed index and returns the cards in the order the
    /// indices were given. Nothing is removed unless all indices are valid.
    pub fn remove_many(&mut self, indices: &[usize]) -> Result<Vec<Card>, HandError> {
        let mut ordered = indices.to_vec();
        ordered.sort_unstable();
        for pair in ordered.windows(2) {
            if pair[0] == pair[1] {
                return Err(HandError::DuplicateIndex(pair[0]));
            }
        }
        let removed = indices
            .iter()
            .map(|&index| self.card_at(index))
            .collect::<Result<Vec<_>, _>>()?;
        for index in ordered.into_iter().rev() {
            self.cards.remove(index);
        }
        Ok(removed)
    }

    pub fn remove_card(&mut self, card: Card) -> Result<(), HandError> {
        let index = self
            .find_exact(card)
            .ok_or(HandError::CardNotInHand(card))?;
        self.cards.remove(index);
        Ok(())
    }

    pub fn find_exact(&self, card: Card) -> Option<usize> {
        self.cards.iter().position(|&c| c == card)
    }

    pub fn find_first_by_value(&self, value: u8) -> Option<usize> {
        self.cards.iter().position(|c| c.value() == value)
    }

    pub fn lowest_index(&self, suits: &SuitOrder) -> Option<usize> {
        self.cards
            .iter()
            .enumerate()
            .min_by_key(|(_, card)| card.sort_key(suits))
            .map(|(index, _)| index)
    }

    /// Ascending by value, then by suit rank.
    pub fn sort(&mut self, suits: &SuitOrder) {
        self.cards.sort_by_key(|card| card.sort_key(suits));
    }
}
