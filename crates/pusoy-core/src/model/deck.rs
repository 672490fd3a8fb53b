use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const DECK_SIZE: usize = 52;

/// Face-down pile of cards; the top of the deck is the end of the vector.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn empty() -> Self {
        Self {
            cards: Vec::with_capacity(DECK_SIZE),
        }
    }

    pub fn standard() -> Self {
        let mut deck = Self::empty();
        deck.fill_standard();
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_with_seed(seed);
        deck
    }

    pub fn reset(&mut self) {
        self.cards.clear();
    }

    pub fn insert(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn fill_standard(&mut self) {
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                self.insert(Card::new(rank, suit));
            }
        }
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn shuffle_with_seed(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.shuffle_in_place(&mut rng);
    }

    pub fn pop_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
