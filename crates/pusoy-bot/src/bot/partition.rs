use pusoy_core::model::card::Card;
use pusoy_core::model::hand::Hand;
use pusoy_core::model::suit::SuitOrder;
use std::collections::BTreeMap;

pub const STRAIGHT_LEN: usize = 5;

/// Groupings available in one hand, rebuilt before every decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandPartition {
    cards: Vec<Card>,
    counts_by_value: BTreeMap<u8, Vec<usize>>,
    groups_by_count: [Vec<u8>; 4],
    straight_windows: Vec<(u8, u8)>,
}

impl HandPartition {
    pub fn analyze(hand: &Hand, suits: &SuitOrder) -> Self {
        let mut sorted = hand.clone();
        sorted.sort(suits);
        let cards = sorted.cards().to_vec();

        let mut counts_by_value: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
        for (index, card) in cards.iter().enumerate() {
            counts_by_value.entry(card.value()).or_default().push(index);
        }

        let mut groups_by_count: [Vec<u8>; 4] = Default::default();
        for (value, indices) in &counts_by_value {
            if let Some(group) = groups_by_count.get_mut(indices.len().wrapping_sub(1)) {
                group.push(*value);
            }
        }

        let straight_windows = straight_windows(&cards);

        Self {
            cards,
            counts_by_value,
            groups_by_count,
            straight_windows,
        }
    }

    /// The hand, ascending by value then suit.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn counts_by_value(&self) -> &BTreeMap<u8, Vec<usize>> {
        &self.counts_by_value
    }

    /// Ascending values held exactly `count` times (1..=4).
    pub fn values_with_count(&self, count: usize) -> &[u8] {
        match count {
            1..=4 => &self.groups_by_count[count - 1],
            _ => &[],
        }
    }

    pub fn straight_windows(&self) -> &[(u8, u8)] {
        &self.straight_windows
    }

    /// Every card of `value`, lowest suit first.
    pub fn cards_of(&self, value: u8) -> Vec<Card> {
        self.counts_by_value
            .get(&value)
            .map(|indices| indices.iter().map(|&i| self.cards[i]).collect())
            .unwrap_or_default()
    }

    /// Lowest-suited card of `value`.
    pub fn lowest_of(&self, value: u8) -> Option<Card> {
        self.counts_by_value
            .get(&value)
            .and_then(|indices| indices.first())
            .map(|&i| self.cards[i])
    }

    /// Lowest card whose value differs from `value`.
    pub fn lowest_other_than(&self, value: u8) -> Option<Card> {
        self.cards.iter().copied().find(|card| card.value() != value)
    }

    pub fn lowest_card(&self) -> Option<Card> {
        self.cards.first().copied()
    }
}

/// Five-value windows over contiguous runs; a run of n values yields n - 4
/// overlapping windows.
fn straight_windows(sorted: &[Card]) -> Vec<(u8, u8)> {
    let mut windows = Vec::new();
    let mut values = sorted.iter().copied().map(Card::value);
    let Some(first) = values.next() else {
        return windows;
    };
    let (mut start, mut current) = (first, first);
    for value in values {
        if value == current {
            continue;
        }
        if value == current + 1 {
            current = value;
        } else {
            start = value;
            current = value;
        }
        if usize::from(current - start) + 1 == STRAIGHT_LEN {
            windows.push((start, current));
            start += 1;
        }
    }
    windows
}
