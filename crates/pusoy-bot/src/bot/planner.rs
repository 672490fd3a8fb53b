use super::partition::HandPartition;
use pusoy_core::game::rules::PlayError;
use pusoy_core::model::card::Card;
use pusoy_core::model::combo::{Combo, ComboKind};
use pusoy_core::model::suit::SuitOrder;
use tracing::debug;

/// Kinds tried when leading, strongest first.
pub const LEAD_PRIORITY: [ComboKind; 6] = [
    ComboKind::FourOfKind,
    ComboKind::FullHouse,
    ComboKind::Straight,
    ComboKind::ThreeOfKind,
    ComboKind::Pair,
    ComboKind::Single,
];

const FIVE_CARD_SEARCH: [ComboKind; 3] = [
    ComboKind::Straight,
    ComboKind::FullHouse,
    ComboKind::FourOfKind,
];

/// Candidate card sets for `kind`, cheapest first. Flushes are never built.
pub fn groupings(partition: &HandPartition, kind: ComboKind) -> Vec<Vec<Card>> {
    match kind {
        ComboKind::Single | ComboKind::Pair | ComboKind::ThreeOfKind => {
            let count = kind.required_cards();
            partition
                .values_with_count(count)
                .iter()
                .map(|&value| partition.cards_of(value))
                .collect()
        }
        ComboKind::Straight => partition
            .straight_windows()
            .iter()
            .filter_map(|&(start, end)| {
                (start..=end)
                    .map(|value| partition.lowest_of(value))
                    .collect::<Option<Vec<_>>>()
            })
            .collect(),
        ComboKind::FullHouse => {
            let Some(&pair) = partition.values_with_count(2).first() else {
                return Vec::new();
            };
            partition
                .values_with_count(3)
                .iter()
                .map(|&triple| {
                    let mut cards = partition.cards_of(triple);
                    cards.extend(partition.cards_of(pair));
                    cards
                })
                .collect()
        }
        ComboKind::FourOfKind => partition
            .values_with_count(4)
            .iter()
            .filter_map(|&quad| {
                let kicker = partition.lowest_other_than(quad)?;
                let mut cards = partition.cards_of(quad);
                cards.push(kicker);
                Some(cards)
            })
            .collect(),
        ComboKind::Flush | ComboKind::StraightFlush | ComboKind::Undefined => Vec::new(),
    }
}

pub struct LeadPlanner;

impl LeadPlanner {
    pub fn choose(
        partition: &HandPartition,
        opening: bool,
        suits: &SuitOrder,
    ) -> Result<Combo, PlayError> {
        if opening {
            if !partition.cards().contains(&Card::THREE_OF_CLUBS) {
                return Err(PlayError::MissingOpeningCard);
            }
            return Ok(Combo::from_cards(
                ComboKind::Single,
                &[Card::THREE_OF_CLUBS],
                *suits,
            )?);
        }

        for kind in LEAD_PRIORITY {
            if let Some(cards) = groupings(partition, kind).into_iter().next() {
                debug!(%kind, candidates = cards.len(), "lead grouping found");
                return Ok(Combo::from_cards(kind, &cards, *suits)?);
            }
        }

        // only a lone four of a kind without a kicker gets here
        let lowest = partition.lowest_card().ok_or(PlayError::EmptyHand)?;
        Ok(Combo::from_cards(ComboKind::Single, &[lowest], *suits)?)
    }
}

pub struct FollowPlanner;

impl FollowPlanner {
    /// Kinds searched against a table combo of `table`, in order.
    pub fn search_kinds(table: ComboKind) -> &'static [ComboKind] {
        match table {
            ComboKind::Single => &[ComboKind::Single],
            ComboKind::Pair => &[ComboKind::Pair],
            ComboKind::ThreeOfKind => &[ComboKind::ThreeOfKind],
            ComboKind::Straight | ComboKind::FullHouse | ComboKind::FourOfKind => {
                &FIVE_CARD_SEARCH
            }
            ComboKind::Flush | ComboKind::StraightFlush | ComboKind::Undefined => &[],
        }
    }

    /// First candidate that is not weaker than `table`, or `None` to pass.
    pub fn choose(
        partition: &HandPartition,
        table: &Combo,
        suits: &SuitOrder,
    ) -> Result<Option<Combo>, PlayError> {
        if partition.cards().is_empty() {
            return Ok(None);
        }
        for &kind in Self::search_kinds(table.kind()) {
            for cards in groupings(partition, kind) {
                let candidate = Combo::from_cards(kind, &cards, *suits)?;
                if !candidate.is_weaker_than(table)? {
                    return Ok(Some(candidate));
                }
                debug!(%kind, candidate = %candidate, "candidate does not beat table");
            }
        }
        Ok(None)
    }
}
