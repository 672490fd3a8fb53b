use crate::game::state::GameState;
use crate::model::card::Card;
use crate::model::combo::{Combo, ComboError, ComboKind};
use crate::model::hand::HandError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    EmptyHand,
    MissingOpeningCard,
    MustOpenWithThreeOfClubs,
    IncompleteCombo(ComboKind),
    KindMismatch { table: ComboKind, played: ComboKind },
    DoesNotBeat,
    /// The policy could not produce a decision at all, e.g. input closed.
    PolicyFailed(String),
    Combo(ComboError),
    Hand(HandError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::EmptyHand => write!(f, "player has no more cards"),
            PlayError::MissingOpeningCard => write!(f, "player does not have 3 of clubs"),
            PlayError::MustOpenWithThreeOfClubs => {
                write!(f, "first combo must be the 3 of clubs played as a single")
            }
            PlayError::IncompleteCombo(kind) => write!(f, "{kind} combo is not complete"),
            PlayError::KindMismatch { table, played } => {
                write!(f, "cannot follow {table} with {played}")
            }
            PlayError::DoesNotBeat => write!(f, "combo does not beat current combo"),
            PlayError::PolicyFailed(reason) => write!(f, "no decision: {reason}"),
            PlayError::Combo(err) => write!(f, "{err}"),
            PlayError::Hand(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PlayError {}

impl From<ComboError> for PlayError {
    fn from(value: ComboError) -> Self {
        PlayError::Combo(value)
    }
}

impl From<HandError> for PlayError {
    fn from(value: HandError) -> Self {
        PlayError::Hand(value)
    }
}

/// A lead is any complete combo, except the opening one which is forced.
pub fn check_lead(state: &GameState, combo: &Combo) -> Result<(), PlayError> {
    if !combo.is_complete() {
        return Err(PlayError::IncompleteCombo(combo.kind()));
    }
    if state.opening
        && (combo.kind() != ComboKind::Single || !combo.contains(Card::THREE_OF_CLUBS))
    {
        return Err(PlayError::MustOpenWithThreeOfClubs);
    }
    Ok(())
}

/// Checks a follow against the table combo. Shorter combos must repeat the
/// table's kind; five-card combos may answer with any kind at least as strong.
pub fn check_follow(table: &Combo, candidate: &Combo) -> Result<(), PlayError> {
    if !candidate.is_complete() {
        return Err(PlayError::IncompleteCombo(candidate.kind()));
    }
    let table_kind = table.kind();
    let played = candidate.kind();
    let kind_allowed = if table_kind.is_five_card() {
        played.is_five_card() && played >= table_kind
    } else {
        played == table_kind
    };
    if !kind_allowed {
        return Err(PlayError::KindMismatch {
            table: table_kind,
            played,
        });
    }
    if candidate.is_weaker_than(table)? {
        return Err(PlayError::DoesNotBeat);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{PlayError, check_follow, check_lead};
    use crate::game::state::GameState;
    use crate::model::card::Card;
    use crate::model::combo::{Combo, ComboError, ComboKind};
    use crate::model::rank::Rank;
    use crate::model::suit::{Suit, SuitOrder};

    fn build(kind: ComboKind, cards: &[(Rank, Suit)]) -> Combo {
        let cards: Vec<Card> = cards.iter().map(|&(r, s)| Card::new(r, s)).collect();
        Combo::from_cards(kind, &cards, SuitOrder::STANDARD).unwrap()
    }

    fn straight_from(start: Rank) -> Combo {
        let start = start.value();
        let cards: Vec<(Rank, Suit)> = (start..start + 5)
            .zip([Suit::Clubs, Suit::Hearts, Suit::Clubs, Suit::Spades, Suit::Clubs])
            .map(|(value, suit)| (Rank::from_value(value).unwrap(), suit))
            .collect();
        build(ComboKind::Straight, &cards)
    }

    #[test]
    fn opening_lead_is_forced() {
        let mut state = GameState::new(SuitOrder::STANDARD);
        state.opening = true;
        let three = build(ComboKind::Single, &[(Rank::Three, Suit::Clubs)]);
        let other = build(ComboKind::Single, &[(Rank::Three, Suit::Spades)]);
        assert_eq!(check_lead(&state, &three), Ok(()));
        assert_eq!(
            check_lead(&state, &other),
            Err(PlayError::MustOpenWithThreeOfClubs)
        );
        state.opening = false;
        assert_eq!(check_lead(&state, &other), Ok(()));
    }

    #[test]
    fn lead_must_be_complete() {
        let state = GameState::new(SuitOrder::STANDARD);
        let half_pair = build(ComboKind::Pair, &[(Rank::Nine, Suit::Clubs)]);
        assert_eq!(
            check_lead(&state, &half_pair),
            Err(PlayError::IncompleteCombo(ComboKind::Pair))
        );
    }

    #[test]
    fn short_combos_must_match_kind_and_beat() {
        let table = build(
            ComboKind::Pair,
            &[(Rank::Nine, Suit::Clubs), (Rank::Nine, Suit::Hearts)],
        );
        let tens = build(
            ComboKind::Pair,
            &[(Rank::Ten, Suit::Clubs), (Rank::Ten, Suit::Spades)],
        );
        let fives = build(
            ComboKind::Pair,
            &[(Rank::Five, Suit::Clubs), (Rank::Five, Suit::Spades)],
        );
        let triple = build(
            ComboKind::ThreeOfKind,
            &[
                (Rank::Four, Suit::Clubs),
                (Rank::Four, Suit::Spades),
                (Rank::Four, Suit::Hearts),
            ],
        );
        assert_eq!(check_follow(&table, &tens), Ok(()));
        assert_eq!(check_follow(&table, &fives), Err(PlayError::DoesNotBeat));
        assert!(matches!(
            check_follow(&table, &triple),
            Err(PlayError::KindMismatch { .. })
        ));
    }

    #[test]
    fn five_card_combos_may_step_up_in_kind() {
        let table = straight_from(Rank::Nine);
        let full_house = build(
            ComboKind::FullHouse,
            &[
                (Rank::Four, Suit::Clubs),
                (Rank::Four, Suit::Spades),
                (Rank::Four, Suit::Hearts),
                (Rank::Six, Suit::Hearts),
                (Rank::Six, Suit::Diamonds),
            ],
        );
        assert_eq!(check_follow(&table, &full_house), Ok(()));
        assert!(matches!(
            check_follow(&full_house, &table),
            Err(PlayError::KindMismatch { .. })
        ));
        assert_eq!(
            check_follow(&table, &straight_from(Rank::Three)),
            Err(PlayError::DoesNotBeat)
        );
    }

    #[test]
    fn comparing_against_incomplete_table_is_an_error() {
        let table = build(ComboKind::Pair, &[(Rank::Nine, Suit::Clubs)]);
        let tens = build(
            ComboKind::Pair,
            &[(Rank::Ten, Suit::Clubs), (Rank::Ten, Suit::Spades)],
        );
        assert!(matches!(
            check_follow(&table, &tens),
            Err(PlayError::Combo(ComboError::Incomplete { .. }))
        ));
    }
}
