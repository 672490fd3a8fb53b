use super::{ComboPolicy, TurnContext};
use crate::bot::{FollowPlanner, HandPartition, LeadPlanner};
use pusoy_core::game::rules::PlayError;
use pusoy_core::model::combo::Combo;
use tracing::{Level, event};

/// Spends the cheapest grouping of the first kind that works. Never looks
/// across kinds for a cheaper winner and never holds strong combos back.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl ComboPolicy for GreedyPolicy {
    fn lead(&mut self, ctx: &TurnContext<'_>) -> Result<Combo, PlayError> {
        let partition = HandPartition::analyze(ctx.hand, ctx.suits);
        let combo = LeadPlanner::choose(&partition, ctx.state.opening, ctx.suits)?;
        log_decision(ctx, &partition, Some(&combo), "lead");
        Ok(combo)
    }

    fn follow(&mut self, ctx: &TurnContext<'_>) -> Result<Option<Combo>, PlayError> {
        let partition = HandPartition::analyze(ctx.hand, ctx.suits);
        let combo = FollowPlanner::choose(&partition, &ctx.state.current_combo, ctx.suits)?;
        log_decision(ctx, &partition, combo.as_ref(), "follow");
        Ok(combo)
    }
}

fn log_decision(
    ctx: &TurnContext<'_>,
    partition: &HandPartition,
    chosen: Option<&Combo>,
    mode: &str,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let choice = chosen
        .map(|combo| {
            combo
                .cards()
                .iter()
                .map(|card| card.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_else(|| "pass".to_string());

    event!(
        target: "pusoy_bot::greedy",
        Level::DEBUG,
        seat = ctx.seat,
        player = ctx.name,
        mode,
        table = %ctx.state.current_combo.kind(),
        hand_size = ctx.hand.len(),
        windows = partition.straight_windows().len(),
        kind = chosen.map(|combo| combo.kind().label()).unwrap_or("-"),
        chosen = %choice,
    );
}

#[cfg(test)]
mod tests {
    use super::GreedyPolicy;
    use crate::policy::{ComboPolicy, TurnContext};
    use pusoy_core::game::state::GameState;
    use pusoy_core::model::card::Card;
    use pusoy_core::model::combo::ComboKind;
    use pusoy_core::model::hand::Hand;
    use pusoy_core::model::rank::Rank;
    use pusoy_core::model::suit::{Suit, SuitOrder};

    #[test]
    fn opening_lead_plays_three_of_clubs() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Four, Suit::Clubs),
            Card::new(Rank::Four, Suit::Hearts),
            Card::THREE_OF_CLUBS,
        ]);
        let mut state = GameState::new(SuitOrder::STANDARD);
        state.opening = true;
        let ctx = TurnContext {
            seat: 0,
            name: "player2",
            hand: &hand,
            state: &state,
            suits: &SuitOrder::STANDARD,
            cards_left: &[3, 13, 13, 13],
        };
        let combo = GreedyPolicy::new().lead(&ctx).unwrap();
        assert_eq!(combo.kind(), ComboKind::Single);
        assert_eq!(combo.cards(), &[Card::THREE_OF_CLUBS]);
    }
}
