use crate::game::rules::{self, PlayError};
use crate::game::state::GameState;
use crate::model::card::Card;
use crate::model::combo::Combo;
use crate::model::hand::Hand;
use crate::model::suit::SuitOrder;
use tracing::warn;

/// Everything a policy may look at when deciding a turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub seat: usize,
    pub name: &'a str,
    pub hand: &'a Hand,
    pub state: &'a GameState,
    pub suits: &'a SuitOrder,
    /// Cards left in every seat's hand, indexed by seat.
    pub cards_left: &'a [usize],
}

/// Decision-making half of a player. Policies only propose combos; the
/// owning [`Player`] checks them and removes the cards from the hand.
pub trait ComboPolicy {
    /// Build a combo to open a round with.
    fn lead(&mut self, ctx: &TurnContext<'_>) -> Result<Combo, PlayError>;

    /// Build a combo that beats `ctx.state.current_combo`, or `None` to pass.
    fn follow(&mut self, ctx: &TurnContext<'_>) -> Result<Option<Combo>, PlayError>;

    /// Interactive policies expect the table to pause for them.
    fn is_interactive(&self) -> bool {
        false
    }
}

pub struct Player {
    name: String,
    hand: Hand,
    policy: Box<dyn ComboPolicy>,
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("hand", &self.hand)
            .finish_non_exhaustive()
    }
}

impl Player {
    pub fn new(name: impl Into<String>, policy: Box<dyn ComboPolicy>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            policy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn is_interactive(&self) -> bool {
        self.policy.is_interactive()
    }

    pub fn deal_card(&mut self, card: Card) {
        self.hand.add(card);
    }

    pub fn cards_remaining(&self) -> usize {
        self.hand.len()
    }

    pub fn has_card(&self, card: Card) -> bool {
        self.hand.contains(card)
    }

    pub fn reset(&mut self) {
        self.hand.clear();
    }

    pub fn build_lead_combo(
        &mut self,
        seat: usize,
        state: &GameState,
        suits: &SuitOrder,
        cards_left: &[usize],
    ) -> Result<Combo, PlayError> {
        if self.hand.is_empty() {
            return Err(PlayError::EmptyHand);
        }
        if state.opening && !self.has_card(Card::THREE_OF_CLUBS) {
            return Err(PlayError::MissingOpeningCard);
        }
        let ctx = TurnContext {
            seat,
            name: &self.name,
            hand: &self.hand,
            state,
            suits,
            cards_left,
        };
        let combo = self.policy.lead(&ctx)?;
        rules::check_lead(state, &combo)?;
        self.commit(combo)
    }

    /// `Ok(None)` is a pass.
    pub fn try_build_follow_combo(
        &mut self,
        seat: usize,
        state: &GameState,
        suits: &SuitOrder,
        cards_left: &[usize],
    ) -> Result<Option<Combo>, PlayError> {
        if self.hand.is_empty() {
            return Ok(None);
        }
        let ctx = TurnContext {
            seat,
            name: &self.name,
            hand: &self.hand,
            state,
            suits,
            cards_left,
        };
        let Some(combo) = self.policy.follow(&ctx)? else {
            return Ok(None);
        };
        if let Err(err) = rules::check_follow(&state.current_combo, &combo) {
            warn!(player = %self.name, %combo, error = %err, "policy proposed an illegal follow");
            return Err(err);
        }
        self.commit(combo).map(Some)
    }

    fn commit(&mut self, mut combo: Combo) -> Result<Combo, PlayError> {
        let indices = combo
            .cards()
            .iter()
            .map(|&card| {
                self.hand
                    .find_exact(card)
                    .ok_or(crate::model::hand::HandError::CardNotInHand(card))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.hand.remove_many(&indices)?;
        combo.set_owner(self.name.clone());
        Ok(combo)
    }
}
