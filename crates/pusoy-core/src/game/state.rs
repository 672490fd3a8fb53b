use crate::model::combo::{Combo, ComboKind};
use crate::model::suit::SuitOrder;

/// What every player can see on the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub current_combo: Combo,
    pub lead_player: usize,
    /// The next combo is the first of the set and must be the 3 of clubs.
    pub opening: bool,
    /// Combos played so far this round, oldest first.
    pub pile: Vec<Combo>,
}

impl GameState {
    pub fn new(suits: SuitOrder) -> Self {
        Self {
            current_combo: Combo::new(ComboKind::Undefined, suits),
            lead_player: 0,
            opening: false,
            pile: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.current_combo.reset_all();
        self.lead_player = 0;
        self.opening = false;
        self.pile.clear();
    }

    /// Empties the table for a fresh round without touching the leader.
    pub fn clear_table(&mut self) {
        self.current_combo.reset_all();
        self.pile.clear();
    }

    pub fn commit(&mut self, combo: Combo) {
        self.pile.push(combo.clone());
        self.current_combo = combo;
        self.opening = false;
    }

    pub fn suit_order(&self) -> &SuitOrder {
        self.current_combo.suit_order()
    }
}
