use crate::model::combo::Combo;
use crate::model::rank::Rank;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: Vec<u32>,
}

impl ScoreBoard {
    pub fn new(players: usize) -> Self {
        Self {
            totals: vec![0; players],
        }
    }

    /// Points for going out: 2^k when the final combo holds k deuces, else 1.
    pub fn points_for_finish(final_combo: &Combo) -> u32 {
        match final_combo.count_rank(Rank::Two) {
            0 => 1,
            deuces => 1u32 << deuces,
        }
    }

    pub fn add_points(&mut self, seat: usize, points: u32) {
        if let Some(total) = self.totals.get_mut(seat) {
            *total += points;
        }
    }

    /// Credits the player who went out and returns the points awarded.
    pub fn record_finish(&mut self, seat: usize, final_combo: &Combo) -> u32 {
        let points = Self::points_for_finish(final_combo);
        self.add_points(seat, points);
        points
    }

    pub fn set_totals(&mut self, totals: &[u32]) {
        self.totals = totals.to_vec();
    }

    pub fn score(&self, seat: usize) -> u32 {
        self.totals.get(seat).copied().unwrap_or(0)
    }

    pub fn standings(&self) -> &[u32] {
        &self.totals
    }

    pub fn target_reached(&self, target: u32) -> bool {
        self.totals.iter().any(|&total| total >= target)
    }

    /// Last seat in order at or above the target.
    pub fn winner(&self, target: u32) -> Option<usize> {
        self.totals
            .iter()
            .enumerate()
            .filter(|(_, total)| **total >= target)
            .map(|(seat, _)| seat)
            .next_back()
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new(4)
    }
}
