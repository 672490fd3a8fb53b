use super::table::SetSummary;
use crate::model::card::Card;
use crate::model::combo::ComboKind;
use serde::{Deserialize, Serialize};

/// One finished set, flattened for JSON lines output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetRecord {
    pub set: u32,
    pub seed: u64,
    pub winner: String,
    pub points: u32,
    pub final_kind: ComboKind,
    pub final_cards: Vec<Card>,
    pub rounds: u32,
    pub scores: Vec<u32>,
}

impl SetRecord {
    pub fn capture(summary: &SetSummary, names: &[&str]) -> Self {
        SetRecord {
            set: summary.set_index + 1,
            seed: summary.seed,
            winner: names
                .get(summary.winner)
                .map(|name| (*name).to_string())
                .unwrap_or_else(|| format!("seat{}", summary.winner)),
            points: summary.points,
            final_kind: summary.final_combo.kind(),
            final_cards: summary.final_combo.cards().to_vec(),
            rounds: summary.rounds,
            scores: summary.scores.clone(),
        }
    }

    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
