use std::io::Write;

use pusoy_core::game::player::Player;
use pusoy_core::game::state::GameState;
use pusoy_core::game::table::{SetSummary, TableEvents};
use pusoy_core::model::combo::Combo;
use pusoy_core::model::hand::Hand;

const CELL: usize = 5;
const RULE: &str =
    "================================================================================";

/// Two lines: card indices over the cards they select.
pub fn hand_with_indices(hand: &Hand) -> String {
    let mut indices = String::from("indices: ");
    let mut cards = String::from("hand:    ");
    for (index, card) in hand.iter().enumerate() {
        indices.push_str(&format!("{index:>CELL$}"));
        cards.push_str(&format!("{:>CELL$}", card.to_string()));
    }
    format!("{indices}\n{cards}")
}

pub fn hand_line(name: &str, hand: &Hand) -> String {
    let cards: Vec<String> = hand.iter().map(|card| card.to_string()).collect();
    format!("{name:>20} | {}", cards.join(" "))
}

pub fn score_table(names: &[&str], scores: &[u32]) -> String {
    let mut out = String::new();
    out.push_str("================================\n");
    out.push_str("|          ScoreBoard          |\n");
    out.push_str("================================\n");
    for (name, score) in names.iter().zip(scores) {
        out.push_str(&format!("| {name:<22}{score:>6} |\n"));
    }
    out.push_str("================================");
    out
}

pub fn banner(title: &str) -> String {
    let padded = format!(" {title} ");
    format!("{padded:=^width$}", width = RULE.len())
}

/// Prints table events as text. With `pause` set the human confirms each of
/// their turns before play continues.
pub struct TerminalEvents<W: Write> {
    out: W,
    show_hands: bool,
    pause: Option<Box<dyn FnMut()>>,
}

impl<W: Write> TerminalEvents<W> {
    pub fn new(out: W, show_hands: bool) -> Self {
        Self {
            out,
            show_hands,
            pause: None,
        }
    }

    pub fn with_pause(mut self, pause: impl FnMut() + 'static) -> Self {
        self.pause = Some(Box::new(pause));
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        // terminal output is best effort
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write> TableEvents for TerminalEvents<W> {
    fn set_started(&mut self, set_index: u32, _players: &[Player]) {
        self.line(RULE);
        self.line(&banner(&format!("SET {}", set_index + 1)));
        self.line(RULE);
    }

    fn round_started(&mut self, leader: usize, players: &[Player]) {
        self.line("");
        self.line(&banner("NEW ROUND"));
        if self.show_hands {
            for player in players {
                self.line(&hand_line(player.name(), player.hand()));
            }
        }
        if let Some(player) = players.get(leader) {
            self.line(&format!("Starting round, leader: {}", player.name()));
        }
    }

    fn combo_played(&mut self, _seat: usize, combo: &Combo, _state: &GameState) {
        self.line(&combo.to_string());
    }

    fn passed(&mut self, _seat: usize, _state: &GameState) {}

    fn turn_finished(&mut self, _seat: usize, _state: &GameState) {
        let _ = self.out.flush();
        if let Some(pause) = self.pause.as_mut() {
            pause();
        }
    }

    fn round_won(&mut self, leader: usize, players: &[Player]) {
        if let Some(player) = players.get(leader) {
            self.line(&format!(
                "All other players have passed. {} wins the round.",
                player.name()
            ));
        }
    }

    fn set_finished(&mut self, summary: &SetSummary, players: &[Player]) {
        if let Some(player) = players.get(summary.winner) {
            self.line(&format!("{} WINS! (+{})", player.name(), summary.points));
        }
        let names: Vec<&str> = players.iter().map(Player::name).collect();
        self.line("");
        self.line(&score_table(&names, &summary.scores));
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::{banner, hand_with_indices, score_table};
    use pusoy_core::model::card::Card;
    use pusoy_core::model::hand::Hand;
    use pusoy_core::model::rank::Rank;
    use pusoy_core::model::suit::Suit;

    #[test]
    fn indices_line_up_with_cards() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Three, Suit::Clubs),
            Card::new(Rank::Ten, Suit::Hearts),
        ]);
        let text = hand_with_indices(&hand);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), lines[1].len());
        assert!(lines[1].ends_with("10h"));
    }

    #[test]
    fn score_table_has_a_row_per_player() {
        let table = score_table(&["player1", "player2"], &[3, 0]);
        assert!(table.contains("| player1                    3 |"));
        assert_eq!(table.lines().count(), 6);
    }

    #[test]
    fn banner_is_full_width() {
        let text = banner("NEW ROUND");
        assert_eq!(text.len(), 80);
        assert!(text.contains(" NEW ROUND "));
    }
}
