use crate::game::player::Player;
use crate::game::rules::PlayError;
use crate::game::state::GameState;
use crate::model::card::Card;
use crate::model::combo::Combo;
use crate::model::deck::{DECK_SIZE, Deck};
use crate::model::score::ScoreBoard;
use crate::model::suit::SuitOrder;
use std::fmt;
use tracing::{debug, info};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const DEFAULT_SEED: u64 = 10_000;
pub const DEFAULT_TARGET_SCORE: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    PlayerCount(usize),
    ZeroTarget,
    Play { seat: usize, source: PlayError },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::PlayerCount(count) => write!(
                f,
                "table needs {MIN_PLAYERS} to {MAX_PLAYERS} players, got {count}"
            ),
            TableError::ZeroTarget => write!(f, "target score must be positive"),
            TableError::Play { seat, source } => write!(f, "seat {seat}: {source}"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Play { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Hooks for whoever is watching the table. Every method defaults to a no-op.
pub trait TableEvents {
    fn set_started(&mut self, _set_index: u32, _players: &[Player]) {}
    fn round_started(&mut self, _leader: usize, _players: &[Player]) {}
    fn combo_played(&mut self, _seat: usize, _combo: &Combo, _state: &GameState) {}
    fn passed(&mut self, _seat: usize, _state: &GameState) {}
    /// Called after every turn of an interactive player.
    fn turn_finished(&mut self, _seat: usize, _state: &GameState) {}
    fn round_won(&mut self, _leader: usize, _players: &[Player]) {}
    fn set_finished(&mut self, _summary: &SetSummary, _players: &[Player]) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct QuietEvents;

impl TableEvents for QuietEvents {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Everyone else passed; `leader` leads the next round.
    Won { leader: usize },
    /// `seat` emptied their hand and scored `points`.
    PlayerOut {
        seat: usize,
        points: u32,
        final_combo: Combo,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSummary {
    pub set_index: u32,
    pub seed: u64,
    pub winner: usize,
    pub points: u32,
    pub final_combo: Combo,
    pub rounds: u32,
    pub scores: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub winner: usize,
    pub sets: Vec<SetSummary>,
    pub scores: Vec<u32>,
}

#[derive(Debug)]
pub struct Table {
    players: Vec<Player>,
    state: GameState,
    scores: ScoreBoard,
    deck: Deck,
    suits: SuitOrder,
    seed: u64,
    target_score: u32,
    sets_played: u32,
}

impl Table {
    pub fn new(players: Vec<Player>, suits: SuitOrder) -> Result<Self, TableError> {
        Self::with_settings(players, suits, DEFAULT_SEED, DEFAULT_TARGET_SCORE)
    }

    pub fn with_settings(
        players: Vec<Player>,
        suits: SuitOrder,
        seed: u64,
        target_score: u32,
    ) -> Result<Self, TableError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(TableError::PlayerCount(players.len()));
        }
        if target_score == 0 {
            return Err(TableError::ZeroTarget);
        }
        let scores = ScoreBoard::new(players.len());
        Ok(Self {
            players,
            state: GameState::new(suits),
            scores,
            deck: Deck::empty(),
            suits,
            seed,
            target_score,
            sets_played: 0,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_mut(&mut self, seat: usize) -> Option<&mut Player> {
        self.players.get_mut(seat)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn suit_order(&self) -> &SuitOrder {
        &self.suits
    }

    pub fn sets_played(&self) -> u32 {
        self.sets_played
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    /// Seed used to shuffle the deck of the next set.
    pub fn set_seed(&self) -> u64 {
        self.seed.wrapping_mul(1 + u64::from(self.sets_played))
    }

    pub fn cards_per_player(&self) -> usize {
        DECK_SIZE / self.players.len()
    }

    pub fn deal(&mut self) {
        self.deck.reset();
        self.deck.fill_standard();
        self.deck.shuffle_with_seed(self.set_seed());
        let per_player = self.cards_per_player();
        for _ in 0..per_player {
            for player in self.players.iter_mut() {
                if let Some(card) = self.deck.pop_top() {
                    player.deal_card(card);
                }
            }
        }
        for player in self.players.iter_mut() {
            player.hand_mut().sort(&self.suits);
        }
        debug!(
            seed = self.set_seed(),
            per_player,
            undealt = self.deck.len(),
            "dealt hands"
        );
    }

    /// Makes the holder of the 3 of clubs the leader of an opening round.
    /// With fewer than four players nobody may hold it; seat 0 then leads freely.
    pub fn find_starting_card(&mut self) -> Option<usize> {
        let holder = self
            .players
            .iter()
            .position(|player| player.has_card(Card::THREE_OF_CLUBS));
        match holder {
            Some(seat) => {
                self.state.lead_player = seat;
                self.state.opening = true;
            }
            None => {
                self.state.lead_player = 0;
                self.state.opening = false;
            }
        }
        holder
    }

    fn cards_left(&self) -> Vec<usize> {
        self.players.iter().map(Player::cards_remaining).collect()
    }

    fn next_seat(&self, seat: usize) -> usize {
        (seat + 1) % self.players.len()
    }

    pub fn play_round(&mut self, events: &mut dyn TableEvents) -> Result<RoundOutcome, TableError> {
        self.state.clear_table();
        let mut seat = self.state.lead_player;
        info!(leader = self.players[seat].name(), "round started");
        events.round_started(seat, &self.players);

        loop {
            let cards_left = self.cards_left();
            if seat == self.state.lead_player {
                let combo = self.players[seat]
                    .build_lead_combo(seat, &self.state, &self.suits, &cards_left)
                    .map_err(|source| TableError::Play { seat, source })?;
                debug!(player = self.players[seat].name(), %combo, "lead");
                self.state.commit(combo);
                events.combo_played(seat, &self.state.current_combo, &self.state);
            } else {
                let follow = self.players[seat]
                    .try_build_follow_combo(seat, &self.state, &self.suits, &cards_left)
                    .map_err(|source| TableError::Play { seat, source })?;
                match follow {
                    Some(combo) => {
                        debug!(player = self.players[seat].name(), %combo, "follow");
                        self.state.commit(combo);
                        self.state.lead_player = seat;
                        events.combo_played(seat, &self.state.current_combo, &self.state);
                    }
                    None => {
                        debug!(player = self.players[seat].name(), "pass");
                        events.passed(seat, &self.state);
                    }
                }
            }
            if self.players[seat].is_interactive() {
                events.turn_finished(seat, &self.state);
            }

            if self.players[seat].cards_remaining() == 0 {
                let final_combo = self.state.current_combo.clone();
                let points = self.scores.record_finish(seat, &final_combo);
                info!(
                    player = self.players[seat].name(),
                    points,
                    kind = %final_combo.kind(),
                    "player went out"
                );
                return Ok(RoundOutcome::PlayerOut {
                    seat,
                    points,
                    final_combo,
                });
            }

            seat = self.next_seat(seat);
            if seat == self.state.lead_player {
                break;
            }
        }

        let leader = self.state.lead_player;
        info!(leader = self.players[leader].name(), "round won");
        events.round_won(leader, &self.players);
        Ok(RoundOutcome::Won { leader })
    }

    pub fn play_set(&mut self, events: &mut dyn TableEvents) -> Result<SetSummary, TableError> {
        let seed = self.set_seed();
        self.state.reset();
        for player in self.players.iter_mut() {
            player.reset();
        }
        self.deal();
        self.find_starting_card();
        info!(set = self.sets_played + 1, seed, "set started");
        events.set_started(self.sets_played, &self.players);

        let mut rounds = 0;
        let (winner, points, final_combo) = loop {
            rounds += 1;
            match self.play_round(events)? {
                RoundOutcome::Won { .. } => continue,
                RoundOutcome::PlayerOut {
                    seat,
                    points,
                    final_combo,
                } => break (seat, points, final_combo),
            }
        };

        let summary = SetSummary {
            set_index: self.sets_played,
            seed,
            winner,
            points,
            final_combo,
            rounds,
            scores: self.scores.standings().to_vec(),
        };
        self.sets_played += 1;
        for player in self.players.iter_mut() {
            player.reset();
        }
        info!(
            set = summary.set_index + 1,
            winner = self.players[winner].name(),
            points,
            rounds,
            "set finished"
        );
        events.set_finished(&summary, &self.players);
        Ok(summary)
    }

    pub fn is_over(&self) -> bool {
        self.scores.target_reached(self.target_score)
    }

    pub fn winner(&self) -> Option<usize> {
        self.scores.winner(self.target_score)
    }

    pub fn play_game(&mut self, events: &mut dyn TableEvents) -> Result<GameSummary, TableError> {
        let mut sets = Vec::new();
        while !self.is_over() {
            sets.push(self.play_set(events)?);
        }
        // is_over guarantees a seat at or above the target
        let winner = self.winner().unwrap_or(0);
        info!(
            winner = self.players[winner].name(),
            sets = sets.len(),
            "game over"
        );
        Ok(GameSummary {
            winner,
            sets,
            scores: self.scores.standings().to_vec(),
        })
    }
}
