use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pusoy_bot::GreedyPolicy;
use pusoy_core::game::player::{ComboPolicy, Player};
use pusoy_core::game::serialization::SetRecord;
use pusoy_core::game::table::{SetSummary, Table, TableEvents};
use tracing::info;

use crate::config::{GameConfig, PlayerKind};

/// Seats the configured players. `human` supplies the policy for the human
/// seat; every other seat plays greedily.
pub fn build_table(
    config: &GameConfig,
    mut human: impl FnMut(&str) -> Box<dyn ComboPolicy>,
) -> Result<Table> {
    let suits = config.suit_order()?;
    let players = config
        .players
        .iter()
        .map(|player| {
            let policy = match player.kind {
                PlayerKind::Human => human(&player.name),
                PlayerKind::Cpu => Box::new(GreedyPolicy::new()) as Box<dyn ComboPolicy>,
            };
            Player::new(player.name.clone(), policy)
        })
        .collect();
    Table::with_settings(players, suits, config.seed, config.target_score)
        .context("seating players")
}

struct ResultsWriter {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl ResultsWriter {
    fn create(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating results directory at {}", dir.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("creating results file at {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    fn write(&mut self, summary: &SetSummary, names: &[&str]) -> Result<()> {
        let line = SetRecord::capture(summary, names).to_json_line()?;
        writeln!(self.writer, "{line}")
            .and_then(|_| self.writer.flush())
            .with_context(|| format!("writing results to {}", self.path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub winner: String,
    pub sets_played: u32,
    pub scores: Vec<(String, u32)>,
    pub results_path: Option<PathBuf>,
}

/// Plays sets until someone reaches the target, appending one JSON line per
/// set to the results file when one is configured.
pub fn run_session(
    table: &mut Table,
    events: &mut dyn TableEvents,
    results: Option<&Path>,
) -> Result<SessionOutcome> {
    let mut writer = results.map(ResultsWriter::create).transpose()?;

    while !table.is_over() {
        let summary = table.play_set(events)?;
        if let Some(writer) = writer.as_mut() {
            let names: Vec<&str> = table.players().iter().map(Player::name).collect();
            writer.write(&summary, &names)?;
        }
    }

    let winner = table
        .winner()
        .context("game ended without a player at the target score")?;
    let scores = table
        .players()
        .iter()
        .zip(table.scores().standings())
        .map(|(player, score)| (player.name().to_string(), *score))
        .collect();
    let winner = table.players()[winner].name().to_string();
    info!(%winner, sets = table.sets_played(), "session finished");

    Ok(SessionOutcome {
        winner,
        sets_played: table.sets_played(),
        scores,
        results_path: writer.map(|writer| writer.path),
    })
}

#[cfg(test)]
mod tests {
    use super::{build_table, run_session};
    use crate::config::GameConfig;
    use crate::human::{HumanPolicy, ScriptedPrompter};
    use pusoy_core::game::serialization::SetRecord;
    use pusoy_core::game::table::QuietEvents;
    use std::fs;

    fn autoplay_config(target: u32) -> GameConfig {
        let mut config = GameConfig::default();
        config.make_autoplay();
        config.target_score = target;
        config
    }

    #[test]
    fn autoplay_session_writes_a_row_per_set() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("nested").join("results.jsonl");
        let config = autoplay_config(2);
        let mut table = build_table(&config, |_| unreachable!("no human seat")).unwrap();

        let outcome = run_session(&mut table, &mut QuietEvents, Some(&results)).unwrap();

        let text = fs::read_to_string(&results).unwrap();
        let rows: Vec<SetRecord> = text
            .lines()
            .map(|line| SetRecord::from_json(line).unwrap())
            .collect();
        assert_eq!(rows.len() as u32, outcome.sets_played);
        assert_eq!(rows.last().unwrap().set, outcome.sets_played);
        let winner_score = outcome
            .scores
            .iter()
            .find(|(name, _)| *name == outcome.winner)
            .map(|(_, score)| *score)
            .unwrap();
        assert!(winner_score >= 2);
    }

    #[test]
    fn human_seat_uses_supplied_policy() {
        let config = GameConfig::default();
        let mut asked = Vec::new();
        let table = build_table(&config, |name| {
            asked.push(name.to_string());
            Box::new(HumanPolicy::new(ScriptedPrompter::new([])))
        })
        .unwrap();
        assert_eq!(asked, vec!["player1".to_string()]);
        assert!(table.players()[0].is_interactive());
        assert!(!table.players()[1].is_interactive());
    }

    #[test]
    fn human_without_answers_aborts_the_session() {
        let config = GameConfig::default();
        let mut table =
            build_table(&config, |_| Box::new(HumanPolicy::new(ScriptedPrompter::new([]))))
                .unwrap();
        let err = run_session(&mut table, &mut QuietEvents, None).unwrap_err();
        assert!(format!("{err:#}").contains("no decision"));
    }
}
