use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dialoguer::Input;

use pusoy_cli::config::GameConfig;
use pusoy_cli::human::{HumanPolicy, TerminalPrompter};
use pusoy_cli::logging::init_logging;
use pusoy_cli::render::{TerminalEvents, banner};
use pusoy_cli::session::{build_table, run_session};
use pusoy_core::AppInfo;

/// Pusoy dos against greedy computer opponents.
#[derive(Debug, Parser)]
#[command(name = "pusoy", author, version, about = "Pusoy dos in the terminal")]
struct Cli {
    /// Path to a YAML configuration file; built-in defaults otherwise.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the base deal seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the score that ends the game.
    #[arg(long, value_name = "POINTS")]
    target_score: Option<u32>,

    /// Replace the human seat with a computer player.
    #[arg(long)]
    autoplay: bool,

    /// Append one JSON line per finished set to this file.
    #[arg(long, value_name = "FILE")]
    results: Option<PathBuf>,

    /// Print every hand at the start of each round.
    #[arg(long)]
    show_hands: bool,

    /// Exit after validating the configuration (no game is played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    if let Some(target) = cli.target_score {
        config.target_score = target;
    }

    if let Some(results) = cli.results {
        config.results = Some(results);
    }

    if cli.autoplay {
        config.make_autoplay();
    }

    config.validate()?;

    let player_count = config.players.len();
    println!(
        "{} v{} \"{}\": {player_count} players, {} human, seed {}, playing to {}",
        AppInfo::name(),
        AppInfo::version(),
        AppInfo::codename(),
        config.human_count(),
        config.seed,
        config.target_score
    );

    if cli.validate_only {
        println!("Validation-only mode: game skipped.");
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging)?;
    let mut table = build_table(&config, |_| {
        Box::new(HumanPolicy::new(TerminalPrompter))
    })?;

    let stdout = std::io::stdout();
    let mut events = TerminalEvents::new(stdout.lock(), cli.show_hands);
    if config.human_count() > 0 {
        events = events.with_pause(|| {
            let _ = Input::<String>::new()
                .with_prompt("<Press Enter>")
                .allow_empty(true)
                .report(false)
                .interact_text();
        });
    }

    let outcome = run_session(&mut table, &mut events, config.results.as_deref())
        .context("playing game")?;
    drop(events);

    println!("{}", banner("GAME OVER"));
    println!("WINNER: {} after {} sets", outcome.winner, outcome.sets_played);
    for (name, score) in &outcome.scores {
        println!("  {name:<20}{score:>4}");
    }
    if let Some(path) = outcome.results_path.as_ref() {
        println!("Set results: {}", path.display());
    }

    Ok(())
}
