use pusoy_core::game::table::{DEFAULT_SEED, DEFAULT_TARGET_SCORE, MAX_PLAYERS, MIN_PLAYERS};
use pusoy_core::model::suit::{Suit, SuitOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_LOG_PATH: &str = "logs/pusoy.jsonl";

/// Root game configuration loaded from YAML. Every field is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_target_score")]
    pub target_score: u32,
    #[serde(default = "default_suit_order")]
    pub suit_order: Vec<Suit>,
    #[serde(default = "default_players")]
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub results: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            target_score: default_target_score(),
            suit_order: default_suit_order(),
            players: default_players(),
            logging: LoggingConfig::default(),
            results: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: GameConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.target_score == 0 {
            return Err(ValidationError::InvalidField {
                field: "target_score".to_string(),
                message: "target score must be greater than zero".to_string(),
            });
        }
        self.suit_order()?;
        self.logging.normalize();
        validate_players(&self.players)?;
        Ok(())
    }

    pub fn suit_order(&self) -> Result<SuitOrder, ValidationError> {
        SuitOrder::from_lowest(&self.suit_order).map_err(|err| ValidationError::InvalidField {
            field: "suit_order".to_string(),
            message: err.to_string(),
        })
    }

    /// Seats every human with an automated player instead.
    pub fn make_autoplay(&mut self) {
        for player in self.players.iter_mut() {
            player.kind = PlayerKind::Cpu;
        }
    }

    pub fn human_count(&self) -> usize {
        self.players
            .iter()
            .filter(|player| player.kind == PlayerKind::Human)
            .count()
    }
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_target_score() -> u32 {
    DEFAULT_TARGET_SCORE
}

fn default_suit_order() -> Vec<Suit> {
    SuitOrder::STANDARD.lowest_first().to_vec()
}

fn default_players() -> Vec<PlayerConfig> {
    (1..=MAX_PLAYERS)
        .map(|seat| PlayerConfig {
            name: format!("player{seat}"),
            kind: if seat == 1 {
                PlayerKind::Human
            } else {
                PlayerKind::Cpu
            },
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PlayerConfig {
    pub name: String,
    #[serde(default)]
    pub kind: PlayerKind,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    #[default]
    Cpu,
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            path: default_log_path(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

fn validate_players(players: &[PlayerConfig]) -> Result<(), ValidationError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(ValidationError::InvalidField {
            field: "players".to_string(),
            message: format!(
                "between {MIN_PLAYERS} and {MAX_PLAYERS} players required, got {}",
                players.len()
            ),
        });
    }

    let mut seen = HashSet::new();
    for player in players {
        if player.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "players.name".to_string(),
                message: "player name must not be empty".to_string(),
            });
        }
        if !seen.insert(player.name.as_str()) {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!("player name '{}' defined more than once", player.name),
            });
        }
    }

    let humans = players
        .iter()
        .filter(|player| player.kind == PlayerKind::Human)
        .count();
    if humans > 1 {
        return Err(ValidationError::InvalidField {
            field: "players.kind".to_string(),
            message: format!("at most one human player supported, got {humans}"),
        });
    }
    Ok(())
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BASIC_YAML: &str = r#"
seed: 123
target_score: 5
suit_order: [hearts, clubs, spades, diamonds]
players:
  - name: alice
    kind: human
  - name: bot1
    kind: cpu
  - name: bot2
logging:
  enable_structured: true
  tracing_level: ""
  path: out/log.jsonl
results: out/results.jsonl
"#;

    fn parse(yaml: &str) -> GameConfig {
        serde_yaml::from_str(yaml).expect("yaml parses")
    }

    #[test]
    fn parses_full_config() {
        let mut cfg = parse(BASIC_YAML);
        cfg.validate().expect("valid config");
        assert_eq!(cfg.seed, 123);
        assert_eq!(cfg.target_score, 5);
        assert_eq!(cfg.players.len(), 3);
        assert_eq!(cfg.players[2].kind, PlayerKind::Cpu);
        assert_eq!(cfg.logging.tracing_level, "info");
        assert_eq!(cfg.results, Some(PathBuf::from("out/results.jsonl")));
        let order = cfg.suit_order().unwrap();
        assert!(order.rank(Suit::Hearts) < order.rank(Suit::Clubs));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg = parse("{}");
        cfg.validate().expect("defaults validate");
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.seed, 10_000);
        assert_eq!(cfg.target_score, 3);
        assert_eq!(cfg.human_count(), 1);
        assert_eq!(cfg.suit_order().unwrap(), SuitOrder::STANDARD);
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut cfg = parse("players: [{name: a}, {name: a}]");
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn rejects_player_counts_outside_range() {
        let mut cfg = parse("players: [{name: a}]");
        assert!(cfg.validate().is_err());
        let mut cfg = parse(
            "players: [{name: a}, {name: b}, {name: c}, {name: d}, {name: e}]",
        );
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_two_humans() {
        let mut cfg = parse("players: [{name: a, kind: human}, {name: b, kind: human}]");
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("players.kind"));
    }

    #[test]
    fn rejects_incomplete_suit_order() {
        let mut cfg = parse("suit_order: [clubs, clubs, hearts, diamonds]");
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().starts_with("suit_order"));
    }

    #[test]
    fn rejects_zero_target() {
        let mut cfg = parse("target_score: 0");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn autoplay_replaces_humans() {
        let mut cfg = GameConfig::default();
        cfg.make_autoplay();
        assert_eq!(cfg.human_count(), 0);
    }

    #[test]
    fn from_path_reports_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "players: [{{name: solo}}]").unwrap();
        let err = GameConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert_eq!(err.path(), file.path());
    }
}
