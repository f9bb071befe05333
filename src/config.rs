//! Loading game configuration (levels, selection bias, win/loss rules) from TOML.
//!
//! See `GameSettings` for the expected schema under the `[game]` table.

use serde::Deserialize;
use tracing::{error, info, warn};

/// Top-level TOML document: `[game]` table with the settings below.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct GameConfig {
  #[serde(default)]
  pub game: GameSettings,
}

/// Process-wide game settings, loaded once at startup and read-only after.
/// Every field has a default so a partial TOML file is fine.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameSettings {
  /// Allowed difficulty levels (each bounds the max product a*b).
  pub levels: Vec<u32>,
  /// Factor range 1..=N for every level except the full-range level 1000.
  pub default_max_multiplier: u32,
  /// Factors intentionally shown less often (e.g. 1, 2, 10).
  pub low_probability_factors: Vec<u32>,
  /// Chance in percent that a question touching a low-probability factor
  /// is drawn anyway. Clamped to 0..=100 on load; kept wide so an
  /// out-of-range value never fails parsing of the whole file.
  pub low_factor_chance_percent: u32,
  /// Streak length that wins the game.
  pub required_correct_answers: u32,
  /// Lives at game start; 0 means unlimited.
  pub initial_attempts: u32,
  /// Perfect-streak length that awards a bonus life; 0 disables bonuses.
  pub bonus_attempts_threshold: u32,
}

impl Default for GameSettings {
  fn default() -> Self {
    Self {
      levels: vec![20, 50, 100, 1000],
      default_max_multiplier: 10,
      low_probability_factors: vec![1, 2, 10],
      low_factor_chance_percent: 10,
      required_correct_answers: 10,
      initial_attempts: 3,
      bonus_attempts_threshold: 5,
    }
  }
}

impl GameSettings {
  pub fn level_allowed(&self, level: u32) -> bool {
    self.levels.contains(&level)
  }

  /// Clamp/normalize values that would break selection.
  fn sanitize(mut self) -> Self {
    if self.low_factor_chance_percent > 100 {
      warn!(target: "game", value = self.low_factor_chance_percent, "low_factor_chance_percent > 100; clamping");
      self.low_factor_chance_percent = 100;
    }
    if self.default_max_multiplier == 0 {
      warn!(target: "game", "default_max_multiplier = 0; using 10");
      self.default_max_multiplier = 10;
    }
    self.levels.sort_unstable();
    self.levels.dedup();
    self
  }
}

/// Attempt to load `GameSettings` from GAME_CONFIG_PATH. On any parsing/IO
/// error, falls back to defaults (and logs why).
pub fn load_settings_from_env() -> GameSettings {
  let Some(path) = std::env::var("GAME_CONFIG_PATH").ok() else {
    return GameSettings::default().sanitize();
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<GameConfig>(&s) {
      Ok(cfg) => {
        info!(target: "mathdrill_backend", %path, "Loaded game config (TOML)");
        cfg.game.sanitize()
      }
      Err(e) => {
        error!(target: "mathdrill_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
        GameSettings::default().sanitize()
      }
    },
    Err(e) => {
      error!(target: "mathdrill_backend", %path, error = %e, "Failed to read TOML config file; using defaults");
      GameSettings::default().sanitize()
    }
  }
}
