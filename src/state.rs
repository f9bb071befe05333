//! Application state: the game settings loaded once at startup.
//!
//! The server itself is stateless — all session state travels in the
//! request/response payload — so `AppState` only carries configuration.

use tracing::{info, instrument};

use crate::config::{load_settings_from_env, GameSettings};
use crate::pool::generate_pool;

#[derive(Clone)]
pub struct AppState {
    pub settings: GameSettings,
}

impl AppState {
    /// Build state from env: load the TOML config (or defaults) and log a
    /// startup inventory of the question pools.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::with_settings(load_settings_from_env())
    }

    pub fn with_settings(settings: GameSettings) -> Self {
        // Pool inventory per configured level.
        for &level in &settings.levels {
            let pool = generate_pool(level, settings.default_max_multiplier);
            info!(target: "game", level, pool_size = pool.len(), "Startup pool inventory");
        }
        info!(
            target: "mathdrill_backend",
            levels = settings.levels.len(),
            required_correct = settings.required_correct_answers,
            initial_attempts = settings.initial_attempts,
            bonus_threshold = settings.bonus_attempts_threshold,
            low_factor_chance = settings.low_factor_chance_percent,
            "Game settings active"
        );
        Self { settings }
    }
}
