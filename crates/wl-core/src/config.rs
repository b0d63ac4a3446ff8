//! Configuration for a game session.

use crate::reveal::{POPUP_STEPS, REVEAL_STEPS};
use crate::scoring::ScoringZones;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Number of players; each one is the psychic exactly once.
    pub player_count: usize,
    /// RNG seed for reproducible spectrum picks.
    pub seed: u64,
    /// Steps in the guess-to-target reveal slide.
    pub reveal_steps: u32,
    /// Lifetime of the score popup, in steps.
    pub popup_steps: u32,
    /// Scoring zone widths.
    pub zones: ScoringZones,
    /// Most queued actions applied in a single tick.
    pub max_actions_per_tick: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            seed: 42,
            reveal_steps: REVEAL_STEPS,
            popup_steps: POPUP_STEPS,
            zones: ScoringZones::default(),
            max_actions_per_tick: 8,
        }
    }
}

impl GameConfig {
    /// Set the number of players.
    pub fn with_players(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the reveal length in steps (at least 1).
    pub fn with_reveal_steps(mut self, steps: u32) -> Self {
        self.reveal_steps = steps.max(1);
        self
    }

    /// Set the scoring zones.
    pub fn with_zones(mut self, zones: ScoringZones) -> Self {
        self.zones = zones;
        self
    }

    /// Set the per-tick action budget (at least 1).
    pub fn with_max_actions_per_tick(mut self, max: usize) -> Self {
        self.max_actions_per_tick = max.max(1);
        self
    }

    /// Rounds in a full game: one per player.
    pub fn max_rounds(&self) -> usize {
        self.player_count
    }
}
