//! Core rules for Wavelength, a cooperative guessing party game.
//!
//! One player, the psychic, sees a hidden target on a spectrum between two
//! opposing labels and gives a clue; the others place a guess on the same
//! spectrum. The closer the guess, the more points the psychic banks. Every
//! player is the psychic once.
//!
//! The crate holds the round state machine, scoring, the reveal animation
//! timing, and dataset loading. It does no rendering and no I/O beyond
//! reading a dataset file.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod reveal;
pub mod scoring;
pub mod spectrum;
pub mod tick;

pub use catalog::{ALL_CATEGORY, Catalog, Category};
pub use config::GameConfig;
pub use engine::{Action, ActionReport, GameSession, Outcome, Rejection, RoundEngine, RoundState};
pub use error::{WlError, WlResult};
pub use reveal::{RevealFrame, RevealSequencer, ScorePopup};
pub use scoring::{Medal, RoundScore, ScoreTier, ScoringZones, score_round};
pub use spectrum::{Position, SpectrumPair};
pub use tick::{InputQueue, TickReport};
