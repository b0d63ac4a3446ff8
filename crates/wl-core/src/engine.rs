//! The round state machine.
//!
//! `RoundEngine` owns the authoritative [`GameSession`] and moves it through
//! category selection, the psychic's turn, the guess, and the reveal, once per
//! player. Every input returns an [`ActionReport`]; an input that does not fit
//! the current state is ignored and reported, never raised as an error.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::Catalog;
use crate::config::GameConfig;
use crate::error::{WlError, WlResult};
use crate::reveal::{RevealFrame, RevealSequencer, ScorePopup};
use crate::scoring::RoundScore;
use crate::spectrum::{Position, SpectrumPair};

/// Externally visible phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundState {
    /// Waiting for a category to be picked.
    CategorySelect,
    /// The psychic is writing a clue and placing the target.
    PsychicTurn,
    /// The other players are placing their guess.
    GuessTurn,
    /// The target is being revealed and scored.
    Reveal,
    /// Every player has been the psychic once.
    GameEnd,
}

impl std::fmt::Display for RoundState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CategorySelect => write!(f, "category select"),
            Self::PsychicTurn => write!(f, "psychic's turn"),
            Self::GuessTurn => write!(f, "guessing"),
            Self::Reveal => write!(f, "reveal"),
            Self::GameEnd => write!(f, "game over"),
        }
    }
}

/// A player input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Pick the category whose pairs are used this game.
    SelectCategory(String),
    /// Swap the current pair for a different one from the pool.
    RerollSpectrum,
    /// Lock in the psychic's clue and hidden target.
    ConfirmPsychic {
        /// The verbal clue.
        clue: String,
        /// The hidden target position.
        target: Position,
    },
    /// Lock in the group's guess.
    ConfirmGuess(Position),
    /// Bank the revealed score and move to the next round.
    AdvanceRound,
}

/// Why an input was ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The input belongs to a different phase.
    #[error("not available during {actual} (only during {expected})")]
    WrongState {
        /// Phase that accepts this input.
        expected: RoundState,
        /// Phase the game is in.
        actual: RoundState,
    },
    /// No category with that name.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    /// The clue was empty.
    #[error("the clue must not be empty")]
    EmptyClue,
    /// The pool holds no pair other than the one on display.
    #[error("no other spectrum pair in this category")]
    NoOtherPair,
    /// The game has ended; nothing more is accepted.
    #[error("the game is over")]
    GameOver,
}

/// Whether an input was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The input changed the game.
    Accepted,
    /// The input was dropped and the game is unchanged.
    Ignored(Rejection),
}

/// Result of submitting one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    /// Phase after the input was handled.
    pub state: RoundState,
    /// Whether it was applied.
    pub outcome: Outcome,
}

impl ActionReport {
    /// True if the input was applied.
    pub fn is_accepted(&self) -> bool {
        self.outcome == Outcome::Accepted
    }

    /// The rejection reason, if the input was ignored.
    pub fn rejection(&self) -> Option<&Rejection> {
        match &self.outcome {
            Outcome::Accepted => None,
            Outcome::Ignored(reason) => Some(reason),
        }
    }
}

/// One completed round, kept for the end-of-game summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundRecord {
    /// Zero-based round number.
    pub round: usize,
    /// Seat index of the psychic.
    pub psychic: usize,
    /// Pair in play.
    pub spectrum: SpectrumPair,
    /// The clue given.
    pub clue: String,
    /// The hidden target.
    pub target: Position,
    /// The group's guess.
    pub guess: Position,
    /// How the round scored.
    pub score: RoundScore,
}

/// The aggregate game state for one sitting.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    player_count: usize,
    current_player: usize,
    scores: Vec<u32>,
    current_round: usize,
    max_rounds: usize,
    selected_category: Option<String>,
    pool: Vec<SpectrumPair>,
    current_spectrum: Option<SpectrumPair>,
    current_clue: String,
    target_value: Position,
    guess_value: Position,
    last_score: Option<RoundScore>,
    history: Vec<RoundRecord>,
}

impl GameSession {
    fn new(player_count: usize, max_rounds: usize) -> Self {
        Self {
            player_count,
            current_player: 0,
            scores: vec![0; player_count],
            current_round: 0,
            max_rounds,
            selected_category: None,
            pool: Vec::new(),
            current_spectrum: None,
            current_clue: String::new(),
            target_value: Position::CENTER,
            guess_value: Position::CENTER,
            last_score: None,
            history: Vec::new(),
        }
    }

    /// Number of seats.
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Seat index of this round's psychic.
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    /// Running score per seat.
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Zero-based round counter; advances when a reveal is banked.
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// Rounds in the game.
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// The chosen category, once selected.
    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    /// Pairs available to draw from.
    pub fn pool(&self) -> &[SpectrumPair] {
        &self.pool
    }

    /// Pair on display.
    pub fn current_spectrum(&self) -> Option<&SpectrumPair> {
        self.current_spectrum.as_ref()
    }

    /// The psychic's clue for this round, empty until confirmed.
    pub fn current_clue(&self) -> &str {
        &self.current_clue
    }

    /// The psychic's target. Keeping it hidden from guessers is up to the
    /// presentation layer; see [`RoundEngine::revealed_target`].
    pub fn target_value(&self) -> Position {
        self.target_value
    }

    /// The group's guess.
    pub fn guess_value(&self) -> Position {
        self.guess_value
    }

    /// Score computed at the most recent reveal.
    pub fn last_score(&self) -> Option<&RoundScore> {
        self.last_score.as_ref()
    }

    /// Completed rounds, oldest first.
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Seats tied for the highest score.
    pub fn winners(&self) -> Vec<usize> {
        let Some(&best) = self.scores.iter().max() else {
            return Vec::new();
        };
        self.scores
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == best)
            .map(|(seat, _)| seat)
            .collect()
    }

    /// `(seat, score)` ordered by score descending, then by seat.
    pub fn standings(&self) -> Vec<(usize, u32)> {
        let mut table: Vec<_> = self.scores.iter().copied().enumerate().collect();
        table.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        table
    }

    fn reset_round_inputs(&mut self) {
        self.current_clue.clear();
        self.target_value = Position::CENTER;
        self.guess_value = Position::CENTER;
    }
}

/// Internal phase; the reveal carries its own sequencer.
#[derive(Debug, Clone)]
enum Phase {
    CategorySelect,
    PsychicTurn,
    GuessTurn,
    Reveal(RevealSequencer),
    GameEnd,
}

impl Phase {
    fn state(&self) -> RoundState {
        match self {
            Self::CategorySelect => RoundState::CategorySelect,
            Self::PsychicTurn => RoundState::PsychicTurn,
            Self::GuessTurn => RoundState::GuessTurn,
            Self::Reveal(_) => RoundState::Reveal,
            Self::GameEnd => RoundState::GameEnd,
        }
    }
}

/// Drives a [`GameSession`] through its rounds.
#[derive(Debug, Clone)]
pub struct RoundEngine {
    catalog: Catalog,
    config: GameConfig,
    session: GameSession,
    phase: Phase,
    popup: Option<ScorePopup>,
    rng: StdRng,
}

impl RoundEngine {
    /// Start a game in category selection, seeding the RNG from the config.
    pub fn new(catalog: Catalog, config: GameConfig) -> WlResult<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(catalog, config, rng)
    }

    /// Start a game with an explicit RNG.
    pub fn with_rng(catalog: Catalog, config: GameConfig, rng: StdRng) -> WlResult<Self> {
        if config.player_count < 2 {
            return Err(WlError::InvalidPlayerCount(config.player_count));
        }
        let session = GameSession::new(config.player_count, config.max_rounds());
        Ok(Self {
            catalog,
            config,
            session,
            phase: Phase::CategorySelect,
            popup: None,
            rng,
        })
    }

    /// Current phase.
    pub fn state(&self) -> RoundState {
        self.phase.state()
    }

    /// The game data.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The catalog this game draws from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The reveal sequencer, present only during the reveal.
    pub fn reveal(&self) -> Option<&RevealSequencer> {
        match &self.phase {
            Phase::Reveal(sequencer) => Some(sequencer),
            _ => None,
        }
    }

    /// The live score popup, if any.
    pub fn popup(&self) -> Option<&ScorePopup> {
        self.popup.as_ref()
    }

    /// The target, but only once it is meant to be public.
    pub fn revealed_target(&self) -> Option<Position> {
        match self.phase {
            Phase::Reveal(_) | Phase::GameEnd => Some(self.session.target_value),
            _ => None,
        }
    }

    /// Apply any input.
    pub fn apply(&mut self, action: Action) -> ActionReport {
        match action {
            Action::SelectCategory(name) => self.select_category(&name),
            Action::RerollSpectrum => self.reroll_spectrum(),
            Action::ConfirmPsychic { clue, target } => self.confirm_psychic(&clue, target),
            Action::ConfirmGuess(guess) => self.confirm_guess(guess),
            Action::AdvanceRound => self.advance_round(),
        }
    }

    /// Choose the category and draw the first pair.
    pub fn select_category(&mut self, name: &str) -> ActionReport {
        if let Err(reason) = self.require(RoundState::CategorySelect) {
            return self.ignored(reason);
        }
        let Some(pairs) = self.catalog.pairs(name) else {
            return self.ignored(Rejection::UnknownCategory(name.to_string()));
        };
        self.session.pool = pairs.to_vec();
        self.session.selected_category = Some(name.to_string());
        self.session.current_spectrum = self.draw_any();
        self.session.reset_round_inputs();
        self.transition(Phase::PsychicTurn)
    }

    /// Replace the pair on display with a different one from the pool.
    pub fn reroll_spectrum(&mut self) -> ActionReport {
        if let Err(reason) = self.require(RoundState::PsychicTurn) {
            return self.ignored(reason);
        }
        let Some(pair) = self.draw_other() else {
            return self.ignored(Rejection::NoOtherPair);
        };
        tracing::debug!(spectrum = %pair, "rerolled spectrum");
        self.session.current_spectrum = Some(pair);
        self.session.current_clue.clear();
        self.session.target_value = Position::CENTER;
        self.accepted()
    }

    /// Lock in the clue and target, handing over to the guessers.
    pub fn confirm_psychic(&mut self, clue: &str, target: Position) -> ActionReport {
        if let Err(reason) = self.require(RoundState::PsychicTurn) {
            return self.ignored(reason);
        }
        if clue.is_empty() {
            return self.ignored(Rejection::EmptyClue);
        }
        self.session.current_clue = clue.to_string();
        self.session.target_value = target;
        self.session.guess_value = Position::CENTER;
        self.transition(Phase::GuessTurn)
    }

    /// Lock in the guess and start the reveal.
    pub fn confirm_guess(&mut self, guess: Position) -> ActionReport {
        if let Err(reason) = self.require(RoundState::GuessTurn) {
            return self.ignored(reason);
        }
        self.session.guess_value = guess;
        let target = self.session.target_value;
        let score = self.config.zones.score(guess, target);
        self.session.last_score = Some(score);
        self.popup = Some(ScorePopup::new(score, self.config.popup_steps));
        let sequencer = RevealSequencer::new(guess, target, self.config.reveal_steps);
        self.transition(Phase::Reveal(sequencer))
    }

    /// Bank the round's score, rotate the psychic, and start the next round
    /// or end the game.
    pub fn advance_round(&mut self) -> ActionReport {
        if let Err(reason) = self.require(RoundState::Reveal) {
            return self.ignored(reason);
        }
        let session = &mut self.session;
        let score = self
            .config
            .zones
            .score(session.guess_value, session.target_value);
        session.scores[session.current_player] += score.points;
        session.last_score = Some(score);
        if let Some(spectrum) = session.current_spectrum.clone() {
            session.history.push(RoundRecord {
                round: session.current_round,
                psychic: session.current_player,
                spectrum,
                clue: session.current_clue.clone(),
                target: session.target_value,
                guess: session.guess_value,
                score,
            });
        }
        session.current_player = (session.current_player + 1) % session.player_count;
        session.current_round += 1;
        self.popup = None;

        if self.session.current_round >= self.session.max_rounds {
            tracing::info!(scores = ?self.session.scores, "game over");
            return self.transition(Phase::GameEnd);
        }
        self.session.current_spectrum = self.draw_any();
        self.session.reset_round_inputs();
        self.transition(Phase::PsychicTurn)
    }

    /// Advance the reveal animation one step. `None` outside the reveal.
    pub fn step_reveal(&mut self) -> Option<RevealFrame> {
        match &mut self.phase {
            Phase::Reveal(sequencer) => Some(sequencer.step()),
            _ => None,
        }
    }

    /// Jump the reveal straight to its settled frame.
    pub fn skip_reveal(&mut self) -> Option<RevealFrame> {
        match &mut self.phase {
            Phase::Reveal(sequencer) => Some(sequencer.skip_to_end()),
            _ => None,
        }
    }

    /// Advance the score popup one step, dropping it once it has faded.
    /// Returns the popup's opacity after the step.
    pub fn step_popup(&mut self) -> Option<f64> {
        let popup = self.popup.as_mut()?;
        popup.step();
        let alpha = popup.alpha();
        if popup.is_finished() {
            self.popup = None;
        }
        Some(alpha)
    }

    fn require(&self, expected: RoundState) -> Result<(), Rejection> {
        match self.state() {
            actual if actual == expected => Ok(()),
            RoundState::GameEnd => Err(Rejection::GameOver),
            actual => Err(Rejection::WrongState { expected, actual }),
        }
    }

    fn draw_any(&mut self) -> Option<SpectrumPair> {
        if self.session.pool.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..self.session.pool.len());
        Some(self.session.pool[index].clone())
    }

    fn draw_other(&mut self) -> Option<SpectrumPair> {
        let current = self.session.current_spectrum.as_ref();
        let candidates: Vec<&SpectrumPair> = self
            .session
            .pool
            .iter()
            .filter(|pair| Some(*pair) != current)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..candidates.len());
        Some(candidates[index].clone())
    }

    fn transition(&mut self, next: Phase) -> ActionReport {
        let from = self.state();
        self.phase = next;
        tracing::debug!(
            round = self.session.current_round,
            player = self.session.current_player,
            from = %from,
            to = %self.state(),
            "round transition"
        );
        self.accepted()
    }

    fn accepted(&self) -> ActionReport {
        ActionReport {
            state: self.state(),
            outcome: Outcome::Accepted,
        }
    }

    fn ignored(&self, reason: Rejection) -> ActionReport {
        tracing::trace!(state = %self.state(), %reason, "ignored action");
        ActionReport {
            state: self.state(),
            outcome: Outcome::Ignored(reason),
        }
    }
}
