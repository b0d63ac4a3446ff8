//! Reveal-phase animation timing.
//!
//! The reveal slides a marker from the guess to the true target over a fixed
//! number of discrete steps. Nothing here knows about wall-clock time; the
//! presentation layer decides how fast to call [`RevealSequencer::step`].

use crate::scoring::RoundScore;
use crate::spectrum::Position;

/// Default number of steps for the guess-to-target slide.
pub const REVEAL_STEPS: u32 = 60;

/// Default lifetime of the score popup, in steps.
pub const POPUP_STEPS: u32 = 90;

/// What the presentation layer should draw for one reveal step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFrame {
    /// Steps taken so far.
    pub progress: u32,
    /// Where the marker is.
    pub position: Position,
    /// Once true, the marker is frozen on the target and the distance
    /// callout may be shown.
    pub settled: bool,
}

/// Interpolates the reveal marker from guess to target.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealSequencer {
    guess: Position,
    target: Position,
    progress: u32,
    total: u32,
    settled: bool,
}

impl RevealSequencer {
    /// Start a reveal at progress 0. A `total` of 0 is treated as 1.
    pub fn new(guess: Position, target: Position, total: u32) -> Self {
        Self {
            guess,
            target,
            progress: 0,
            total: total.max(1),
            settled: false,
        }
    }

    /// Advance one step and report the frame to draw.
    ///
    /// While `progress < total` this increments progress and returns the
    /// interpolated position. Once progress has reached `total`, every call
    /// returns the target with `settled = true`.
    pub fn step(&mut self) -> RevealFrame {
        if self.progress < self.total {
            self.progress += 1;
        } else {
            self.settled = true;
        }
        self.frame()
    }

    /// The current frame without advancing.
    pub fn frame(&self) -> RevealFrame {
        RevealFrame {
            progress: self.progress,
            position: self.position_at(self.progress),
            settled: self.settled,
        }
    }

    /// Marker position at a given progress. Pure: same inputs, same output.
    pub fn position_at(&self, progress: u32) -> Position {
        if progress >= self.total {
            return self.target;
        }
        let t = f64::from(progress) / f64::from(self.total);
        self.guess.lerp(self.target, t)
    }

    /// Jump straight to the settled frame.
    pub fn skip_to_end(&mut self) -> RevealFrame {
        self.progress = self.total;
        self.settled = true;
        self.frame()
    }

    /// Steps taken so far.
    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Total steps in the slide.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Fraction of the slide completed, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        f64::from(self.progress) / f64::from(self.total)
    }

    /// Whether the distance callout may be shown.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// The guess the slide started from.
    pub fn guess(&self) -> Position {
        self.guess
    }

    /// The target the slide ends on.
    pub fn target(&self) -> Position {
        self.target
    }

    /// Settled distance between guess and target.
    pub fn distance(&self) -> f64 {
        self.guess.distance(self.target)
    }
}

/// The "+N" popup that floats up and fades out after a guess is locked in.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorePopup {
    score: RoundScore,
    frame: u32,
    duration: u32,
}

impl ScorePopup {
    /// Create a popup for a scored round. A `duration` below 2 is raised to 2.
    pub fn new(score: RoundScore, duration: u32) -> Self {
        Self {
            score,
            frame: 0,
            duration: duration.max(2),
        }
    }

    /// The score being shown.
    pub fn score(&self) -> &RoundScore {
        &self.score
    }

    /// Advance one step.
    pub fn step(&mut self) {
        if !self.is_finished() {
            self.frame += 1;
        }
    }

    /// Steps taken so far.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Opacity in `[0, 1]`: opaque for the first half, then a linear fade.
    pub fn alpha(&self) -> f64 {
        let half = self.duration / 2;
        if self.frame <= half {
            1.0
        } else {
            let faded = f64::from(self.frame - half) / f64::from(half);
            (1.0 - faded).max(0.0)
        }
    }

    /// Whether the popup has fully faded.
    pub fn is_finished(&self) -> bool {
        self.alpha() <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringZones;
    use proptest::prelude::*;

    fn seq(guess: f64, target: f64) -> RevealSequencer {
        RevealSequencer::new(Position::new(guess), Position::new(target), REVEAL_STEPS)
    }

    #[test]
    fn starts_on_guess() {
        let s = seq(0.2, 0.9);
        assert_eq!(s.progress(), 0);
        assert_eq!(s.frame().position, Position::new(0.2));
        assert!(!s.is_settled());
    }

    #[test]
    fn reaches_target_exactly() {
        let mut s = seq(0.1, 0.7);
        let mut last = s.frame();
        for _ in 0..REVEAL_STEPS {
            last = s.step();
        }
        assert_eq!(last.progress, REVEAL_STEPS);
        assert_eq!(last.position, Position::new(0.7));
        assert!(!last.settled);
    }

    #[test]
    fn settles_on_step_after_arrival() {
        let mut s = seq(0.1, 0.7);
        for _ in 0..REVEAL_STEPS {
            s.step();
        }
        let frame = s.step();
        assert!(frame.settled);
        assert_eq!(frame.progress, REVEAL_STEPS);
        assert_eq!(frame.position, Position::new(0.7));

        // Further steps stay frozen.
        assert_eq!(s.step(), frame);
    }

    #[test]
    fn halfway() {
        let s = seq(0.2, 0.6);
        assert!((s.position_at(30).value() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn skip_to_end() {
        let mut s = seq(0.9, 0.1);
        let frame = s.skip_to_end();
        assert!(frame.settled);
        assert_eq!(frame.position, Position::new(0.1));
        assert_eq!(s.fraction(), 1.0);
    }

    #[test]
    fn zero_total_is_one_step() {
        let mut s = RevealSequencer::new(Position::LEFT, Position::RIGHT, 0);
        assert_eq!(s.total(), 1);
        assert_eq!(s.step().position, Position::RIGHT);
        assert!(s.step().settled);
    }

    #[test]
    fn distance() {
        let s = seq(0.83, 0.8);
        assert!((s.distance() - 0.03).abs() < 1e-12);
    }

    #[test]
    fn popup_fades_in_second_half() {
        let score = ScoringZones::default().score(Position::new(0.5), Position::new(0.5));
        let mut popup = ScorePopup::new(score, POPUP_STEPS);
        for _ in 0..45 {
            popup.step();
        }
        assert_eq!(popup.alpha(), 1.0);
        assert_eq!(popup.frame(), 45);

        for _ in 0..15 {
            popup.step();
        }
        assert!((popup.alpha() - 2.0 / 3.0).abs() < 1e-9);

        for _ in 0..100 {
            popup.step();
        }
        assert!(popup.is_finished());
        assert_eq!(popup.frame(), POPUP_STEPS);
        assert_eq!(popup.score().points, 5);
    }

    proptest! {
        #[test]
        fn interpolation_is_monotonic(g in 0.0f64..=1.0, t in 0.0f64..=1.0) {
            let s = seq(g, t);
            prop_assert_eq!(s.position_at(0), Position::new(g));
            prop_assert_eq!(s.position_at(REVEAL_STEPS), Position::new(t));
            for k in 1..=REVEAL_STEPS {
                let prev = s.position_at(k - 1).value();
                let next = s.position_at(k).value();
                if t >= g {
                    prop_assert!(next >= prev);
                } else {
                    prop_assert!(next <= prev);
                }
            }
        }

        #[test]
        fn replay_is_deterministic(g in 0.0f64..=1.0, t in 0.0f64..=1.0, k in 0u32..=REVEAL_STEPS) {
            let a = seq(g, t);
            let b = seq(g, t);
            prop_assert_eq!(a.position_at(k), b.position_at(k));
        }
    }
}
