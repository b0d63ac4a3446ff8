//! Proximity scoring.
//!
//! A round is scored by the distance between the guess and the target.
//! Each zone boundary is inclusive on the closer zone: a distance of exactly
//! `0.05` still scores 5, exactly `0.15` scores 3, exactly `0.25` scores 1.

use crate::spectrum::Position;

/// Half-width of the 5-point zone.
pub const BULLSEYE_ZONE: f64 = 0.05;
/// Half-width of the 3-point zone.
pub const CLOSE_ZONE: f64 = 0.15;
/// Half-width of the 1-point zone.
pub const NEAR_ZONE: f64 = 0.25;

/// Steps per unit at which distances are compared against the zones.
pub const DISTANCE_RESOLUTION: f64 = 1e9;

/// Points for a guess inside [`BULLSEYE_ZONE`].
pub const BULLSEYE_POINTS: u32 = 5;
/// Points for a guess inside [`CLOSE_ZONE`].
pub const CLOSE_POINTS: u32 = 3;
/// Points for a guess inside [`NEAR_ZONE`].
pub const NEAR_POINTS: u32 = 1;

/// Score a round with the standard zones.
pub fn score_round(guess: Position, target: Position) -> u32 {
    ScoringZones::default().score(guess, target).points
}

/// Which scoring zone a guess landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    /// Within the innermost zone.
    Bullseye,
    /// Within the second zone.
    Close,
    /// Within the outer scoring zone.
    Near,
    /// Outside every scoring zone.
    Miss,
}

impl ScoreTier {
    /// Points awarded for this tier.
    pub fn points(self) -> u32 {
        match self {
            Self::Bullseye => BULLSEYE_POINTS,
            Self::Close => CLOSE_POINTS,
            Self::Near => NEAR_POINTS,
            Self::Miss => 0,
        }
    }

    /// Medal shown on the score popup.
    pub fn medal(self) -> Medal {
        match self {
            Self::Bullseye => Medal::Gold,
            Self::Close => Medal::Silver,
            Self::Near => Medal::Bronze,
            Self::Miss => Medal::None,
        }
    }
}

impl std::fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullseye => write!(f, "Bullseye"),
            Self::Close => write!(f, "Close"),
            Self::Near => write!(f, "Near"),
            Self::Miss => write!(f, "Miss"),
        }
    }
}

/// Popup colour class for a scored round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Medal {
    /// 5 points.
    Gold,
    /// 3 points.
    Silver,
    /// 1 point.
    Bronze,
    /// No points.
    None,
}

/// The outcome of scoring one guess against one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundScore {
    /// Zone the guess landed in.
    pub tier: ScoreTier,
    /// Points awarded.
    pub points: u32,
    /// `|guess - target|`.
    pub distance: f64,
}

impl RoundScore {
    /// Distance as a percentage of the whole dial, for the "N% off" callout.
    pub fn distance_percent(&self) -> f64 {
        self.distance * 100.0
    }
}

/// Zone half-widths used to score a round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringZones {
    /// Inclusive upper bound for a bullseye.
    pub bullseye: f64,
    /// Inclusive upper bound for a close guess.
    pub close: f64,
    /// Inclusive upper bound for a near guess.
    pub near: f64,
}

impl Default for ScoringZones {
    fn default() -> Self {
        Self {
            bullseye: BULLSEYE_ZONE,
            close: CLOSE_ZONE,
            near: NEAR_ZONE,
        }
    }
}

impl ScoringZones {
    /// Classify a raw distance.
    ///
    /// The distance is rounded to [`DISTANCE_RESOLUTION`] first, so a
    /// subtraction like `0.55 - 0.50` lands on the boundary it is meant to.
    pub fn tier_for(&self, distance: f64) -> ScoreTier {
        let distance = (distance * DISTANCE_RESOLUTION).round() / DISTANCE_RESOLUTION;
        if distance <= self.bullseye {
            ScoreTier::Bullseye
        } else if distance <= self.close {
            ScoreTier::Close
        } else if distance <= self.near {
            ScoreTier::Near
        } else {
            ScoreTier::Miss
        }
    }

    /// Score a guess against a target.
    pub fn score(&self, guess: Position, target: Position) -> RoundScore {
        let distance = guess.distance(target);
        let tier = self.tier_for(distance);
        RoundScore {
            tier,
            points: tier.points(),
            distance,
        }
    }

    /// Display bands drawn under the dial at reveal time, innermost first.
    ///
    /// Each band is centred on the target with total width `0.05`, `0.15`,
    /// `0.25` and `1.0`, clipped to the dial.
    pub fn bands(&self, target: Position) -> [ZoneBand; 4] {
        let band = |tier: ScoreTier, width: f64| {
            let half = width / 2.0;
            ZoneBand {
                tier,
                start: Position::new(target.value() - half),
                end: Position::new(target.value() + half),
            }
        };
        [
            band(ScoreTier::Bullseye, self.bullseye),
            band(ScoreTier::Close, self.close),
            band(ScoreTier::Near, self.near),
            band(ScoreTier::Miss, 1.0),
        ]
    }
}

/// One coloured band on the revealed dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBand {
    /// Tier the band is coloured for.
    pub tier: ScoreTier,
    /// Left edge.
    pub start: Position,
    /// Right edge.
    pub end: Position,
}
