//! Plain-text dial drawing.

use wl_core::scoring::ZoneBand;
use wl_core::{Position, RoundScore, ScoreTier, SpectrumPair};

/// Cells in the dial track.
pub const DIAL_WIDTH: usize = 41;

/// Glyph for the guess marker.
pub const GUESS: char = 'o';

/// Glyph for the target marker.
pub const TARGET: char = 'X';

/// Track cell a position falls in.
fn cell(position: Position, width: usize) -> usize {
    let last = width.saturating_sub(1);
    ((position.value() * last as f64).round() as usize).min(last)
}

/// `Hot |----o-----X----| Cold`. Later markers overwrite earlier ones.
pub fn dial(pair: &SpectrumPair, markers: &[(Position, char)], width: usize) -> String {
    let mut track = vec!['-'; width];
    for &(position, glyph) in markers {
        if let Some(slot) = track.get_mut(cell(position, width)) {
            *slot = glyph;
        }
    }
    let track: String = track.into_iter().collect();
    format!("{} |{track}| {}", pair.left, pair.right)
}

/// The scoring bands under the dial, each cell marked with the points it is
/// worth. Aligned to sit directly below [`dial`].
pub fn zone_strip(pair: &SpectrumPair, bands: &[ZoneBand], width: usize) -> String {
    let pad = " ".repeat(pair.left.chars().count() + 2);
    let last = width.saturating_sub(1).max(1) as f64;
    let strip: String = (0..width)
        .map(|i| {
            let at = Position::new(i as f64 / last);
            bands
                .iter()
                .find(|band| at >= band.start && at <= band.end)
                .map_or(' ', |band| tier_glyph(band.tier))
        })
        .collect();
    format!("{pad}{strip}").trim_end().to_string()
}

fn tier_glyph(tier: ScoreTier) -> char {
    match tier {
        ScoreTier::Bullseye => '5',
        ScoreTier::Close => '3',
        ScoreTier::Near => '1',
        ScoreTier::Miss => ' ',
    }
}

/// The floating "+N" popup text.
pub fn popup(score: &RoundScore) -> String {
    match score.tier {
        ScoreTier::Miss => "+0 Miss".to_string(),
        tier => format!("+{} {tier}!", score.points),
    }
}

/// The "N% off" callout shown once the reveal settles.
pub fn distance_callout(score: &RoundScore) -> String {
    format!("{:.1}% off", score.distance_percent())
}
