use colored::Colorize;

use wl_core::ScoringZones;

pub fn run(guess: f64, target: f64) -> Result<(), String> {
    let guess = super::percent(guess)?;
    let target = super::percent(target)?;
    let score = ScoringZones::default().score(guess, target);

    println!(
        "  {} {} ({} points)",
        score.tier.to_string().bold(),
        crate::render::distance_callout(&score),
        score.points
    );

    Ok(())
}
