pub mod categories;
pub mod init;
pub mod play;
pub mod score;

use std::path::Path;

use wl_core::{Catalog, Position};

/// Load the dataset at `path`, or the built-in pairs when none is given.
fn load_catalog(path: Option<&Path>) -> Result<Catalog, String> {
    match path {
        Some(path) => Catalog::load(path),
        None => Catalog::builtin(),
    }
    .map_err(|e| e.to_string())
}

/// Convert a user-facing percentage (0-100) to a dial position.
fn percent(value: f64) -> Result<Position, String> {
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("'{value}' is not between 0 and 100"));
    }
    Ok(Position::from_percent(value))
}

/// Parse a percentage typed at the prompt.
fn parse_percent(text: &str) -> Result<Position, String> {
    let value: f64 = text
        .trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|_| format!("'{text}' is not a number"))?;
    percent(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_bounds() {
        assert_eq!(percent(0.0).unwrap(), Position::LEFT);
        assert_eq!(percent(100.0).unwrap(), Position::RIGHT);
        assert!(percent(100.5).is_err());
        assert!(percent(-1.0).is_err());
        assert!(percent(f64::NAN).is_err());
    }

    #[test]
    fn parse_percent_accepts_suffix() {
        assert_eq!(parse_percent("50%").unwrap(), Position::CENTER);
        assert_eq!(parse_percent(" 25 ").unwrap(), Position::new(0.25));
        assert!(parse_percent("half").is_err());
    }
}
