use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use colored::{ColoredString, Colorize};
use comfy_table::{ContentArrangement, Table};

use wl_core::reveal::RevealFrame;
use wl_core::{
    ALL_CATEGORY, Action, GameConfig, InputQueue, Medal, RoundEngine, RoundScore,
    RoundState,
};

use crate::render::{self, DIAL_WIDTH, GUESS, TARGET};

/// Longest clue accepted at the prompt; extra characters are dropped.
const MAX_CLUE_CHARS: usize = 30;

/// Wall-clock pacing of the animated reveal: 60 frames per second.
const FRAME: Duration = Duration::from_micros(16_667);

const HELP: &str = "\
  categories             list the categories
  category <name|#>      choose the category for this game
  reroll                 draw a different spectrum pair
  clue <0-100> <text>    psychic: set the hidden target and give a clue
  guess <0-100>          lock in the group's guess
  next                   bank the points and pass the psychic role on
  status                 show the current round
  scores                 show the score table
  quit                   leave the game";

pub fn run(
    dataset: Option<&Path>,
    players: usize,
    seed: u64,
    category: Option<&str>,
    animate: bool,
) -> Result<(), String> {
    let catalog = super::load_catalog(dataset)?;
    let config = GameConfig::default().with_players(players).with_seed(seed);
    let engine =
        RoundEngine::new(catalog, config).map_err(|e| format!("failed to start game: {e}"))?;
    let mut session = PlaySession::new(engine);
    tracing::debug!(players, seed, animate, "starting game");

    println!("  {} Wavelength", "Starting".bold());
    println!("  Players: {players} | Seed: {seed}");
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    match category.map(str::to_string).or_else(|| session.only_category()) {
        Some(name) => println!("{}\n", session.choose_category(&name)?),
        None => println!("{}\n", session.categories_text()),
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if session.needs_reveal() {
                    session
                        .play_reveal(&mut io::stdout().lock(), animate)
                        .map_err(|e| e.to_string())?;
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.yellow());
            }
        }
    }

    Ok(())
}

/// A game driven by typed commands.
pub struct PlaySession {
    engine: RoundEngine,
    queue: InputQueue,
}

impl PlaySession {
    pub fn new(engine: RoundEngine) -> Self {
        Self {
            engine,
            queue: InputQueue::new(),
        }
    }

    /// Process one line of input and return the text to show.
    ///
    /// `Err` carries a message for input that was not applied.
    pub fn process(&mut self, input: &str) -> Result<String, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let (cmd, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        let rest = rest.trim();

        match cmd.to_lowercase().as_str() {
            "categories" => Ok(self.categories_text()),
            "category" => self.choose_category(rest),
            "reroll" => {
                self.submit(Action::RerollSpectrum)?;
                Ok(self.turn_text())
            }
            "clue" => self.do_clue(rest),
            "guess" => self.do_guess(rest),
            "next" => self.do_next(),
            "status" => Ok(self.status_text()),
            "scores" => Ok(self.scores_table()),
            "help" => Ok(HELP.to_string()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            other => Err(format!("unknown command '{other}', type 'help' for a list")),
        }
    }

    /// True while a reveal has started but not settled.
    pub fn needs_reveal(&self) -> bool {
        self.engine.reveal().is_some_and(|r| !r.is_settled())
    }

    /// Tick the engine until the reveal settles, then draw the result.
    ///
    /// With `animate`, every frame is drawn in place at 60 frames per second;
    /// otherwise only the settled dial is drawn.
    pub fn play_reveal<W: Write>(&mut self, out: &mut W, animate: bool) -> io::Result<()> {
        let Some(pair) = self.engine.session().current_spectrum().cloned() else {
            return Ok(());
        };
        let mut frame = self.engine.reveal().map(|r| r.frame());
        while let Some(current) = frame.filter(|f: &RevealFrame| !f.settled) {
            if animate {
                let dial = render::dial(&pair, &[(current.position, GUESS)], DIAL_WIDTH);
                write!(out, "\r  {dial}")?;
                out.flush()?;
                thread::sleep(FRAME);
            }
            frame = self.engine.tick(&mut self.queue).reveal;
        }
        if animate {
            writeln!(out)?;
        }

        let session = self.engine.session();
        let (guess, target) = (session.guess_value(), session.target_value());
        let markers = [(guess, GUESS), (target, TARGET)];
        let bands = self.engine.config().zones.bands(target);
        writeln!(out, "  {}", render::dial(&pair, &markers, DIAL_WIDTH))?;
        writeln!(out, "  {}", render::zone_strip(&pair, &bands, DIAL_WIDTH))?;
        if let Some(score) = session.last_score() {
            writeln!(
                out,
                "\n  {}  {}  (target {target}, guess {guess})",
                medal_colored(score),
                render::distance_callout(score),
            )?;
        }
        writeln!(out, "  Type 'next' to bank the points.\n")?;
        out.flush()
    }

    /// Select a category by name (any case) or 1-based menu number.
    pub fn choose_category(&mut self, arg: &str) -> Result<String, String> {
        if arg.is_empty() {
            return Err("usage: category <name|#>".to_string());
        }
        let name = self.resolve_category(arg).unwrap_or_else(|| arg.to_string());
        self.submit(Action::SelectCategory(name.clone()))?;
        Ok(format!("  Category: {}\n\n{}", name.bold(), self.turn_text()))
    }

    /// The category to start with when the dataset offers no choice.
    pub fn only_category(&self) -> Option<String> {
        (self.engine.catalog().len() == 1).then(|| ALL_CATEGORY.to_string())
    }

    pub fn categories_text(&self) -> String {
        let mut out = String::from("  Categories:\n");
        for (i, category) in self.engine.catalog().categories().iter().enumerate() {
            out.push_str(&format!(
                "    {}. {} ({} pairs)\n",
                i + 1,
                category.name(),
                category.pairs().len()
            ));
        }
        out.push_str("  Choose one with 'category <name|#>'.");
        out
    }

    fn resolve_category(&self, arg: &str) -> Option<String> {
        let catalog = self.engine.catalog();
        if let Ok(number) = arg.parse::<usize>() {
            return catalog
                .categories()
                .get(number.checked_sub(1)?)
                .map(|c| c.name().to_string());
        }
        catalog
            .names()
            .find(|name| name.eq_ignore_ascii_case(arg))
            .map(str::to_string)
    }

    /// Apply an input without stepping any animation; the reveal is
    /// ticked separately by [`PlaySession::play_reveal`].
    fn submit(&mut self, action: Action) -> Result<(), String> {
        match self.engine.apply(action).rejection() {
            Some(reason) => Err(reason.to_string()),
            None => Ok(()),
        }
    }

    fn do_clue(&mut self, rest: &str) -> Result<String, String> {
        let (target, clue) = rest.split_once(' ').unwrap_or((rest, ""));
        if target.is_empty() {
            return Err("usage: clue <target 0-100> <text>".to_string());
        }
        let target = super::parse_percent(target)?;
        let clue: String = clue.chars().take(MAX_CLUE_CHARS).collect();
        self.submit(Action::ConfirmPsychic { clue, target })?;
        let session = self.engine.session();
        Ok(format!(
            "  Clue: \"{}\"\n  Player {}'s target is hidden. Everyone else: 'guess <0-100>'.",
            session.current_clue().cyan(),
            session.current_player() + 1,
        ))
    }

    fn do_guess(&mut self, rest: &str) -> Result<String, String> {
        if rest.is_empty() {
            return Err("usage: guess <0-100>".to_string());
        }
        let guess = super::parse_percent(rest)?;
        self.submit(Action::ConfirmGuess(guess))?;
        Ok(format!("  Guess locked in at {guess}. Revealing..."))
    }

    fn do_next(&mut self) -> Result<String, String> {
        self.submit(Action::AdvanceRound)?;
        if self.engine.state() == RoundState::GameEnd {
            return Ok(format!(
                "  {}\n  {}\n\n{}\n\n{}",
                "Game over!".bold(),
                self.winner_line(),
                self.scores_table(),
                self.history_table()
            ));
        }
        Ok(self.turn_text())
    }

    fn turn_text(&self) -> String {
        let session = self.engine.session();
        let Some(pair) = session.current_spectrum() else {
            return String::new();
        };
        format!(
            "  Round {}/{}. Player {} is the psychic.\n  Spectrum: {}\n  {}\n  Psychic: 'clue <0-100> <text>' sets the target, 'reroll' draws another pair.",
            session.current_round() + 1,
            session.max_rounds(),
            session.current_player() + 1,
            pair.to_string().bold(),
            render::dial(pair, &[], DIAL_WIDTH),
        )
    }

    fn status_text(&self) -> String {
        let session = self.engine.session();
        let mut lines = vec![format!("  State: {}", self.engine.state())];
        if self.engine.state() != RoundState::GameEnd {
            lines.push(format!(
                "  Round: {}/{} | Psychic: Player {}",
                session.current_round() + 1,
                session.max_rounds(),
                session.current_player() + 1
            ));
        }
        if let Some(category) = session.selected_category() {
            lines.push(format!("  Category: {category}"));
        }
        if let Some(pair) = session.current_spectrum() {
            lines.push(format!("  Spectrum: {pair}"));
        }
        if !session.current_clue().is_empty() {
            lines.push(format!("  Clue: \"{}\"", session.current_clue()));
        }
        if let Some(target) = self.engine.revealed_target() {
            lines.push(format!(
                "  Target: {target} | Guess: {}",
                session.guess_value()
            ));
        }
        let scores: Vec<String> = session
            .scores()
            .iter()
            .enumerate()
            .map(|(seat, score)| format!("P{}={score}", seat + 1))
            .collect();
        lines.push(format!("  Scores: {}", scores.join(" ")));
        lines.join("\n")
    }

    fn scores_table(&self) -> String {
        let session = self.engine.session();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Player", "Score"]);
        for (seat, score) in session.standings() {
            table.add_row(vec![format!("Player {}", seat + 1), score.to_string()]);
        }
        table.to_string()
    }

    fn history_table(&self) -> String {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            "Round", "Psychic", "Spectrum", "Clue", "Target", "Guess", "Points",
        ]);
        for record in self.engine.session().history() {
            table.add_row(vec![
                (record.round + 1).to_string(),
                format!("Player {}", record.psychic + 1),
                record.spectrum.to_string(),
                record.clue.clone(),
                record.target.to_string(),
                record.guess.to_string(),
                record.score.points.to_string(),
            ]);
        }
        table.to_string()
    }

    fn winner_line(&self) -> String {
        let session = self.engine.session();
        let winners = session.winners();
        let best = winners
            .first()
            .and_then(|seat| session.scores().get(*seat))
            .copied()
            .unwrap_or(0);
        let names: Vec<String> = winners
            .iter()
            .map(|seat| format!("Player {}", seat + 1))
            .collect();
        match names.as_slice() {
            [one] => format!("Winner: {one} with {best} points"),
            many => format!("Tie between {} with {best} points", many.join(", ")),
        }
    }
}

fn medal_colored(score: &RoundScore) -> ColoredString {
    let text = render::popup(score);
    match score.tier.medal() {
        Medal::Gold => text.yellow().bold(),
        Medal::Silver => text.white().bold(),
        Medal::Bronze => text.truecolor(205, 127, 50).bold(),
        Medal::None => text.red(),
    }
}
