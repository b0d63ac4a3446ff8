//! The cooperative tick loop.
//!
//! Each tick applies a bounded batch of queued inputs in arrival order and
//! then advances any running animation by exactly one step.

use std::collections::VecDeque;

use crate::engine::{Action, ActionReport, RoundEngine};
use crate::reveal::RevealFrame;

/// FIFO of pending player inputs.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<Action>,
}

impl InputQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an input.
    pub fn push(&mut self, action: Action) {
        self.pending.push_back(action);
    }

    /// Number of inputs waiting.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn pop(&mut self) -> Option<Action> {
        self.pending.pop_front()
    }
}

impl Extend<Action> for InputQueue {
    fn extend<T: IntoIterator<Item = Action>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// One report per input consumed, in order.
    pub reports: Vec<ActionReport>,
    /// The reveal frame, if the engine was in the reveal after the inputs.
    pub reveal: Option<RevealFrame>,
    /// Popup opacity after this tick's step, if a popup is live.
    pub popup_alpha: Option<f64>,
}

impl RoundEngine {
    /// Run one tick against the queue.
    pub fn tick(&mut self, queue: &mut InputQueue) -> TickReport {
        let budget = self.config().max_actions_per_tick;
        let mut reports = Vec::new();
        while reports.len() < budget {
            let Some(action) = queue.pop() else { break };
            reports.push(self.apply(action));
        }
        let reveal = self.step_reveal();
        let popup_alpha = self.step_popup();
        TickReport {
            reports,
            reveal,
            popup_alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::GameConfig;
    use crate::engine::RoundState;
    use crate::spectrum::{Position, SpectrumPair};

    fn engine(config: GameConfig) -> RoundEngine {
        let catalog = Catalog::from_pairs(vec![
            SpectrumPair::new("Hot", "Cold"),
            SpectrumPair::new("Soft", "Hard"),
        ])
        .unwrap();
        RoundEngine::new(catalog, config).unwrap()
    }

    fn to_guess_turn() -> Vec<Action> {
        vec![
            Action::SelectCategory("All".into()),
            Action::ConfirmPsychic {
                clue: "sauna".into(),
                target: Position::new(0.2),
            },
        ]
    }

    #[test]
    fn idle_tick_does_nothing() {
        let mut e = engine(GameConfig::default());
        let report = e.tick(&mut InputQueue::new());
        assert!(report.reports.is_empty());
        assert!(report.reveal.is_none());
        assert!(report.popup_alpha.is_none());
    }

    #[test]
    fn inputs_apply_in_order() {
        let mut e = engine(GameConfig::default());
        let mut queue = InputQueue::new();
        queue.extend(to_guess_turn());
        let report = e.tick(&mut queue);
        assert_eq!(report.reports.len(), 2);
        assert!(report.reports.iter().all(ActionReport::is_accepted));
        assert_eq!(e.state(), RoundState::GuessTurn);
        assert!(queue.is_empty());
    }

    #[test]
    fn batch_is_bounded() {
        let mut e = engine(GameConfig::default().with_max_actions_per_tick(1));
        let mut queue = InputQueue::new();
        queue.extend(to_guess_turn());
        e.tick(&mut queue);
        assert_eq!(e.state(), RoundState::PsychicTurn);
        assert_eq!(queue.len(), 1);
        e.tick(&mut queue);
        assert_eq!(e.state(), RoundState::GuessTurn);
    }

    #[test]
    fn out_of_order_input_is_dropped() {
        let mut e = engine(GameConfig::default());
        let mut queue = InputQueue::new();
        queue.push(Action::AdvanceRound);
        queue.push(Action::SelectCategory("All".into()));
        let report = e.tick(&mut queue);
        assert!(!report.reports[0].is_accepted());
        assert!(report.reports[1].is_accepted());
        assert_eq!(e.state(), RoundState::PsychicTurn);
    }

    #[test]
    fn reveal_steps_once_per_tick() {
        let mut e = engine(GameConfig::default().with_reveal_steps(4));
        let mut queue = InputQueue::new();
        queue.extend(to_guess_turn());
        queue.push(Action::ConfirmGuess(Position::new(0.6)));

        let first = e.tick(&mut queue);
        let frame = first.reveal.unwrap();
        assert_eq!(frame.progress, 1);
        assert_eq!(first.popup_alpha, Some(1.0));

        let mut frames = vec![frame];
        while !frames.last().unwrap().settled {
            frames.push(e.tick(&mut queue).reveal.unwrap());
        }
        let progress: Vec<_> = frames.iter().map(|f| f.progress).collect();
        assert_eq!(progress, [1, 2, 3, 4, 4]);
        assert_eq!(frames[3].position, Position::new(0.2));
        assert!(!frames[3].settled);
    }
}
