use log::{debug, warn};
use serde::Serialize;

use crate::sections::{SectionState, SECTIONS};

/// Receives one state transition per replayed section.
pub trait SectionHandler {
    fn enter(&mut self, state: SectionState, index: usize);
}

/// Result of one `activate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activation {
    pub target: usize,
    pub replayed: Vec<usize>,
    pub clamped: bool,
}

/// Tracks the last activated section and replays every section crossed
/// on the way to a new one.
#[derive(Debug, Clone)]
pub struct SectionMachine {
    sections: Vec<SectionState>,
    last: Option<usize>,
}

impl Default for SectionMachine {
    fn default() -> Self {
        Self::new(SECTIONS.to_vec())
    }
}

impl SectionMachine {
    pub fn new(sections: Vec<SectionState>) -> Self {
        Self {
            sections,
            last: None,
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn last(&self) -> Option<usize> {
        self.last
    }

    pub fn state(&self, index: usize) -> Option<SectionState> {
        self.sections.get(index).copied()
    }

    pub fn current(&self) -> Option<SectionState> {
        self.last.and_then(|index| self.state(index))
    }

    /// Sections to replay, in order, when moving from the last index to `target`.
    pub fn replay_path(&self, target: usize) -> Vec<usize> {
        match self.last {
            None => (0..=target).collect(),
            Some(last) if target > last => (last + 1..=target).collect(),
            Some(last) if target < last => (target..last).rev().collect(),
            Some(_) => Vec::new(),
        }
    }

    /// Moves to `target`, invoking `handler` for every section crossed.
    /// Indices past the end are clamped to the last section.
    pub fn activate<H: SectionHandler>(&mut self, target: usize, handler: &mut H) -> Activation {
        if self.sections.is_empty() {
            warn!(target: "scrollvis::sections", "activate({}) with no sections", target);
            return Activation {
                target,
                replayed: Vec::new(),
                clamped: false,
            };
        }
        let last_index = self.sections.len() - 1;
        let clamped = target > last_index;
        let target = if clamped {
            warn!(
                target: "scrollvis::sections",
                "section {} out of range, clamping to {}",
                target,
                last_index
            );
            last_index
        } else {
            target
        };

        let replayed = self.replay_path(target);
        for &index in &replayed {
            let state = self.sections[index];
            debug!(target: "scrollvis::sections", "enter {} ({})", index, state);
            handler.enter(state, index);
        }
        self.last = Some(target);
        Activation {
            target,
            replayed,
            clamped,
        }
    }
}
