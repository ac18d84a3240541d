use std::collections::VecDeque;

use log::debug;

use crate::math::color::PALETTE;
use crate::prelude::VisConfig;
use crate::scene::{DataJoin, ElementId, Scene, Tag};

pub const LETTER_TRANSITION_MS: u64 = 750;
const LETTER_SPACING: f64 = 32.0;
const LETTER_OFFSET: f64 = 100.0;
const BASELINE: f64 = 250.0;

/// Rotating banner of pipeline step names, one letter per keyed text element.
#[derive(Debug, Clone)]
pub struct PipelineTicker {
    steps: Vec<String>,
    names: VecDeque<String>,
    interval_ms: u64,
    elapsed_ms: u64,
    parent: ElementId,
}

impl PipelineTicker {
    pub fn new(config: &VisConfig, parent: ElementId) -> Self {
        Self {
            steps: config.pipeline_steps.clone(),
            names: config.pipeline_steps.iter().cloned().collect(),
            interval_ms: config.pipeline_interval_ms.max(1),
            elapsed_ms: 0,
            parent,
        }
    }

    pub fn set_parent(&mut self, parent: ElementId) {
        self.parent = parent;
    }

    /// Restores the full step list.
    pub fn reset(&mut self) {
        self.names = self.steps.iter().cloned().collect();
    }

    /// Stops the rotation; letters already shown stay where they are.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn is_running(&self) -> bool {
        !self.names.is_empty()
    }

    /// Step that the next tick will show.
    pub fn upcoming(&self) -> Option<&str> {
        self.names.front().map(String::as_str)
    }

    /// Reconciles the letter elements against `text`.
    pub fn show(&self, scene: &mut Scene, text: &str) {
        let letters: Vec<String> = text.chars().map(String::from).collect();
        let join = DataJoin::compute(scene, self.parent, "pipeline", &letters);
        let target_x = |i: usize| i as f64 * LETTER_SPACING + LETTER_OFFSET;

        for (i, id) in join.update {
            scene.set_attr(id, "fill", PALETTE[10]);
            scene
                .transition(&[id], LETTER_TRANSITION_MS)
                .attr("y", BASELINE)
                .attr("x", target_x(i));
        }
        for i in join.enter {
            let id = scene
                .append(self.parent, Tag::Text)
                .class("pipeline")
                .key(letters[i].as_str())
                .attr("fill", PALETTE[10])
                .attr("dy", ".35em")
                .attr("y", BASELINE)
                .attr("x", -100.0)
                .text(letters[i].as_str())
                .id();
            scene
                .transition(&[id], LETTER_TRANSITION_MS)
                .attr("x", target_x(i));
        }
        for id in join.exit {
            scene.set_attr(id, "fill", PALETTE[0]);
            scene
                .transition(&[id], LETTER_TRANSITION_MS)
                .attr("x", 900.0)
                .remove();
        }
    }

    /// Rotates to the next step name and shows it.
    pub fn step(&mut self, scene: &mut Scene) -> Option<String> {
        let name = self.names.pop_front()?;
        self.names.push_back(name.clone());
        debug!(target: "scrollvis::pipeline", "showing step {}", name);
        self.show(scene, &name);
        Some(name)
    }

    /// Feeds elapsed wall time; returns how many steps fell due.
    /// Only the last due step is drawn, earlier ones just rotate the list.
    pub fn advance(&mut self, scene: &mut Scene, elapsed_ms: u64) -> usize {
        let total = self.elapsed_ms.saturating_add(elapsed_ms);
        let due = total / self.interval_ms;
        self.elapsed_ms = total % self.interval_ms;
        if due == 0 || !self.is_running() {
            return 0;
        }
        let skipped = (due - 1) % self.names.len() as u64;
        self.names.rotate_left(skipped as usize);
        self.step(scene);
        usize::try_from(due).unwrap_or(usize::MAX)
    }
}
