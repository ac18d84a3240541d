use std::collections::VecDeque;

use crate::math::color::PALETTE;
use crate::math::scale::LinearScale;
use crate::prelude::{VisConfig, VisResult};
use crate::records::{Electrode, Row};
use crate::scene::path::basis_path;
use crate::scene::{Ease, ElementId, Scene, Tag};
use crate::shaping::fields::parse_float;

/// Duration of one slide step of the header animation.
pub const FRAME_MS: u64 = 200;

#[derive(Debug, Clone)]
struct Channel {
    electrode: Electrode,
    samples: VecDeque<f64>,
    path: ElementId,
}

/// Endless scrolling of the four raw channels on the header surface.
#[derive(Debug, Clone)]
pub struct ChannelLoop {
    scene: Scene,
    channels: Vec<Channel>,
    x: LinearScale,
    y: LinearScale,
    carry_ms: u64,
    frames: u64,
}

fn stroke_for(electrode: Electrode) -> &'static str {
    match electrode {
        Electrode::Tp9 => PALETTE[0],
        Electrode::Af7 => PALETTE[1],
        Electrode::Af8 => PALETTE[9],
        Electrode::Tp10 => PALETTE[10],
    }
}

impl ChannelLoop {
    /// Reads `RAW_<electrode>` for every electrode from the generated rows.
    pub fn new(config: &VisConfig, rows: &[Row]) -> VisResult<Self> {
        let (width, height) = (config.animation_width, config.animation_height);
        let mut scene = Scene::new(width, height);
        let root = scene.root();
        let defs = scene.append(root, Tag::Defs).id();
        let clip = scene.append(defs, Tag::ClipPath).attr("id", "clip").id();
        scene
            .append(clip, Tag::Rect)
            .attr("width", width)
            .attr("height", height);

        let x = LinearScale::new((0.0, 200.0), (0.0, width));
        let y = LinearScale::new((-65.0, 60.0), (height, 0.0));
        let mut channels = Vec::with_capacity(Electrode::ALL.len());
        for electrode in Electrode::ALL {
            let column = electrode.raw_column();
            let samples = rows
                .iter()
                .enumerate()
                .map(|(index, row)| parse_float(row, &column, index))
                .collect::<VisResult<VecDeque<f64>>>()?;
            let group = scene
                .append(root, Tag::Group)
                .attr("clip-path", "url(#clip)")
                .id();
            let path = scene
                .append(group, Tag::Path)
                .class("animated")
                .attr("fill", "none")
                .attr("stroke", stroke_for(electrode))
                .attr("opacity", 0.0)
                .id();
            channels.push(Channel {
                electrode,
                samples,
                path,
            });
        }

        let mut animation = Self {
            scene,
            channels,
            x,
            y,
            carry_ms: 0,
            frames: 0,
        };
        for channel in 0..animation.channels.len() {
            animation.redraw(channel);
        }
        Ok(animation)
    }

    fn redraw(&mut self, channel: usize) {
        let (x, y) = (self.x, self.y);
        let points: Vec<(f64, f64)> = self.channels[channel]
            .samples
            .iter()
            .enumerate()
            .map(|(i, v)| (x.scale(i as f64), y.scale(*v)))
            .collect();
        let path = self.channels[channel].path;
        self.scene.set_attr(path, "d", basis_path(&points));
    }

    /// Rotates each channel by one sample, redraws it at rest and starts
    /// the next slide to the left.
    pub fn tick(&mut self) {
        self.step(1);
    }

    /// Rotates by `count` samples at once; only the final slide is animated.
    fn step(&mut self, count: u64) {
        let shift = self.x.scale(-5.0);
        for channel in 0..self.channels.len() {
            let samples = &mut self.channels[channel].samples;
            if !samples.is_empty() {
                let by = count % samples.len() as u64;
                samples.rotate_left(by as usize);
            }
            self.redraw(channel);
            let path = self.channels[channel].path;
            self.scene.set_attr(path, "opacity", 1.0);
            self.scene.set_attr(path, "transform", "translate(0,0)");
            self.scene
                .transition(&[path], FRAME_MS)
                .ease(Ease::Linear)
                .attr("transform", format!("translate({},0)", shift));
        }
        self.frames = self.frames.saturating_add(count);
    }

    /// Feeds wall time; returns how many frames completed.
    pub fn advance(&mut self, elapsed_ms: u64) -> u64 {
        let total = self.carry_ms.saturating_add(elapsed_ms);
        let ticks = total / FRAME_MS;
        self.carry_ms = total % FRAME_MS;
        if ticks == 0 {
            self.scene.advance(elapsed_ms);
            return 0;
        }
        // every slide before the last one has already ended
        self.scene.settle();
        self.step(ticks);
        self.scene.advance(self.carry_ms);
        ticks
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn channel_head(&self, electrode: Electrode) -> Option<f64> {
        self.channels
            .iter()
            .find(|c| c.electrode == electrode)
            .and_then(|c| c.samples.front().copied())
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn to_svg(&self) -> String {
        self.scene.to_svg()
    }
}
