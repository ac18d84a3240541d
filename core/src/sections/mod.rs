//! Scroll sections and the states they put the scene in.

pub mod machine;
pub mod transitions;

use serde::Serialize;
use std::fmt;

pub use machine::{Activation, SectionHandler, SectionMachine};

/// Visualization state shown while a narrative section is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionState {
    Hidden,
    Pipeline,
    RawSeries,
    CleanSeries,
    SegmentBounds,
    SegmentsAsPoints,
    FeatureSpace,
    AllSegmentsGrid,
    ClassificationOverlay,
    RocAndConfusion,
}

/// Section index to state, in scroll order.
pub const SECTIONS: [SectionState; 12] = [
    SectionState::Hidden,
    SectionState::Pipeline,
    SectionState::RawSeries,
    SectionState::CleanSeries,
    SectionState::SegmentBounds,
    SectionState::SegmentsAsPoints,
    SectionState::FeatureSpace,
    SectionState::AllSegmentsGrid,
    SectionState::ClassificationOverlay,
    SectionState::RocAndConfusion,
    SectionState::Hidden,
    SectionState::Hidden,
];

impl SectionState {
    pub fn name(&self) -> &'static str {
        match self {
            SectionState::Hidden => "hidden",
            SectionState::Pipeline => "pipeline",
            SectionState::RawSeries => "raw-series",
            SectionState::CleanSeries => "clean-series",
            SectionState::SegmentBounds => "segment-bounds",
            SectionState::SegmentsAsPoints => "segments-as-points",
            SectionState::FeatureSpace => "feature-space",
            SectionState::AllSegmentsGrid => "all-segments-grid",
            SectionState::ClassificationOverlay => "classification-overlay",
            SectionState::RocAndConfusion => "roc-and-confusion",
        }
    }
}

impl fmt::Display for SectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
