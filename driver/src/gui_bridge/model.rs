use eegviscore::records::{Electrode, Model};
use eegviscore::telemetry::MetricsSnapshot;
use eegviscore::{ScrollVis, SectionState};
use serde::Serialize;

/// What `GET /state` reports about the shared scene.
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub last_section: Option<usize>,
    pub state: Option<SectionState>,
    pub section_count: usize,
    pub model: Option<Model>,
    pub electrode: Option<Electrode>,
    pub pending_transitions: usize,
    pub metrics: MetricsSnapshot,
}

impl ViewState {
    pub fn capture(vis: &ScrollVis) -> Self {
        Self {
            last_section: vis.last_section(),
            state: vis.current_state(),
            section_count: vis.section_count(),
            model: vis.selected_model(),
            electrode: vis.electrode(),
            pending_transitions: vis
                .context()
                .map_or(0, |context| context.scene.pending_transitions()),
            metrics: vis.metrics(),
        }
    }
}
