use crate::prelude::VisConfig;
use crate::records::{Electrode, TimeSeriesPoint};
use crate::render::build::{build_scene, ModelView, Scales, SceneData, SceneHandles, SeriesGeometry};
use crate::render::pipeline::PipelineTicker;
use crate::render::redraw::apply_model;
use crate::scene::{ElementId, Scene};

/// Placeholder shown by the ticker before its first step.
const TICKER_PLACEHOLDER: &str = "   ";

/// Rendering state owned by the controller: the scene, the data bound to
/// it and the handles the redraw paths and section transitions use.
#[derive(Debug, Clone)]
pub struct SceneContext {
    pub config: VisConfig,
    pub scene: Scene,
    pub data: SceneData,
    pub scales: Scales,
    pub geometry: SeriesGeometry,
    pub handles: SceneHandles,
    pub ticker: PipelineTicker,
}

impl SceneContext {
    pub fn new(config: VisConfig, data: SceneData) -> Self {
        let margin = config.margin;
        let mut scene = Scene::new(
            config.width + margin.left + margin.right,
            config.height + margin.top + margin.bottom,
        );
        let scales = Scales::new(&config, &data.series, &data.segments);
        let geometry = SeriesGeometry::new(&data.series, &scales);
        let handles = build_scene(&mut scene, &config, &data, &scales, &geometry);
        let ticker = PipelineTicker::new(&config, handles.group);
        ticker.show(&mut scene, TICKER_PLACEHOLDER);
        Self {
            config,
            scene,
            data,
            scales,
            geometry,
            handles,
            ticker,
        }
    }

    /// Elements under the scene group carrying every class in `selector`.
    pub fn elements(&self, selector: &str) -> Vec<ElementId> {
        self.scene.select_all(self.handles.group, selector)
    }

    pub fn fade(&mut self, selector: &str, opacity: f64, duration_ms: u64) {
        let ids = self.elements(selector);
        self.scene
            .transition(&ids, duration_ms)
            .attr("opacity", opacity);
    }

    pub fn fade_group(&mut self, opacity: f64) {
        let group = self.handles.group;
        self.scene.transition(&[group], 0).attr("opacity", opacity);
    }

    /// Swaps in another model's ROC curve, AUC and confusion matrix.
    pub fn select_model(&mut self, view: ModelView) {
        apply_model(
            &mut self.scene,
            &self.handles,
            &self.scales,
            &view,
            self.config.model_transition_ms,
        );
        self.data.model = view;
    }

    /// Drops the scene group and builds it again around a new series.
    /// The selected model carries over.
    pub fn rebuild_series(&mut self, electrode: Electrode, series: Vec<TimeSeriesPoint>) {
        self.scene.remove(self.handles.group);
        self.data.electrode = electrode;
        self.data.series = series;
        self.scales = Scales::new(&self.config, &self.data.series, &self.data.segments);
        self.geometry = SeriesGeometry::new(&self.data.series, &self.scales);
        self.handles = build_scene(
            &mut self.scene,
            &self.config,
            &self.data,
            &self.scales,
            &self.geometry,
        );
        self.ticker.set_parent(self.handles.group);
    }

    pub fn tick_pipeline(&mut self, elapsed_ms: u64) -> usize {
        self.ticker.advance(&mut self.scene, elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Model;
    use crate::render::fixtures::fixture;

    #[test]
    fn new_context_sizes_canvas_with_margins() {
        let (config, data) = fixture();
        let context = SceneContext::new(config, data);
        let root = context.scene.root();
        assert_eq!(context.scene.number(root, "width"), Some(630.0));
        assert_eq!(context.scene.number(root, "height"), Some(560.0));
        assert_eq!(context.elements("pipeline").len(), 3);
    }

    #[test]
    fn rebuild_replaces_group_and_keeps_model() {
        let (config, data) = fixture();
        let mut context = SceneContext::new(config, data);
        let mut view = context.data.model.clone();
        view.model = Model::NeuralNetwork;
        view.auc = 0.61;
        context.select_model(view);
        let old_group = context.handles.group;
        let series = vec![TimeSeriesPoint {
            index: 0,
            raw: 1.0,
            clean: 2.0,
        }];
        context.rebuild_series(Electrode::Af7, series);

        assert!(!context.scene.contains(old_group));
        assert_ne!(context.handles.group, old_group);
        assert_eq!(context.scene.children(context.scene.root()), &[context.handles.group]);
        assert_eq!(context.data.model.model, Model::NeuralNetwork);
        assert_eq!(context.scene.text(context.handles.auc_label), Some("61%"));
        let title = context.elements("chartTitle")[0];
        assert_eq!(context.scene.text(title), Some("Electrode AF7"));
    }
}
