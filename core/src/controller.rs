//! `ScrollVis`: the outward surface of the core.
//!
//! Data setters store raw rows, `render` shapes them and builds the scene,
//! and afterwards `activate`, `select_model` and `select_electrode` drive it.

use crate::prelude::{VisConfig, VisError, VisResult};
use crate::records::{ConfusionMatrix, Electrode, Model, RocTable, Row};
use crate::render::{ChannelLoop, ModelView, SceneContext, SceneData};
use crate::scoring::{normalize_confusion, select_auc, select_roc};
use crate::sections::{Activation, SectionHandler, SectionMachine, SectionState};
use crate::shaping::{build_confusion_matrices, build_segments, build_time_series, GridLayout};
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};

pub struct ScrollVis {
    config: VisConfig,
    roc: RocTable,
    segment_rows: Vec<Row>,
    confusion_rows: Vec<Row>,
    series_rows: Vec<Row>,
    matrices: Vec<ConfusionMatrix>,
    context: Option<SceneContext>,
    machine: SectionMachine,
    animation: Option<ChannelLoop>,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl ScrollVis {
    pub fn new(config: VisConfig) -> Self {
        Self {
            config,
            roc: RocTable::new(),
            segment_rows: Vec::new(),
            confusion_rows: Vec::new(),
            series_rows: Vec::new(),
            matrices: Vec::new(),
            context: None,
            machine: SectionMachine::default(),
            animation: None,
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn config(&self) -> &VisConfig {
        &self.config
    }

    pub fn set_roc_data(&mut self, table: RocTable) {
        self.roc = table;
    }

    pub fn set_segment_data(&mut self, rows: Vec<Row>) {
        self.segment_rows = rows;
    }

    pub fn set_confusion_matrix_data(&mut self, rows: Vec<Row>) {
        self.confusion_rows = rows;
    }

    /// Builds the header animation from rows carrying `RAW_<electrode>` columns.
    pub fn set_animation_data(&mut self, rows: &[Row]) -> VisResult<()> {
        let animation = self.track("animation", ChannelLoop::new(&self.config, rows))?;
        self.animation = Some(animation);
        Ok(())
    }

    /// Shapes every dataset and builds the scene for the configured electrode.
    /// Section tracking starts over.
    pub fn render(&mut self, rows: Vec<Row>) -> VisResult<()> {
        let result = self.build_context(rows);
        let context = self.track("render", result)?;
        self.logger.record(&format!(
            "rendered {} samples, {} segments, {} models",
            context.data.series.len(),
            context.data.segments.len(),
            self.matrices.len()
        ));
        self.context = Some(context);
        self.machine = SectionMachine::default();
        Ok(())
    }

    fn build_context(&mut self, rows: Vec<Row>) -> VisResult<SceneContext> {
        let electrode = self.config.electrode;
        let series = build_time_series(&rows, electrode)?;
        let segments = build_segments(&self.segment_rows, GridLayout::from_config(&self.config))?;
        self.matrices = build_confusion_matrices(&self.confusion_rows)?;
        let model = self.model_view(Model::LogisticRegression)?;
        self.series_rows = rows;
        let data = SceneData {
            electrode,
            series,
            segments,
            model,
        };
        Ok(SceneContext::new(self.config.clone(), data))
    }

    /// ROC curve, AUC and normalized matrix of `model` at the first resolution.
    fn model_view(&self, model: Model) -> VisResult<ModelView> {
        let resolution = self.roc.first_resolution().ok_or(VisError::IndexOutOfRange {
            axis: "resolution",
            index: 0,
        })?;
        let index = model.index();
        let matrix = self.matrices.get(index).ok_or(VisError::IndexOutOfRange {
            axis: "model",
            index,
        })?;
        Ok(ModelView {
            model,
            roc: select_roc(&self.roc, resolution, index)?,
            auc: select_auc(&self.roc, resolution, index)?,
            matrix: normalize_confusion(matrix)?,
        })
    }

    fn context_mut(&mut self) -> VisResult<&mut SceneContext> {
        self.context.as_mut().ok_or(VisError::NotRendered)
    }

    fn track<T>(&self, operation: &str, result: VisResult<T>) -> VisResult<T> {
        if let Err(error) = &result {
            self.metrics.record_error();
            self.logger.reject(operation, error);
        }
        result
    }

    /// Moves to section `index`, replaying every section in between.
    pub fn activate(&mut self, index: usize) -> VisResult<Activation> {
        let result = match self.context.as_mut() {
            Some(context) => Ok(self.machine.activate(index, context)),
            None => Err(VisError::NotRendered),
        };
        let activation = self.track("activate", result)?;
        self.metrics.record_activation(activation.replayed.len());
        self.logger.record(&format!(
            "section {} active, replayed {:?}",
            activation.target, activation.replayed
        ));
        Ok(activation)
    }

    pub fn select_model(&mut self, model: Model) -> VisResult<()> {
        let result = match self.context {
            Some(_) => self.model_view(model),
            None => Err(VisError::NotRendered),
        };
        let view = self.track("select_model", result)?;
        if let Some(context) = self.context.as_mut() {
            context.select_model(view);
        }
        self.metrics.record_redraw();
        self.logger.record(&format!("model switched to {}", model));
        Ok(())
    }

    /// Rebuilds the scene around another electrode and re-enters the raw view.
    pub fn select_electrode(&mut self, electrode: Electrode) -> VisResult<()> {
        let result = match self.context {
            Some(_) => build_time_series(&self.series_rows, electrode),
            None => Err(VisError::NotRendered),
        };
        let series = self.track("select_electrode", result)?;
        if let Some(context) = self.context.as_mut() {
            context.rebuild_series(electrode, series);
            context.enter(SectionState::RawSeries, 2);
        }
        self.metrics.record_redraw();
        self.logger.record(&format!("electrode switched to {}", electrode));
        Ok(())
    }

    /// Runs the pipeline banner once, outside its interval.
    pub fn tick_pipeline(&mut self) -> VisResult<Option<String>> {
        let context = self.context_mut()?;
        Ok(context.ticker.step(&mut context.scene))
    }

    /// Feeds wall time to the banner, the running transitions and the header animation.
    pub fn advance(&mut self, elapsed_ms: u64) -> VisResult<()> {
        let context = self.context_mut()?;
        context.tick_pipeline(elapsed_ms);
        context.scene.advance(elapsed_ms);
        if let Some(animation) = self.animation.as_mut() {
            animation.advance(elapsed_ms);
        }
        Ok(())
    }

    /// Completes every running transition.
    pub fn settle(&mut self) -> VisResult<()> {
        self.context_mut()?.scene.settle();
        Ok(())
    }

    pub fn to_svg(&self) -> VisResult<String> {
        self.context
            .as_ref()
            .map(|context| context.scene.to_svg())
            .ok_or(VisError::NotRendered)
    }

    pub fn animation_svg(&self) -> Option<String> {
        self.animation.as_ref().map(ChannelLoop::to_svg)
    }

    pub fn context(&self) -> Option<&SceneContext> {
        self.context.as_ref()
    }

    pub fn last_section(&self) -> Option<usize> {
        self.machine.last()
    }

    pub fn current_state(&self) -> Option<SectionState> {
        self.machine.current()
    }

    pub fn section_count(&self) -> usize {
        self.machine.len()
    }

    pub fn selected_model(&self) -> Option<Model> {
        self.context.as_ref().map(|context| context.data.model.model)
    }

    pub fn electrode(&self) -> Option<Electrode> {
        self.context.as_ref().map(|context| context.data.electrode)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, String)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn series_rows() -> Vec<Row> {
        (0..8)
            .map(|i| {
                let mut pairs = Vec::new();
                for e in Electrode::ALL {
                    pairs.push((e.raw_column(), format!("{}", i * 10)));
                    pairs.push((e.clean_column(), format!("{}", i * 5)));
                }
                pairs.into_iter().collect()
            })
            .collect()
    }

    fn segment_rows() -> Vec<Row> {
        (0..4)
            .map(|i| {
                row(&[
                    ("feature1", format!("{}", i)),
                    ("feature2", format!("{}", i * 2)),
                    ("label", format!("{}", i % 2)),
                    ("rf", "1".into()),
                    ("nn", "0".into()),
                    ("logreg", "1".into()),
                    ("ensemble", "1".into()),
                ])
            })
            .collect()
    }

    fn confusion_rows() -> Vec<Row> {
        [(80, 70, 10, 20), (60, 50, 30, 40), (90, 85, 5, 10), (70, 75, 15, 20)]
            .iter()
            .map(|(tp, tn, fp, fn_)| {
                row(&[
                    ("tp", tp.to_string()),
                    ("tn", tn.to_string()),
                    ("fp", fp.to_string()),
                    ("fn", fn_.to_string()),
                ])
            })
            .collect()
    }

    fn roc_table() -> RocTable {
        RocTable::from_json(
            r#"{"1": {
                "0": {"fpr": [0, 0.5, 1], "tpr": [0, 0.8, 1], "auc": 0.8},
                "1": {"fpr": [0, 1], "tpr": [0, 1], "auc": 0.5},
                "2": {"fpr": [0, 0.1, 1], "tpr": [0, 0.9, 1], "auc": 0.93},
                "3": {"fpr": [0, 1], "tpr": [0.2, 1], "auc": 0.6}
            }}"#,
        )
        .unwrap()
    }

    fn rendered() -> ScrollVis {
        let mut vis = ScrollVis::new(VisConfig::default());
        vis.set_roc_data(roc_table());
        vis.set_segment_data(segment_rows());
        vis.set_confusion_matrix_data(confusion_rows());
        vis.render(series_rows()).unwrap();
        vis
    }

    #[test]
    fn operations_before_render_are_rejected() {
        let mut vis = ScrollVis::new(VisConfig::default());
        assert!(matches!(vis.activate(1), Err(VisError::NotRendered)));
        assert!(matches!(vis.select_model(Model::RandomForest), Err(VisError::NotRendered)));
        assert!(matches!(vis.select_electrode(Electrode::Af7), Err(VisError::NotRendered)));
        assert!(vis.to_svg().is_err());
        assert_eq!(vis.metrics().errors, 3);
    }

    #[test]
    fn render_then_activate_replays_sections() {
        let mut vis = rendered();
        let activation = vis.activate(4).unwrap();
        assert_eq!(activation.replayed, vec![0, 1, 2, 3, 4]);
        assert_eq!(vis.current_state(), Some(SectionState::SegmentBounds));
        let activation = vis.activate(2).unwrap();
        assert_eq!(activation.replayed, vec![3, 2]);
        let metrics = vis.metrics();
        assert_eq!(metrics.activations, 2);
        assert_eq!(metrics.replayed, 7);
    }

    #[test]
    fn model_selection_uses_first_resolution() {
        let mut vis = rendered();
        vis.select_model(Model::RandomForest).unwrap();
        vis.settle().unwrap();
        let context = vis.context().unwrap();
        assert_eq!(context.data.model.auc, 0.93);
        assert_eq!(context.scene.text(context.handles.auc_label), Some("93%"));
        assert_eq!(vis.selected_model(), Some(Model::RandomForest));
    }

    #[test]
    fn degenerate_matrix_is_surfaced_on_selection() {
        let mut vis = ScrollVis::new(VisConfig::default());
        vis.set_roc_data(roc_table());
        vis.set_segment_data(segment_rows());
        let mut matrices = confusion_rows();
        for field in ["tp", "tn", "fp", "fn"] {
            matrices[3].insert(field.to_string(), "0".to_string());
        }
        vis.set_confusion_matrix_data(matrices);
        vis.render(series_rows()).unwrap();
        let err = vis.select_model(Model::BoostingMethod).unwrap_err();
        assert!(matches!(err, VisError::DegenerateMatrix { model: 3 }));
        assert_eq!(vis.selected_model(), Some(Model::LogisticRegression));
    }

    #[test]
    fn electrode_change_rebuilds_and_shows_raw() {
        let mut vis = rendered();
        vis.select_model(Model::NeuralNetwork).unwrap();
        vis.activate(9).unwrap();
        vis.select_electrode(Electrode::Tp10).unwrap();
        vis.settle().unwrap();
        assert_eq!(vis.electrode(), Some(Electrode::Tp10));
        assert_eq!(vis.selected_model(), Some(Model::NeuralNetwork));
        assert_eq!(vis.last_section(), Some(9));
        let context = vis.context().unwrap();
        let raw = context.elements("raw");
        assert!(raw.iter().all(|&id| context.scene.number(id, "opacity") == Some(1.0)));
        assert!(vis.to_svg().unwrap().contains("Electrode TP10"));
    }

    #[test]
    fn malformed_rows_fail_render_with_position() {
        let mut vis = ScrollVis::new(VisConfig::default());
        vis.set_roc_data(roc_table());
        vis.set_segment_data(segment_rows());
        vis.set_confusion_matrix_data(confusion_rows());
        let mut rows = series_rows();
        rows[5].insert("RAW_TP9".into(), "NaN".into());
        let err = vis.render(rows).unwrap_err();
        assert!(matches!(err, VisError::DataParse { row: 5, .. }));
        assert!(vis.context().is_none());
    }

    #[test]
    fn advancing_time_steps_the_banner() {
        let mut vis = rendered();
        vis.activate(1).unwrap();
        vis.advance(3000).unwrap();
        let context = vis.context().unwrap();
        assert_eq!(context.ticker.upcoming(), Some("2. CLEAN"));
        assert_eq!(vis.tick_pipeline().unwrap().as_deref(), Some("2. CLEAN"));
    }

    #[test]
    fn huge_time_step_settles_everything() {
        let mut vis = rendered();
        vis.activate(3).unwrap();
        vis.advance(u64::MAX).unwrap();
        let context = vis.context().unwrap();
        assert_eq!(context.scene.pending_transitions(), 0);
        let line = context.handles.series_line;
        assert_eq!(context.scene.number(line, "stroke-dashoffset"), Some(0.0));
        vis.advance(u64::MAX).unwrap();
        assert_eq!(vis.activate(1).unwrap().replayed, vec![2, 1]);
    }
}
