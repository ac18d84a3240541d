use crate::workflow::config::WorkflowConfig;
use crate::workflow::loader::Dataset;
use anyhow::Context;
use eegviscore::telemetry::MetricsSnapshot;
use eegviscore::ScrollVis;
use std::fs;
use std::path::PathBuf;

pub const ANIMATION_FRAME: &str = "animation.svg";

#[derive(Debug)]
pub struct WorkflowResult {
    pub frames: Vec<PathBuf>,
    pub animation: Option<PathBuf>,
    pub metrics: MetricsSnapshot,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Loads the dataset, renders it and applies the configured model.
    pub fn prepare(&self) -> anyhow::Result<ScrollVis> {
        let dataset = Dataset::load(&self.config.data_dir)
            .with_context(|| format!("loading dataset from {}", self.config.data_dir.display()))?;
        let mut vis = ScrollVis::new(self.config.scene.clone());
        dataset.install(&mut vis)?;
        if let Some(model) = self.config.initial_model()? {
            vis.select_model(model)
                .with_context(|| format!("selecting {}", model))?;
            vis.settle().context("settling model transition")?;
        }
        Ok(vis)
    }

    /// Walks every section in scroll order and writes one settled SVG frame each.
    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let mut vis = self.prepare()?;
        let out_dir = &self.config.out_dir;
        fs::create_dir_all(out_dir)
            .with_context(|| format!("creating output directory {}", out_dir.display()))?;

        let mut frames = Vec::with_capacity(vis.section_count());
        for index in 0..vis.section_count() {
            vis.activate(index)
                .with_context(|| format!("activating section {}", index))?;
            vis.settle().context("settling section transitions")?;
            let path = out_dir.join(format!("section_{:02}.svg", index));
            fs::write(&path, vis.to_svg()?)
                .with_context(|| format!("writing frame {}", path.display()))?;
            frames.push(path);
        }

        let animation = match vis.animation_svg() {
            Some(svg) => {
                let path = out_dir.join(ANIMATION_FRAME);
                fs::write(&path, svg)
                    .with_context(|| format!("writing frame {}", path.display()))?;
                Some(path)
            }
            None => None,
        };

        Ok(WorkflowResult {
            frames,
            animation,
            metrics: vis.metrics(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{write_dataset, GeneratorConfig};
    use eegviscore::records::Model;
    use tempfile::tempdir;

    fn generated() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let config = GeneratorConfig {
            samples: 60,
            segments: 30,
            ..Default::default()
        };
        write_dataset(&dir.path().join("data"), &config).unwrap();
        dir
    }

    #[test]
    fn runner_writes_one_frame_per_section() {
        let dir = generated();
        let cfg = WorkflowConfig::from_args(dir.path().join("data"), dir.path().join("frames"));
        let result = Runner::new(cfg).execute().unwrap();
        assert_eq!(result.frames.len(), 12);
        assert!(result.frames[9].ends_with("section_09.svg"));
        assert!(result.animation.unwrap().exists());
        assert_eq!(result.metrics.activations, 12);
        assert_eq!(result.metrics.errors, 0);

        let roc_frame = fs::read_to_string(&result.frames[9]).unwrap();
        assert!(roc_frame.contains("AUC:"));
    }

    #[test]
    fn configured_model_is_selected_before_scrolling() {
        let dir = generated();
        let cfg = WorkflowConfig::from_args(dir.path().join("data"), dir.path().join("frames"))
            .with_model(Model::NeuralNetwork.index());
        let vis = Runner::new(cfg).prepare().unwrap();
        assert_eq!(vis.selected_model(), Some(Model::NeuralNetwork));
        assert_eq!(vis.last_section(), None);
    }

    #[test]
    fn missing_dataset_fails_with_context() {
        let dir = tempdir().unwrap();
        let cfg = WorkflowConfig::from_args(dir.path().join("nothing"), dir.path().join("frames"));
        let err = Runner::new(cfg).execute().unwrap_err();
        assert!(err.to_string().contains("loading dataset"));
    }
}
