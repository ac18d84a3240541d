use anyhow::Context;
use eegviscore::records::{Electrode, Model};
use eegviscore::VisConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the driver reads its dataset, where it writes frames, and the
/// scene configuration handed to the core.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    /// Model index (dropdown position) selected right after the first render.
    pub model: Option<usize>,
    pub port: u16,
    pub scene: VisConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("frames"),
            model: None,
            port: 9000,
            scene: VisConfig::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(data_dir: PathBuf, out_dir: PathBuf) -> Self {
        Self {
            data_dir,
            out_dir,
            ..Default::default()
        }
    }

    pub fn with_electrode(mut self, electrode: Electrode) -> Self {
        self.scene.electrode = electrode;
        self
    }

    pub fn with_model(mut self, model: usize) -> Self {
        self.model = Some(model);
        self
    }

    pub fn initial_model(&self) -> anyhow::Result<Option<Model>> {
        match self.model {
            None => Ok(None),
            Some(index) => Model::from_index(index)
                .map(Some)
                .with_context(|| format!("model index {} is not one of the four classifiers", index)),
        }
    }
}
