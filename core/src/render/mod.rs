//! Scene construction and the redraw paths driven by user selections.

pub mod animation;
pub mod build;
pub mod context;
pub mod pipeline;
pub mod redraw;

#[cfg(test)]
pub(crate) mod fixtures;

pub use animation::ChannelLoop;
pub use build::{build_scene, CellHandle, ModelView, Scales, SceneData, SceneHandles, SeriesGeometry};
pub use context::SceneContext;
pub use pipeline::PipelineTicker;
pub use redraw::{apply_model, roc_path};
