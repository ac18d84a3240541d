//! Scroll-driven visualization core for the EEG classification walkthrough.
//!
//! Raw rows are shaped into typed records, scored per model, and bound to a
//! retained SVG scene. A section state machine maps scroll positions onto
//! scene states and replays every section crossed on the way.

pub mod controller;
pub mod math;
pub mod prelude;
pub mod records;
pub mod render;
pub mod scene;
pub mod scoring;
pub mod sections;
pub mod shaping;
pub mod telemetry;

pub use controller::ScrollVis;
pub use prelude::{VisConfig, VisError, VisResult};
pub use sections::{SectionState, SECTIONS};
