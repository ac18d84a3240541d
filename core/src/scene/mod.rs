//! Retained SVG element tree with attribute transitions.

pub mod axis;
pub mod element;
pub mod path;
pub mod reconcile;
pub mod svg;
pub mod timeline;

pub use axis::{AxisSpec, Orient};
pub use element::{AttrValue, Element, ElementId, Scene, Tag};
pub use reconcile::DataJoin;
pub use timeline::{ease_cubic_in_out, Ease, Timeline};
