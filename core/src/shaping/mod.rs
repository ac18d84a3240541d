//! Pure transforms from tabular rows into typed plot records.
//!
//! Shapers borrow their input and return fresh records; malformed numeric
//! fields are reported with the field name and row position.

pub mod confusion;
pub mod fields;
pub mod segments;
pub mod series;

pub use confusion::build_confusion_matrices;
pub use segments::{build_segments, GridLayout};
pub use series::build_time_series;
