pub mod color;
pub mod format;
pub mod scale;
pub mod stats;

pub use color::Rgb;
pub use scale::{BandScale, LinearScale};
pub use stats::StatsHelper;
