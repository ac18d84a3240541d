use log::{info, warn};

use crate::prelude::VisError;

pub const LOG_TARGET: &str = "scrollvis";

/// Thin wrapper over the `log` facade with the crate's fixed target.
pub struct LogManager {
    target: &'static str,
}

impl LogManager {
    pub fn new() -> Self {
        Self { target: LOG_TARGET }
    }

    pub fn record(&self, message: &str) {
        info!(target: self.target, "{}", message);
    }

    /// Logs an operation that was refused, with the reason.
    pub fn reject(&self, operation: &str, error: &VisError) {
        warn!(target: self.target, "{} rejected: {}", operation, error);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
