//! Timing utilities
//!
//! Records how long initialization and sync passes take so slow glossary
//! pages show up in the stats.

use std::collections::HashMap;

/// Performance monitor for measuring operation times
#[derive(Debug, Default)]
pub struct PerformanceMonitor {
    measurements: HashMap<String, Vec<f32>>,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_measurement(&mut self, operation: &str, duration_ms: f32) {
        self.measurements
            .entry(operation.to_string())
            .or_default()
            .push(duration_ms);
    }

    pub fn get_average_time(&self, operation: &str) -> Option<f32> {
        self.measurements.get(operation).and_then(|times| {
            if times.is_empty() {
                None
            } else {
                Some(times.iter().sum::<f32>() / times.len() as f32)
            }
        })
    }
}
