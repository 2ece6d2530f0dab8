use std::sync::mpsc;

use crate::error::{NetworkError, Result};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `learning_rate`       — lambda, the fixed steepest-descent step size
/// - `max_iterations`      — epoch budget; reaching it ends the run as `Exhausted`
/// - `error_threshold`     — the run ends as `Converged` once the mean error
///                           of an epoch is at or below this value
/// - `keep_alive_interval` — emit progress every this many epochs; `0` disables
/// - `progress_tx`         — optional channel receiving each keep-alive
///                           `EpochStats`; a dropped receiver is ignored
pub struct TrainConfig {
    pub learning_rate: f64,
    pub max_iterations: usize,
    pub error_threshold: f64,
    pub keep_alive_interval: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with keep-alive disabled and no progress channel.
    pub fn new(learning_rate: f64, max_iterations: usize, error_threshold: f64) -> Self {
        TrainConfig {
            learning_rate,
            max_iterations,
            error_threshold,
            keep_alive_interval: 0,
            progress_tx: None,
        }
    }

    pub fn with_keep_alive(mut self, interval: usize) -> Self {
        self.keep_alive_interval = interval;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(NetworkError::Configuration(format!(
                "learning rate {} must be a finite, non-negative number",
                self.learning_rate
            )));
        }
        if !self.error_threshold.is_finite() || self.error_threshold < 0.0 {
            return Err(NetworkError::Configuration(format!(
                "error threshold {} must be a finite, non-negative number",
                self.error_threshold
            )));
        }
        Ok(())
    }
}
