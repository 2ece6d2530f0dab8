use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which stopping rule ended a training run. Neither is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Mean error reached the error threshold.
    Converged,
    /// The epoch budget ran out first.
    Exhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Converged => write!(f, "error threshold reached"),
            StopReason::Exhausted => write!(f, "maximum iterations reached"),
        }
    }
}

/// Final state of a `train_loop` run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOutcome {
    pub reason: StopReason,
    /// Completed epochs.
    pub epochs: usize,
    /// Mean error of the last completed epoch; `+inf` if none ran.
    pub mean_error: f64,
    pub elapsed: Duration,
}

impl TrainingOutcome {
    pub fn converged(&self) -> bool {
        self.reason == StopReason::Converged
    }
}
