use serde::{Serialize, Deserialize};

/// Keep-alive payload emitted by `train_loop` every `keep_alive_interval`
/// epochs. Observability only; the loop never waits on its receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// Number of completed epochs.
    pub epoch: usize,
    /// Mean per-case error of the most recent epoch.
    pub mean_error: f64,
    /// Wall-clock time since training started, in milliseconds.
    pub elapsed_ms: u64,
}
