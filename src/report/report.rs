//! Plain-text rendering of truth tables, configuration echoes and training
//! exit information. Everything returns a `String`; printing is the caller's job.

use std::fmt::Write;

use crate::config::run_config::{Mode, RunConfig, WeightSource};
use crate::dataset::dataset::Dataset;
use crate::network::topology::Topology;
use crate::train::outcome::TrainingOutcome;

/// One row per case: either `inputs | outputs`, or `Case #i: outputs`.
pub fn truth_table(dataset: &Dataset, outputs: &[Vec<f64>], show_inputs: bool) -> String {
    let mut out = String::new();
    for (ii, row) in outputs.iter().enumerate() {
        if show_inputs {
            out.push_str(&join_values(&dataset.inputs()[ii]));
            out.push_str("| ");
        } else {
            let _ = write!(out, "Case #{ii}: ");
        }
        out.push_str(&join_values(row));
        out.push('\n');
    }
    out
}

/// Why training stopped, the final mean error, epoch count and wall time.
pub fn exit_info(outcome: &TrainingOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "TRAINING EXIT INFO");
    let _ = writeln!(out, "-------------------------");
    let _ = writeln!(out, "Training stopped because: {}", outcome.reason);
    let _ = writeln!(out, "Mean error: {}", outcome.mean_error);
    let _ = writeln!(out, "Iterations reached: {}", outcome.epochs);
    let _ = writeln!(out, "Time of training (ms): {}", outcome.elapsed.as_millis());
    out
}

/// Echo of the run configuration printed before running or training.
pub fn config_echo(config: &RunConfig, topology: &Topology, dataset: &Dataset) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "FILE CONFIGURATION");
    let _ = writeln!(out, "-------------------------");
    let _ = writeln!(out, "Case file: '{}'", config.case_file.display());
    match &config.weights {
        WeightSource::Load { path } => {
            let _ = writeln!(out, "Weights loaded from: '{}'", path.display());
        }
        WeightSource::Randomize { .. } => {
            let _ = writeln!(out, "Will not load weights");
        }
    }
    match (&config.save_weights, config.mode) {
        (Some(path), Mode::Train) => {
            let _ = writeln!(out, "Weights saved to: '{}'", path.display());
        }
        _ => {
            let _ = writeln!(out, "Will not save weights");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "NETWORK CONFIGURATION");
    let _ = writeln!(out, "-------------------------");
    let _ = writeln!(out, "Activations: {topology}");
    let _ = writeln!(out, "Activation function: {}", config.activation.name());

    let _ = writeln!(out);
    let _ = writeln!(out, "TRUTH TABLE (T)");
    out.push_str(&truth_table(dataset, dataset.expected(), config.show_inputs));

    if config.mode == Mode::Train {
        let _ = writeln!(out);
        let _ = writeln!(out, "TRAINING PARAMETERS");
        let _ = writeln!(out, "-------------------------");
        if let WeightSource::Randomize { min, max } = config.weights {
            let _ = writeln!(out, "Weights range: {min} to {max}");
        }
        let _ = writeln!(out, "Maximum iterations: {}", config.max_iterations);
        let _ = writeln!(out, "Error threshold: {}", config.error_threshold);
        let _ = writeln!(out, "Lambda value: {}", config.learning_rate);
    }
    out
}

fn join_values(values: &[f64]) -> String {
    let mut s = String::new();
    for v in values {
        let _ = write!(s, "{v}  ");
    }
    s
}
