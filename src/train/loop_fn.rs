use std::time::Instant;

use log::{debug, info};

use crate::dataset::dataset::Dataset;
use crate::error::{NetworkError, Result};
use crate::loss::squared::HalfSquaredError;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::outcome::{StopReason, TrainingOutcome};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_case;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` until the mean error of an epoch drops to
/// `config.error_threshold` or `config.max_iterations` epochs have run.
///
/// Cases are visited in dataset order and the weights move after every
/// case, so later cases in an epoch see the earlier cases' updates. The
/// stopping rules are checked before each epoch: the error threshold first,
/// then the epoch budget.
///
/// # Errors
/// `Configuration` for an invalid config or an empty dataset; `Shape` if a
/// case does not fit the network.
pub fn train_loop(network: &mut Network, dataset: &Dataset, config: &TrainConfig) -> Result<TrainingOutcome> {
    config.validate()?;
    if dataset.is_empty() {
        return Err(NetworkError::Configuration("cannot train on an empty dataset".into()));
    }

    info!(
        "training {} on {} cases: lambda={} max_iterations={} error_threshold={}",
        network.topology(),
        dataset.len(),
        config.learning_rate,
        config.max_iterations,
        config.error_threshold
    );

    let optimizer = Sgd::new(config.learning_rate);
    let mut outputs: Vec<Vec<f64>> = dataset
        .expected()
        .iter()
        .map(|e| vec![0.0; e.len()])
        .collect();

    let t_start = Instant::now();
    let mut epoch = 0;
    let mut mean_error = f64::INFINITY;

    let reason = loop {
        if mean_error <= config.error_threshold {
            break StopReason::Converged;
        }
        if epoch >= config.max_iterations {
            break StopReason::Exhausted;
        }

        mean_error = run_one_epoch(network, dataset, &optimizer, &mut outputs)?;
        epoch += 1;

        if config.keep_alive_interval > 0 && epoch % config.keep_alive_interval == 0 {
            emit_keep_alive(config, epoch, mean_error, &t_start);
        }
    };

    let elapsed = t_start.elapsed();
    info!("{reason} after {epoch} epochs, mean error {mean_error} ({} ms)", elapsed.as_millis());

    Ok(TrainingOutcome {
        reason,
        epochs: epoch,
        mean_error,
        elapsed,
    })
}

/// One full pass over the dataset. Fills `outputs` with the output of each
/// case's forward pass and returns their mean error.
pub fn run_one_epoch(
    network: &mut Network,
    dataset: &Dataset,
    optimizer: &Sgd,
    outputs: &mut [Vec<f64>],
) -> Result<f64> {
    for ((input, expected), out) in dataset.cases().zip(outputs.iter_mut()) {
        train_case(network, input, expected, optimizer)?;
        out.copy_from_slice(network.output());
    }
    Ok(HalfSquaredError::mean(outputs, dataset.expected()))
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn emit_keep_alive(config: &TrainConfig, epoch: usize, mean_error: f64, t_start: &Instant) {
    info!("epoch {epoch}: mean error {mean_error}");

    if let Some(ref tx) = config.progress_tx {
        let stats = EpochStats {
            epoch,
            mean_error,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        if tx.send(stats).is_err() {
            debug!("progress receiver dropped; continuing without it");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::network::topology::Topology;
    use std::sync::mpsc;

    fn or_dataset(t: &Topology) -> Dataset {
        Dataset::new(
            t,
            vec![
                (vec![0.0, 0.0], vec![0.0]),
                (vec![0.0, 1.0], vec![1.0]),
                (vec![1.0, 0.0], vec![1.0]),
                (vec![1.0, 1.0], vec![1.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn zero_budget_is_exhausted_without_training() {
        let t = Topology::from_widths(&[2, 2, 1]).unwrap();
        let mut net = Network::new(&t, ActivationFunction::Sigmoid);
        let outcome = train_loop(&mut net, &or_dataset(&t), &TrainConfig::new(0.3, 0, 0.01)).unwrap();

        assert_eq!(outcome.reason, StopReason::Exhausted);
        assert_eq!(outcome.epochs, 0);
        assert_eq!(outcome.mean_error, f64::INFINITY);
        assert!(net.weights().values().all(|w| w == 0.0));
    }

    #[test]
    fn first_epoch_error_uses_that_epochs_outputs() {
        // lambda = 0 keeps the weights at zero, so every output is 0.5.
        let t = Topology::from_widths(&[2, 1]).unwrap();
        let ds = or_dataset(&t);
        let mut net = Network::new(&t, ActivationFunction::Sigmoid);
        let mut outputs = vec![vec![0.0]; ds.len()];

        let mean = run_one_epoch(&mut net, &ds, &Sgd::new(0.0), &mut outputs).unwrap();
        assert!(outputs.iter().all(|o| o[0] == 0.5));
        assert_eq!(mean, (0.125 * 4.0) / 4.0);
    }

    #[test]
    fn keep_alive_reports_on_interval() {
        let t = Topology::from_widths(&[2, 1]).unwrap();
        let mut net = Network::new(&t, ActivationFunction::Sigmoid);
        let (tx, rx) = mpsc::channel();
        let config = TrainConfig::new(0.3, 10, 0.0).with_keep_alive(3).with_progress(tx);

        let outcome = train_loop(&mut net, &or_dataset(&t), &config).unwrap();
        assert_eq!(outcome.reason, StopReason::Exhausted);
        assert_eq!(outcome.epochs, 10);

        let epochs: Vec<usize> = rx.try_iter().map(|s| s.epoch).collect();
        assert_eq!(epochs, vec![3, 6, 9]);
    }

    #[test]
    fn dropped_receiver_does_not_stop_training() {
        let t = Topology::from_widths(&[2, 1]).unwrap();
        let mut net = Network::new(&t, ActivationFunction::Sigmoid);
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let config = TrainConfig::new(0.3, 5, 0.0).with_keep_alive(1).with_progress(tx);

        let outcome = train_loop(&mut net, &or_dataset(&t), &config).unwrap();
        assert_eq!(outcome.epochs, 5);
    }

    #[test]
    fn rejects_bad_hyperparameters() {
        let t = Topology::from_widths(&[2, 1]).unwrap();
        let mut net = Network::new(&t, ActivationFunction::Sigmoid);
        let ds = or_dataset(&t);
        for config in [
            TrainConfig::new(f64::NAN, 10, 0.01),
            TrainConfig::new(-0.1, 10, 0.01),
            TrainConfig::new(0.3, 10, f64::NAN),
        ] {
            let err = train_loop(&mut net, &ds, &config).unwrap_err();
            assert!(matches!(err, NetworkError::Configuration(_)));
        }
    }
}
