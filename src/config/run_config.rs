use std::path::{Path, PathBuf};

use log::debug;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::network::network::Network;
use crate::network::topology::Topology;
use crate::train::train_config::TrainConfig;

/// Whether the driver trains the network or only evaluates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Train,
    Run,
}

/// Where the starting weights come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum WeightSource {
    /// Uniform random weights in `[min, max)`.
    Randomize { min: f64, max: f64 },
    /// A weight file previously written for the same topology.
    Load { path: PathBuf },
}

/// Everything the `nlayer` driver needs for one run, stored as JSON.
///
/// ```json
/// {
///   "widths": [2, 5, 1],
///   "case_file": "cases/xor.txt",
///   "case_count": 4,
///   "weights": { "source": "randomize", "min": -1.5, "max": 1.5 },
///   "save_weights": "xor.weights",
///   "learning_rate": 0.3,
///   "max_iterations": 100000,
///   "error_threshold": 0.0002,
///   "keep_alive_interval": 10000,
///   "mode": "train"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Layer widths, input first.
    pub widths: Vec<usize>,
    /// Optional explicit connection-layer count; must agree with `widths`.
    #[serde(default)]
    pub layers: Option<usize>,
    pub case_file: PathBuf,
    pub case_count: usize,
    pub weights: WeightSource,
    #[serde(default)]
    pub save_weights: Option<PathBuf>,
    pub learning_rate: f64,
    pub max_iterations: usize,
    pub error_threshold: f64,
    /// `0` disables keep-alive output.
    #[serde(default)]
    pub keep_alive_interval: usize,
    pub mode: Mode,
    /// Echo each case's inputs next to its outputs in truth tables.
    #[serde(default)]
    pub show_inputs: bool,
    #[serde(default)]
    pub activation: ActivationFunction,
    /// Seeds weight randomisation for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunConfig {
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| NetworkError::from(e).in_file(path))?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| NetworkError::from(e).in_file(path))
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Validated topology built from `widths` (and `layers`, if given).
    pub fn topology(&self) -> Result<Topology> {
        let layer_count = self.layers.unwrap_or(self.widths.len().saturating_sub(1));
        Topology::new(layer_count, self.widths.clone())
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig::new(self.learning_rate, self.max_iterations, self.error_threshold)
            .with_keep_alive(self.keep_alive_interval)
    }

    /// Network with its starting weights, randomized or loaded per `weights`.
    pub fn build_network(&self) -> Result<Network> {
        let topology = self.topology()?;
        let mut network = Network::new(&topology, self.activation);
        match &self.weights {
            WeightSource::Randomize { min, max } => {
                debug!("randomizing {} weights in [{min}, {max})", topology.weight_count());
                match self.seed {
                    Some(seed) => network.weights_mut().randomize(*min, *max, &mut StdRng::seed_from_u64(seed))?,
                    None => network.weights_mut().randomize(*min, *max, &mut rand::thread_rng())?,
                }
            }
            WeightSource::Load { path } => network.weights_mut().load_file(path)?,
        }
        Ok(network)
    }

    /// Rejects anything that would make a run meaningless, before any
    /// file is opened or any weight is touched.
    pub fn validate(&self) -> Result<()> {
        self.topology()?;
        if self.case_count == 0 {
            return Err(NetworkError::Configuration("case_count must be at least 1".into()));
        }
        if let WeightSource::Randomize { min, max } = self.weights {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(NetworkError::Configuration(format!(
                    "weight range [{min}, {max}) is empty or not finite"
                )));
            }
        }
        if self.mode == Mode::Train {
            self.train_config().validate()?;
        }
        Ok(())
    }
}
