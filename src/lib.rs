pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod optim;
pub mod dataset;
pub mod train;
pub mod config;
pub mod report;
pub mod preprocess;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use network::{Network, Topology, WeightStore};
pub use loss::squared::HalfSquaredError;
pub use optim::sgd::Sgd;
pub use dataset::dataset::Dataset;
pub use train::{train_case, train_loop, StopReason, TrainConfig, TrainingOutcome};
pub use config::run_config::{Mode, RunConfig, WeightSource};
