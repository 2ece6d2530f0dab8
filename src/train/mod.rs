pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod outcome;
pub mod loop_fn;

pub use trainer::train_case;
pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
pub use outcome::{StopReason, TrainingOutcome};
pub use loop_fn::{train_loop, run_one_epoch};
