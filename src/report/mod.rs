pub mod report;

pub use report::{config_echo, exit_info, truth_table};
