pub mod squared;

pub use squared::HalfSquaredError;
