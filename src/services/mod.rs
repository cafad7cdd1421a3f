pub mod analysis;
pub mod classifier;
pub mod trend;
