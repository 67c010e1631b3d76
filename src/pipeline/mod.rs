//! Training pipeline and observer adapters.

pub mod observers;
pub mod training;

pub use observers::{JsonlObserver, MetricsObserver, ProgressObserver};
pub use training::{SimulationConfig, TrainingPipeline, TrainingResult, TrialSummary};
