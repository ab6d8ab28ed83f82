// Battery life-cycle analytics over replacement-flagged records
pub mod cadence;
pub mod life_window;

pub use cadence::{replacement_counts, replacement_intervals, top_units};
pub use life_window::LifeCycleEstimator;
