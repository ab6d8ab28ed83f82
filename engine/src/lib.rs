// Engine library root
// Battery replacement detection and remaining-life tracking over fleet
// maintenance reports.

pub mod config;
pub mod data;
pub mod detection;
pub mod error;
pub mod exports;
pub mod lifecycle;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod store;

pub use error::{EngineError, Result};
pub use services::ReportSession;
