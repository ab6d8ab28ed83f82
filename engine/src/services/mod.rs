// Services exposed by the engine

pub mod report_session;

pub use report_session::{ManualAddition, ReportSession, SessionSummary};
