// Engine-specific data models. Report entries and records live in `shared::models`.
pub mod manual_submission;

pub use manual_submission::ManualSubmission;
