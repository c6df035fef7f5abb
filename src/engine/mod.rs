pub mod jobs;
pub mod runtime;
pub mod slot;

// Re-export key components
pub use jobs::{TextJob, spawn_text_job};
pub use slot::{ResultSink, ResultSlot, SlotState};
