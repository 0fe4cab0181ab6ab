//! Load, annotate, sort, report, export

pub mod orchestrator;

pub use orchestrator::{run, PipelineResult};
