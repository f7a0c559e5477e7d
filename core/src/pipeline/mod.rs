// dirstage/src/pipeline/mod.rs

//! Defines the `DirPipeline` struct, its stage registry, hooks and execution logic.

pub mod definition;
pub mod execution;
pub mod hooks;

// Re-export the main pipeline struct
pub use definition::{DirPipeline, PipelineOptions};
