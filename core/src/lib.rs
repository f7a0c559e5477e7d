// dirstage/src/lib.rs

//! dirstage: a directory-staged pipeline engine.
//!
//! A pipeline is an ordered list of named stages. Each stage reads one directory and
//! writes the next; the engine decides where the next one lives, creates it, and hands
//! both paths to the stage. Stages can be switched off without touching the glue code,
//! which makes it easy to re-run part of a dataset preparation (rename, trim, normalize,
//! split, convert, ...) while keeping the rest.
//!
//! Features:
//!  - Stages registered in order, addressable by id or by name, enabled by default.
//!  - Flat (`<run_root>/<label>`) or stacked (`<run_root>/<label_1>_<label_2>...`) output naming.
//!  - One pre-stage and one post-stage hook.
//!  - A typed, shared configuration context that every stage and hook can read and write.
//!  - Every run writes under its own timestamped run root.

pub mod core;
pub mod error;
pub mod naming;
pub mod pipeline;

// --- Re-exports for the Public API ---

pub use crate::core::config::{ConfigContext, PipelineConfig};
pub use crate::core::control::RunSummary;
pub use crate::core::stage::{StageDef, StageId, StageRef};
pub use crate::core::transform::{Hook, StageTransform};

pub use crate::naming::NamingMode;
pub use crate::pipeline::definition::{DirPipeline, PipelineOptions, LOGS_SUBDIR, RUN_ROOT_PREFIX};

pub use crate::error::{DirStageError, DirStageResult};

/*
    Core workflow:
    1. Create a `DirPipeline` with a base directory, an optional start directory and
       `PipelineOptions` (naming mode, verbosity).
       Use `DirPipeline::with_config` to share a `ConfigContext<T>` with the stages.
    2. Register stages with `.add_stage(name, output_label, |input, output, config| { ... })`.
    3. Switch stages off with `.disable("trim")` or `.enable(2, false)`.
    4. Optionally install `.set_pre_hook(..)` / `.set_post_hook(..)`.
    5. Call `.execute()`; the first failing stage's error comes back unchanged.
*/
