// dirstage/src/core/control.rs

//! Outcome of a pipeline run.

use crate::core::stage::StageId;
use std::path::PathBuf;

/// What a successful `DirPipeline::execute` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
  /// Ids of the stages whose transform ran, in execution order.
  pub executed: Vec<StageId>,
  /// Ids of the stages skipped because they were disabled.
  pub skipped: Vec<StageId>,
  /// Where the directory cursor ended up.
  pub final_directory: PathBuf,
}

impl RunSummary {
  /// True when no stage was skipped.
  pub fn is_complete(&self) -> bool {
    self.skipped.is_empty()
  }
}
