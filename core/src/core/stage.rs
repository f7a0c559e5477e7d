// dirstage/src/core/stage.rs

//! Defines the descriptor for a single stage and the ways a caller can refer to one.

use std::fmt;

/// Sequential identifier handed out by `DirPipeline::add_stage`, starting at 0.
pub type StageId = usize;

/// Definition of a pipeline stage: everything about it except the transform itself.
///
/// This is what hooks receive as the stage identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDef {
  pub id: StageId,
  pub name: String,
  /// Directory label for this stage's output. Empty means the stage works in place
  /// and the pipeline cursor does not move.
  pub output_label: String,
}

impl StageDef {
  /// Whether this stage produces a new directory.
  pub fn changes_directory(&self) -> bool {
    !self.output_label.is_empty()
  }
}

impl fmt::Display for StageDef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.id, self.name)
  }
}

/// Reference to a registered stage, by id or by name.
///
/// Name lookups resolve to the first registered stage carrying that name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StageRef {
  Id(StageId),
  Name(String),
}

impl fmt::Display for StageRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StageRef::Id(id) => write!(f, "id {}", id),
      StageRef::Name(name) => write!(f, "name '{}'", name),
    }
  }
}

impl From<StageId> for StageRef {
  fn from(id: StageId) -> Self {
    StageRef::Id(id)
  }
}

impl From<&str> for StageRef {
  fn from(name: &str) -> Self {
    StageRef::Name(name.to_string())
  }
}

impl From<String> for StageRef {
  fn from(name: String) -> Self {
    StageRef::Name(name)
  }
}

impl From<&String> for StageRef {
  fn from(name: &String) -> Self {
    StageRef::Name(name.clone())
  }
}
