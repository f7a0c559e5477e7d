// dirstage/src/error.rs
use anyhow::Error as AnyhowError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirStageError {
  /// An enable/disable call referenced a stage that was never registered.
  /// Only returned by `DirPipeline::try_enable`; `enable` logs it and carries on.
  #[error("Stage not found: {stage}")]
  StageNotFound { stage: String },

  #[error("Failed to create directory '{}': {source}", .path.display())]
  Filesystem {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Error in user-provided stage transform or hook. Source: {source}")]
  StageFailed {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal dirstage error: {0}")]
  Internal(String),
}

impl DirStageError {
  pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    DirStageError::Filesystem {
      path: path.into(),
      source,
    }
  }
}

// Lets transforms written against anyhow use `?` when the pipeline runs with DirStageError.
impl From<AnyhowError> for DirStageError {
  fn from(err: AnyhowError) -> Self {
    // Don't bury an error we produced ourselves under another layer.
    match err.downcast::<DirStageError>() {
      Ok(inner) => inner,
      Err(err) => DirStageError::StageFailed { source: err },
    }
  }
}

pub type DirStageResult<T, E = DirStageError> = std::result::Result<T, E>;
