// dirstage/src/naming.rs

//! Directory naming policy: where each stage writes its output.
//!
//! Under [`NamingMode::Flat`] every stage gets `<run_root>/<output_label>`.
//! Under [`NamingMode::Stacked`] the labels of every stage executed so far are joined
//! with `_`, so the path spells out the processing history:
//! `<run_root>/renamed`, `<run_root>/renamed_trimmed`, ...

use crate::error::{DirStageError, DirStageResult};
use std::path::{Path, PathBuf};
use tracing::{event, Level};

/// Separator between labels under stacked naming.
pub const STACK_SEPARATOR: &str = "_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingMode {
  #[default]
  Flat,
  Stacked,
}

/// Computes the directory the next stage should write into.
///
/// An empty `output_label` leaves everything untouched and returns `current_dir`.
/// Under stacked naming a non-empty label is pushed onto `stack` before the path is
/// built. Nothing is created on disk here; see [`materialize`].
pub fn next_directory(
  mode: NamingMode,
  stack: &mut Vec<String>,
  output_label: &str,
  run_root: &Path,
  current_dir: &Path,
) -> PathBuf {
  if output_label.is_empty() {
    return current_dir.to_path_buf();
  }

  match mode {
    NamingMode::Flat => run_root.join(output_label),
    NamingMode::Stacked => {
      stack.push(output_label.to_string());
      run_root.join(stack.join(STACK_SEPARATOR))
    }
  }
}

/// Creates `dir` and any missing parents. An existing directory is left alone.
pub fn materialize(dir: &Path) -> DirStageResult<()> {
  if dir.is_dir() {
    event!(Level::TRACE, path = %dir.display(), "Directory already exists.");
    return Ok(());
  }
  std::fs::create_dir_all(dir).map_err(|e| DirStageError::filesystem(dir, e))?;
  event!(Level::DEBUG, path = %dir.display(), "Directory created.");
  Ok(())
}
