// dirstage/src/core/transform.rs

//! Defines what a stage actually runs (`StageTransform`) and the callback type used for
//! pre/post-stage hooks.

use crate::core::config::ConfigContext;
use crate::core::stage::StageDef;
use std::path::Path;

/// The work done by one stage.
///
/// A transform reads everything it needs from `input_dir` and writes everything it
/// produces into `output_dir`. When the stage has no output label the two paths are the
/// same directory. The input directory is not guaranteed to survive the run, so a
/// transform must not hold on to it.
///
/// Any error is returned to the caller of `DirPipeline::execute` exactly as produced.
pub trait StageTransform<TData, Err>: Send + Sync
where
  TData: Send + Sync + 'static,
{
  fn run(&self, input_dir: &Path, output_dir: &Path, config: &ConfigContext<TData>) -> Result<(), Err>;
}

/// Adapts a plain closure to `StageTransform`.
pub(crate) struct FnTransform<F>(pub(crate) F);

impl<TData, Err, F> StageTransform<TData, Err> for FnTransform<F>
where
  TData: Send + Sync + 'static,
  F: Fn(&Path, &Path, &ConfigContext<TData>) -> Result<(), Err> + Send + Sync,
{
  fn run(&self, input_dir: &Path, output_dir: &Path, config: &ConfigContext<TData>) -> Result<(), Err> {
    (self.0)(input_dir, output_dir, config)
  }
}

/// Type alias for a pre- or post-stage hook.
///
/// Called with the stage being executed, the pipeline's current directory and the shared
/// configuration. Hooks are side-effect only: they get shared references, so the
/// pipeline's own cursor and stack are out of their reach.
pub type Hook<TData, Err> =
  Box<dyn Fn(&StageDef, &Path, &ConfigContext<TData>) -> Result<(), Err> + Send + Sync>;
