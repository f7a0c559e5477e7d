// dirstage/src/pipeline/hooks.rs

//! Installs the pre-stage and post-stage hooks.
//!
//! Each slot holds at most one hook. Installing a hook replaces whatever was there.

use crate::core::config::ConfigContext;
use crate::core::stage::StageDef;
use crate::core::transform::Hook;
use crate::error::DirStageError;
use crate::pipeline::definition::DirPipeline;
use std::path::Path;
use tracing::{event, Level};

impl<TData, Err> DirPipeline<TData, Err>
where
  TData: Send + Sync + 'static,
  Err: std::error::Error + From<DirStageError> + Send + Sync + 'static,
{
  /// Sets the hook run before every executed stage, with the stage and the directory
  /// it is about to read from.
  pub fn set_pre_hook(
    &mut self,
    hook_fn: impl Fn(&StageDef, &Path, &ConfigContext<TData>) -> Result<(), Err> + Send + Sync + 'static,
  ) {
    if self.pre_hook.is_some() {
      event!(Level::DEBUG, "Replacing existing pre-stage hook.");
    }
    let hook: Hook<TData, Err> = Box::new(hook_fn);
    self.pre_hook = Some(hook);
  }

  /// Sets the hook run after every executed stage, with the stage and the directory
  /// the cursor moved to.
  pub fn set_post_hook(
    &mut self,
    hook_fn: impl Fn(&StageDef, &Path, &ConfigContext<TData>) -> Result<(), Err> + Send + Sync + 'static,
  ) {
    if self.post_hook.is_some() {
      event!(Level::DEBUG, "Replacing existing post-stage hook.");
    }
    let hook: Hook<TData, Err> = Box::new(hook_fn);
    self.post_hook = Some(hook);
  }

  pub fn clear_pre_hook(&mut self) {
    self.pre_hook = None;
  }

  pub fn clear_post_hook(&mut self) {
    self.post_hook = None;
  }

  pub fn has_pre_hook(&self) -> bool {
    self.pre_hook.is_some()
  }

  pub fn has_post_hook(&self) -> bool {
    self.post_hook.is_some()
  }
}
