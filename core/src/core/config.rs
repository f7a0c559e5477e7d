// dirstage/src/core/config.rs

//! The configuration context shared between the caller, every stage transform and every hook.

use parking_lot::{MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::path::PathBuf;
use std::sync::Arc;

/// Typed configuration record.
///
/// `logs_dir` and `timestamp` are the only fields the engine knows about; the pipeline
/// fills them in right before its first stage runs. Everything else a stage needs goes
/// in `params`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig<T> {
  pub logs_dir: Option<PathBuf>,
  pub timestamp: Option<String>,
  pub params: T,
}

impl<T> PipelineConfig<T> {
  pub fn new(params: T) -> Self {
    Self {
      logs_dir: None,
      timestamp: None,
      params,
    }
  }
}

/// Shared handle around a `PipelineConfig<T>` using parking_lot::RwLock.
///
/// Cloning the handle shares the record: the caller keeps one clone and hands another
/// to the pipeline, then reads back whatever stages wrote into it.
///
/// Guards are blocking. Drop them before calling back into anything that may lock again.
#[derive(Debug)]
pub struct ConfigContext<T: Send + Sync + 'static>(Arc<RwLock<PipelineConfig<T>>>);

impl<T: Send + Sync + 'static> ConfigContext<T> {
  pub fn new(params: T) -> Self {
    Self::from_config(PipelineConfig::new(params))
  }

  pub fn from_config(config: PipelineConfig<T>) -> Self {
    ConfigContext(Arc::new(RwLock::new(config)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, PipelineConfig<T>> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, PipelineConfig<T>> {
    self.0.write()
  }

  pub fn try_read(&self) -> Option<RwLockReadGuard<'_, PipelineConfig<T>>> {
    self.0.try_read()
  }

  pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, PipelineConfig<T>>> {
    self.0.try_write()
  }

  /// Read guard onto the caller-defined payload only.
  pub fn params(&self) -> MappedRwLockReadGuard<'_, T> {
    RwLockReadGuard::map(self.read(), |config| &config.params)
  }

  pub fn params_mut(&self) -> MappedRwLockWriteGuard<'_, T> {
    RwLockWriteGuard::map(self.write(), |config| &mut config.params)
  }

  pub fn logs_dir(&self) -> Option<PathBuf> {
    self.read().logs_dir.clone()
  }

  pub fn timestamp(&self) -> Option<String> {
    self.read().timestamp.clone()
  }

  /// Whether two handles point at the same record.
  pub fn ptr_eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl<T: Send + Sync + 'static> Clone for ConfigContext<T> {
  fn clone(&self) -> Self {
    ConfigContext(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for ConfigContext<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
