// dirstage/src/pipeline/definition.rs

//! Contains the `DirPipeline<TData, Err>` struct definition, its construction, and the
//! stage registry: adding stages and toggling them on or off.

use crate::core::config::ConfigContext;
use crate::core::stage::{StageDef, StageId, StageRef};
use crate::core::transform::{FnTransform, Hook, StageTransform};
use crate::error::{DirStageError, DirStageResult};
use crate::naming::NamingMode;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

/// Prefix of the per-run output directory created under the base directory.
pub const RUN_ROOT_PREFIX: &str = "pipeline_output_";

/// Subdirectory of the run root exposed to stages as `logs_dir`.
pub const LOGS_SUBDIR: &str = "logs";

/// Format of the run timestamp, e.g. `20240131_154502`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Construction options for a `DirPipeline`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
  pub naming: NamingMode,
  /// Emit progress events (stage boundaries, directories, skips) at INFO level.
  pub verbose: bool,
  /// Under stacked naming, start the label stack with the start directory's own name,
  /// so outputs read `<start>_<label>...`.
  pub seed_stack_with_start: bool,
  /// Fixed run timestamp. Defaults to the local time at construction.
  pub timestamp: Option<String>,
}

impl PipelineOptions {
  pub fn stacked() -> Self {
    Self {
      naming: NamingMode::Stacked,
      ..Default::default()
    }
  }

  pub fn verbose(mut self, verbose: bool) -> Self {
    self.verbose = verbose;
    self
  }
}

/// A registered stage: its definition plus the transform it runs.
pub(crate) struct Stage<TData, Err>
where
  TData: Send + Sync + 'static,
{
  pub(crate) def: StageDef,
  pub(crate) transform: Box<dyn StageTransform<TData, Err>>,
}

/// The directory-staged pipeline, generic over the configuration payload `TData`
/// and the error type `Err` returned by stage transforms and hooks.
///
/// `Err` must be `From<DirStageError>` so that framework failures (a directory that
/// cannot be created) come out of `execute` in the same type as stage failures.
pub struct DirPipeline<TData = (), Err = DirStageError>
where
  TData: Send + Sync + 'static,
  Err: std::error::Error + From<DirStageError> + Send + Sync + 'static,
{
  /// Registered stages, in registration order. Index == id.
  pub(crate) stages: Vec<Stage<TData, Err>>,
  pub(crate) enabled: HashMap<StageId, bool>,
  /// Latches to false on the first successful disable.
  pub(crate) full_execution: bool,

  pub(crate) pre_hook: Option<Hook<TData, Err>>,
  pub(crate) post_hook: Option<Hook<TData, Err>>,

  pub(crate) config: ConfigContext<TData>,
  /// Only a caller-supplied config receives `logs_dir`/`timestamp`.
  pub(crate) config_supplied: bool,

  pub(crate) run_root: PathBuf,
  pub(crate) start_directory: PathBuf,
  pub(crate) current_directory: PathBuf,
  pub(crate) executed_stack: Vec<String>,
  pub(crate) stack_seed: Option<String>,
  pub(crate) naming: NamingMode,
  pub(crate) verbose: bool,
  pub(crate) timestamp: String,
}

impl<TData, Err> DirPipeline<TData, Err>
where
  TData: Send + Sync + 'static,
  Err: std::error::Error + From<DirStageError> + Send + Sync + 'static,
{
  /// Creates a pipeline without a caller-supplied configuration.
  ///
  /// Stages still receive a `ConfigContext`, built from `TData::default()`, but the
  /// pipeline does not inject `logs_dir`/`timestamp` into it and creates no logs directory.
  ///
  /// When `start_directory` is `None` the first stage reads from `base_directory` itself.
  pub fn new(base_directory: impl Into<PathBuf>, start_directory: Option<PathBuf>, options: PipelineOptions) -> Self
  where
    TData: Default,
  {
    Self::build(base_directory.into(), start_directory, options, ConfigContext::default(), false)
  }

  /// Creates a pipeline that hands `config` to every stage and hook.
  pub fn with_config(
    base_directory: impl Into<PathBuf>,
    start_directory: Option<PathBuf>,
    options: PipelineOptions,
    config: ConfigContext<TData>,
  ) -> Self {
    Self::build(base_directory.into(), start_directory, options, config, true)
  }

  fn build(
    base_directory: PathBuf,
    start_directory: Option<PathBuf>,
    options: PipelineOptions,
    config: ConfigContext<TData>,
    config_supplied: bool,
  ) -> Self {
    let timestamp = options
      .timestamp
      .unwrap_or_else(|| chrono::Local::now().format(TIMESTAMP_FORMAT).to_string());
    let run_root = base_directory.join(format!("{}{}", RUN_ROOT_PREFIX, timestamp));

    let stack_seed = match (&start_directory, options.seed_stack_with_start) {
      (Some(start), true) => start
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty()),
      _ => None,
    };
    let start_directory = start_directory.unwrap_or(base_directory);

    event!(
      Level::DEBUG,
      run_root = %run_root.display(),
      start_directory = %start_directory.display(),
      naming = ?options.naming,
      "Pipeline created."
    );

    Self {
      stages: Vec::new(),
      enabled: HashMap::new(),
      full_execution: true,
      pre_hook: None,
      post_hook: None,
      config,
      config_supplied,
      run_root,
      current_directory: start_directory.clone(),
      start_directory,
      executed_stack: stack_seed.iter().cloned().collect(),
      stack_seed,
      naming: options.naming,
      verbose: options.verbose,
      timestamp,
    }
  }

  // --- Stage registry ---

  /// Appends a stage and returns its id. Ids count up from 0 in call order.
  ///
  /// `output_label` names the stage's output directory; pass `""` for a stage that
  /// works in place. Names need not be unique.
  pub fn add_stage(
    &mut self,
    name: impl Into<String>,
    output_label: impl Into<String>,
    transform: impl Fn(&Path, &Path, &ConfigContext<TData>) -> Result<(), Err> + Send + Sync + 'static,
  ) -> StageId {
    self.add_stage_with(name, output_label, FnTransform(transform))
  }

  /// Like `add_stage`, for transforms implemented as a type.
  pub fn add_stage_with(
    &mut self,
    name: impl Into<String>,
    output_label: impl Into<String>,
    transform: impl StageTransform<TData, Err> + 'static,
  ) -> StageId {
    let id = self.stages.len();
    let def = StageDef {
      id,
      name: name.into(),
      output_label: output_label.into(),
    };
    event!(Level::DEBUG, stage_id = id, stage_name = %def.name, output_label = %def.output_label, "Stage registered.");
    self.stages.push(Stage {
      def,
      transform: Box::new(transform),
    });
    self.enabled.insert(id, true);
    id
  }

  /// Resolves a reference to a stage id. Names match the first stage registered with them.
  pub fn resolve(&self, stage: &StageRef) -> Option<StageId> {
    match stage {
      StageRef::Id(id) => self.enabled.contains_key(id).then_some(*id),
      StageRef::Name(name) => self.stages.iter().find(|s| &s.def.name == name).map(|s| s.def.id),
    }
  }

  /// Turns a stage on or off. Returns whether the reference matched a stage.
  ///
  /// An unknown reference changes nothing; it is reported as a warning when verbose.
  pub fn enable(&mut self, stage: impl Into<StageRef>, value: bool) -> bool {
    let stage = stage.into();
    match self.try_enable(stage.clone(), value) {
      Ok(()) => true,
      Err(e) => {
        if self.verbose {
          event!(Level::WARN, stage = %stage, "{}", e);
        } else {
          event!(Level::DEBUG, stage = %stage, "{}", e);
        }
        false
      }
    }
  }

  /// Shorthand for `enable(stage, false)`.
  pub fn disable(&mut self, stage: impl Into<StageRef>) -> bool {
    self.enable(stage, false)
  }

  /// Like `enable`, but hands back `DirStageError::StageNotFound` for an unknown reference.
  pub fn try_enable(&mut self, stage: impl Into<StageRef>, value: bool) -> DirStageResult<()> {
    let stage = stage.into();
    let id = self.resolve(&stage).ok_or_else(|| DirStageError::StageNotFound {
      stage: stage.to_string(),
    })?;

    self.enabled.insert(id, value);
    if !value {
      self.full_execution = false;
    }
    if self.verbose {
      let state = if value { "enabled" } else { "disabled" };
      event!(Level::INFO, stage_id = id, stage_name = %self.stages[id].def.name, "Stage {}.", state);
    }
    Ok(())
  }

  /// `None` when the reference matches no stage.
  pub fn is_enabled(&self, stage: impl Into<StageRef>) -> Option<bool> {
    let id = self.resolve(&stage.into())?;
    self.enabled.get(&id).copied()
  }

  /// True until the first time any stage gets disabled. Re-enabling does not reset it.
  pub fn is_full_execution(&self) -> bool {
    self.full_execution
  }

  // --- Accessors ---

  pub fn stages(&self) -> impl Iterator<Item = &StageDef> {
    self.stages.iter().map(|s| &s.def)
  }

  pub fn stage_count(&self) -> usize {
    self.stages.len()
  }

  /// `<base_directory>/pipeline_output_<timestamp>`.
  pub fn run_root(&self) -> &Path {
    &self.run_root
  }

  pub fn logs_dir(&self) -> PathBuf {
    self.run_root.join(LOGS_SUBDIR)
  }

  pub fn start_directory(&self) -> &Path {
    &self.start_directory
  }

  pub fn current_directory(&self) -> &Path {
    &self.current_directory
  }

  /// Labels pushed so far under stacked naming (including a seed, if any).
  pub fn executed_labels(&self) -> &[String] {
    &self.executed_stack
  }

  pub fn timestamp(&self) -> &str {
    &self.timestamp
  }

  pub fn naming_mode(&self) -> NamingMode {
    self.naming
  }

  pub fn is_verbose(&self) -> bool {
    self.verbose
  }

  pub fn config(&self) -> &ConfigContext<TData> {
    &self.config
  }
}
