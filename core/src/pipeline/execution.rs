// dirstage/src/pipeline/execution.rs

//! Contains `DirPipeline::execute()`, which walks the registered stages in order and
//! moves the directory cursor from one stage's output to the next.

use crate::core::control::RunSummary;
use crate::error::DirStageError;
use crate::naming;
use crate::pipeline::definition::DirPipeline;
use tracing::{event, instrument, span, Level};

impl<TData, Err> DirPipeline<TData, Err>
where
  TData: Send + Sync + 'static,
  Err: std::error::Error + From<DirStageError> + Send + Sync + 'static,
{
  /// Runs every enabled stage, in registration order.
  ///
  /// For each enabled stage: pre-hook, resolve and create the output directory,
  /// run the transform on `(current, next)`, move the cursor to `next`, post-hook.
  /// Disabled stages are skipped without touching hooks, directories or the cursor.
  ///
  /// The first error from a transform or hook is returned as is and nothing after it
  /// runs. Directories already created stay on disk and the cursor stays where it was.
  /// A directory that cannot be created is reported as `DirStageError::Filesystem`
  /// converted into `Err`.
  ///
  /// Every call starts again from the start directory with a fresh label stack.
  #[instrument(
    name = "DirPipeline::execute",
    skip_all,
    fields(
      run_root = %self.run_root.display(),
      naming = ?self.naming,
      num_stages = self.stages.len(),
    ),
    err(Display)
  )]
  pub fn execute(&mut self) -> Result<RunSummary, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    self.current_directory = self.start_directory.clone();
    self.executed_stack = self.stack_seed.iter().cloned().collect();

    self.inject_config()?;

    let mut summary = RunSummary {
      executed: Vec::new(),
      skipped: Vec::new(),
      final_directory: self.current_directory.clone(),
    };

    for stage in &self.stages {
      let def = &stage.def;
      let stage_span = span!(
        Level::INFO,
        "pipeline_stage_execution",
        stage_id = def.id,
        stage_name = %def.name,
      );
      let _stage_span_guard = stage_span.enter();

      if !self.enabled.get(&def.id).copied().unwrap_or(false) {
        if self.verbose {
          event!(Level::INFO, "Stage {} is skipped.", def);
        }
        summary.skipped.push(def.id);
        continue;
      }

      if let Some(hook) = &self.pre_hook {
        if self.verbose {
          event!(Level::INFO, "Executing pre-stage hook.");
        }
        hook(def, &self.current_directory, &self.config).map_err(|e| {
          event!(Level::ERROR, error = %e, "Pre-stage hook failed.");
          e
        })?;
      }

      let next_directory = naming::next_directory(
        self.naming,
        &mut self.executed_stack,
        &def.output_label,
        &self.run_root,
        &self.current_directory,
      );
      if def.changes_directory() {
        naming::materialize(&next_directory).map_err(|e| {
          event!(Level::ERROR, error = %e, "Could not create stage output directory.");
          Err::from(e)
        })?;
      }

      if self.verbose {
        event!(Level::INFO, "Stage {}: {}, {}", def.id, def.name, def.output_label);
        event!(Level::INFO, " - Input directory: {}", self.current_directory.display());
        if def.changes_directory() {
          event!(Level::INFO, " - Output directory: {}", next_directory.display());
        }
      }

      stage
        .transform
        .run(&self.current_directory, &next_directory, &self.config)
        .map_err(|e| {
          event!(Level::ERROR, error = %e, "Stage transform failed.");
          e
        })?;
      self.current_directory = next_directory;
      summary.executed.push(def.id);

      if let Some(hook) = &self.post_hook {
        if self.verbose {
          event!(Level::INFO, "Executing post-stage hook.");
        }
        hook(def, &self.current_directory, &self.config).map_err(|e| {
          event!(Level::ERROR, error = %e, "Post-stage hook failed.");
          e
        })?;
      }
      event!(Level::DEBUG, "Stage finished successfully.");
    }

    summary.final_directory = self.current_directory.clone();
    if self.verbose {
      event!(Level::INFO, "Pipeline execution complete.");
    }
    event!(
      Level::DEBUG,
      executed = summary.executed.len(),
      skipped = summary.skipped.len(),
      "Pipeline execution completed successfully."
    );
    Ok(summary)
  }

  /// Writes `logs_dir` and `timestamp` into a caller-supplied config and creates the
  /// logs directory. Does nothing when no config was supplied.
  fn inject_config(&self) -> Result<(), Err> {
    if !self.config_supplied {
      event!(Level::TRACE, "No caller config; skipping injection.");
      return Ok(());
    }

    let logs_dir = self.logs_dir();
    naming::materialize(&logs_dir).map_err(Err::from)?;

    let mut config = self.config.write();
    config.logs_dir = Some(logs_dir);
    config.timestamp = Some(self.timestamp.clone());
    event!(Level::DEBUG, logs_dir = ?config.logs_dir, timestamp = %self.timestamp, "Config injected.");
    Ok(())
  }
}
