// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use dirstage::{ConfigContext, DirStageError, DirPipeline, PipelineOptions, StageDef};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::Level;

pub const TEST_TIMESTAMP: &str = "20240101_120000";

// --- Common Config Payload ---
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetParams {
  pub sample_rate: u32,
  pub notes: Vec<String>,
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("dirstage framework error: {0}")]
  DirStage(String), // Store as String for Eq comparison

  #[error("Test transform failed: {0}")]
  Transform(String),

  #[error("Test hook failed: {0}")]
  Hook(String),
}

impl From<DirStageError> for TestError {
  fn from(e: DirStageError) -> Self {
    TestError::DirStage(format!("{:?}", e))
  }
}

// --- Call recording ---
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
  Transform { stage: String, input: PathBuf, output: PathBuf },
  Pre { stage: String, dir: PathBuf },
  Post { stage: String, dir: PathBuf },
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Call>>>);

impl Recorder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&self, call: Call) {
    self.0.lock().push(call);
  }

  pub fn calls(&self) -> Vec<Call> {
    self.0.lock().clone()
  }

  pub fn transforms(&self) -> Vec<(String, PathBuf, PathBuf)> {
    self
      .calls()
      .into_iter()
      .filter_map(|c| match c {
        Call::Transform { stage, input, output } => Some((stage, input, output)),
        _ => None,
      })
      .collect()
  }

  pub fn transform_names(&self) -> Vec<String> {
    self.transforms().into_iter().map(|(name, _, _)| name).collect()
  }
}

// --- Common Transform Creators ---
pub fn recording_transform(
  recorder: &Recorder,
  stage: &'static str,
) -> impl Fn(&Path, &Path, &ConfigContext<()>) -> Result<(), TestError> + Send + Sync + 'static {
  let recorder = recorder.clone();
  move |input: &Path, output: &Path, _config: &ConfigContext<()>| {
    tracing::debug!(target: "test_transforms", stage, input = %input.display(), output = %output.display(), "transform called");
    recorder.push(Call::Transform {
      stage: stage.to_string(),
      input: input.to_path_buf(),
      output: output.to_path_buf(),
    });
    Ok(())
  }
}

pub fn failing_transform(
  recorder: &Recorder,
  stage: &'static str,
  message: &'static str,
) -> impl Fn(&Path, &Path, &ConfigContext<()>) -> Result<(), TestError> + Send + Sync + 'static {
  let recorder = recorder.clone();
  move |input: &Path, output: &Path, _config: &ConfigContext<()>| {
    recorder.push(Call::Transform {
      stage: stage.to_string(),
      input: input.to_path_buf(),
      output: output.to_path_buf(),
    });
    tracing::warn!(target: "test_transforms", stage, "failing with: '{}'", message);
    Err(TestError::Transform(message.to_string()))
  }
}

pub fn recording_pre_hook(
  recorder: &Recorder,
) -> impl Fn(&StageDef, &Path, &ConfigContext<()>) -> Result<(), TestError> + Send + Sync + 'static {
  let recorder = recorder.clone();
  move |stage: &StageDef, dir: &Path, _config: &ConfigContext<()>| {
    recorder.push(Call::Pre {
      stage: stage.name.clone(),
      dir: dir.to_path_buf(),
    });
    Ok(())
  }
}

pub fn recording_post_hook(
  recorder: &Recorder,
) -> impl Fn(&StageDef, &Path, &ConfigContext<()>) -> Result<(), TestError> + Send + Sync + 'static {
  let recorder = recorder.clone();
  move |stage: &StageDef, dir: &Path, _config: &ConfigContext<()>| {
    recorder.push(Call::Post {
      stage: stage.name.clone(),
      dir: dir.to_path_buf(),
    });
    Ok(())
  }
}

// --- Filesystem fixtures ---
pub struct Workspace {
  pub tmp: TempDir,
  pub base: PathBuf,
  pub start: PathBuf,
}

/// A temp base directory with a populated `original` start directory inside.
pub fn workspace() -> Workspace {
  let tmp = TempDir::new().expect("create temp dir");
  let base = tmp.path().to_path_buf();
  let start = base.join("original");
  std::fs::create_dir_all(&start).expect("create start dir");
  std::fs::write(start.join("clip_001.wav"), b"RIFF").expect("write sample file");
  Workspace { tmp, base, start }
}

pub fn options(naming: dirstage::NamingMode) -> PipelineOptions {
  PipelineOptions {
    naming,
    verbose: true,
    timestamp: Some(TEST_TIMESTAMP.to_string()),
    ..Default::default()
  }
}

pub fn flat_pipeline(ws: &Workspace) -> DirPipeline<(), TestError> {
  DirPipeline::new(&ws.base, Some(ws.start.clone()), options(dirstage::NamingMode::Flat))
}

pub fn stacked_pipeline(ws: &Workspace) -> DirPipeline<(), TestError> {
  DirPipeline::new(&ws.base, Some(ws.start.clone()), options(dirstage::NamingMode::Stacked))
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
