// dirstage/examples/dataset_preprocessing.rs

use anyhow::Context;
use dirstage::{ConfigContext, DirPipeline, DirStageError, NamingMode, PipelineOptions, StageDef};
use std::path::Path;
use tracing::info;

// 1. Define the parameters the stages share
#[derive(Clone, Debug, Default)]
struct AudioParams {
  target_sample_rate: u32,
  processed_files: usize,
}

fn copy_all(input: &Path, output: &Path, rename: impl Fn(&str) -> String) -> anyhow::Result<usize> {
  let mut copied = 0;
  for entry in std::fs::read_dir(input).with_context(|| format!("reading {}", input.display()))? {
    let entry = entry?;
    if !entry.file_type()?.is_file() {
      continue;
    }
    let name = rename(&entry.file_name().to_string_lossy());
    std::fs::copy(entry.path(), output.join(&name)).with_context(|| format!("copying {}", name))?;
    copied += 1;
  }
  Ok(copied)
}

fn main() -> Result<(), DirStageError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Dataset Preprocessing Example ---");

  // 2. A throwaway dataset to work on
  let workdir = std::env::temp_dir().join("dirstage_demo");
  let original = workdir.join("ESC50");
  std::fs::create_dir_all(&original).map_err(anyhow::Error::from)?;
  for i in 0..3 {
    std::fs::write(original.join(format!("Dog Bark {}.wav", i)), b"RIFF....WAVE").map_err(anyhow::Error::from)?;
  }

  // 3. Create the pipeline; stacked names make the output history readable
  let config = ConfigContext::new(AudioParams {
    target_sample_rate: 16_000,
    processed_files: 0,
  });
  let mut pipeline: DirPipeline<AudioParams> = DirPipeline::with_config(
    &workdir,
    Some(original.clone()),
    PipelineOptions {
      naming: NamingMode::Stacked,
      verbose: true,
      seed_stack_with_start: true,
      timestamp: None,
    },
    config.clone(),
  );

  // 4. Register the stages
  pipeline.add_stage("rename", "renamed", |input, output, config| {
    let copied = copy_all(input, output, |name| name.to_lowercase().replace(' ', "_"))?;
    config.params_mut().processed_files += copied;
    Ok(())
  });
  pipeline.add_stage("trim", "trimmed", |input, output, _config| {
    copy_all(input, output, str::to_string)?;
    Ok(())
  });
  pipeline.add_stage("resample", "resampled", |input, output, config| {
    let rate = config.params().target_sample_rate;
    copy_all(input, output, |name| name.replace(".wav", &format!("_{}hz.wav", rate)))?;
    Ok(())
  });
  pipeline.add_stage("report", "", |input, _output, config| {
    let logs_dir = config
      .logs_dir()
      .ok_or_else(|| DirStageError::Internal("logs_dir was not injected".to_string()))?;
    let listing: Vec<String> = std::fs::read_dir(input)
      .map_err(anyhow::Error::from)?
      .filter_map(|e| e.ok())
      .map(|e| e.file_name().to_string_lossy().into_owned())
      .collect();
    std::fs::write(logs_dir.join("final_listing.txt"), listing.join("\n")).map_err(anyhow::Error::from)?;
    Ok(())
  });

  // 5. Skip a stage without touching the glue code
  pipeline.disable("trim");

  // 6. Hooks
  pipeline.set_pre_hook(|stage: &StageDef, dir: &Path, _config: &ConfigContext<AudioParams>| {
    info!("about to run {} on {}", stage, dir.display());
    Ok(())
  });
  pipeline.set_post_hook(|stage: &StageDef, dir: &Path, _config: &ConfigContext<AudioParams>| {
    info!("{} left its output in {}", stage.name, dir.display());
    Ok(())
  });

  // 7. Run it
  let summary = pipeline.execute()?;

  info!("Executed stages: {:?}, skipped: {:?}", summary.executed, summary.skipped);
  info!("Final directory: {}", summary.final_directory.display());
  info!("Full execution: {}", pipeline.is_full_execution());
  info!("Files processed by rename: {}", config.params().processed_files);

  assert_eq!(
    summary.final_directory,
    pipeline.run_root().join("ESC50_renamed_resampled")
  );
  Ok(())
}
