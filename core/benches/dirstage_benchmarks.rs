use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dirstage::naming::next_directory;
use dirstage::{ConfigContext, DirPipeline, NamingMode, PipelineOptions};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Clone, Debug, Default)]
struct BenchParams {
  touched: u64,
}

fn build_pipeline(base: &Path, num_stages: usize, naming: NamingMode, labelled: bool) -> DirPipeline<BenchParams> {
  let mut pipeline = DirPipeline::with_config(
    base,
    None,
    PipelineOptions {
      naming,
      timestamp: Some("bench".to_string()),
      ..Default::default()
    },
    ConfigContext::new(BenchParams::default()),
  );
  for i in 0..num_stages {
    let label = if labelled { format!("s{}", i) } else { String::new() };
    pipeline.add_stage(format!("stage_{}", i), label, |_input, _output, config| {
      config.params_mut().touched += 1;
      Ok(())
    });
  }
  pipeline
}

// --- Benchmark Functions ---

fn bench_execute(c: &mut Criterion) {
  let mut group = c.benchmark_group("Execute");

  for num_stages in [1usize, 5, 20] {
    for (mode_name, naming) in [("flat", NamingMode::Flat), ("stacked", NamingMode::Stacked)] {
      for labelled in [false, true] {
        let tmp = TempDir::new().unwrap();
        let mut pipeline = build_pipeline(tmp.path(), num_stages, naming, labelled);
        // First run pays for directory creation; measure the steady state.
        pipeline.execute().unwrap();

        group.throughput(Throughput::Elements(num_stages as u64));
        group.bench_with_input(
          BenchmarkId::new(
            format!("{}_{}", mode_name, if labelled { "labelled" } else { "in_place" }),
            num_stages,
          ),
          &num_stages,
          |b, _| b.iter(|| pipeline.execute().unwrap()),
        );
      }
    }
  }
  group.finish();
}

fn bench_skipped_stages(c: &mut Criterion) {
  let mut group = c.benchmark_group("SkippedStages");
  let tmp = TempDir::new().unwrap();
  let mut pipeline = build_pipeline(tmp.path(), 50, NamingMode::Flat, true);
  for id in (0..50usize).step_by(2) {
    pipeline.disable(id);
  }
  pipeline.execute().unwrap();

  group.bench_function("half_disabled_50", |b| b.iter(|| pipeline.execute().unwrap()));
  group.finish();
}

fn bench_naming_policy(c: &mut Criterion) {
  let mut group = c.benchmark_group("NamingPolicy");
  let root = PathBuf::from("/data/pipeline_output_bench");
  let labels: Vec<String> = (0..20).map(|i| format!("label{}", i)).collect();

  for (mode_name, naming) in [("flat", NamingMode::Flat), ("stacked", NamingMode::Stacked)] {
    group.bench_function(format!("{}_20_labels", mode_name), |b| {
      b.iter(|| {
        let mut stack = Vec::new();
        let mut current = root.clone();
        for label in &labels {
          current = next_directory(naming, &mut stack, label, &root, &current);
        }
        current
      })
    });
  }
  group.finish();
}

criterion_group!(benches, bench_execute, bench_skipped_stages, bench_naming_policy);
criterion_main!(benches);
