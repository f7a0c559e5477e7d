pub mod config;
pub mod control;
pub mod stage;
pub mod transform;

// Re-export key types for easier access from other modules (and lib.rs)
pub use config::{ConfigContext, PipelineConfig};
pub use control::RunSummary;
pub use stage::{StageDef, StageId, StageRef};
pub use transform::{Hook, StageTransform};
