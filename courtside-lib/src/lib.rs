//! Orchestration for the courtside collection pipeline: configuration,
//! the fetch-retry-checkpoint engine, consolidation, resume and transform.

pub mod append;
pub mod checkpoint;
pub mod config;
pub mod consolidate;
pub mod engine;
pub mod enumerate;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod resume;
pub mod retry;
pub mod settings;
pub mod source;
pub mod transform;

pub use checkpoint::CheckpointLayout;
pub use config::{EngineSettings, Paths, PipelineConfig};
pub use consolidate::Consolidation;
pub use engine::Engine;
pub use enumerate::enumerate;
pub use pipeline::PipelineRun;
pub use error::{FetchError, PipelineError};
pub use report::{EngineEvent, RunReport};
pub use retry::RetryPolicy;
pub use source::{ItemFetcher, ItemTables, ScopeSource};
pub use transform::{CsvWarehouse, Warehouse};
