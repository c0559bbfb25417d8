//! Promo-video pipeline orchestration.
//!
//! This crate sequences one short-lived invocation end to end:
//! caption generation, render submission, status polling, and asset
//! delivery. It provides:
//! - `Pipeline` - the orchestrator; every stage failure folds into a
//!   `PipelineOutcome` instead of escaping
//! - `ResultHandoff` - the delivery boundary, with a storage-backed
//!   implementation
//! - `PipelineConfig` - environment-driven configuration for one run

pub mod config;
pub mod error;
pub mod handoff;
pub mod pipeline;

pub use config::{PipelineConfig, TemplateSpec};
pub use error::{PipelineError, PipelineResult};
pub use handoff::{ResultHandoff, StorageHandoff};
pub use pipeline::Pipeline;
