//! Shared data models for the clipcast render pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Render jobs and their service-assigned identifiers
//! - Render status classification and poll attempt diagnostics
//! - Pipeline outcomes and the invocation response surface

pub mod job;
pub mod outcome;
pub mod status;

pub use job::{RenderJob, RenderJobId};
pub use outcome::{DeliveryReceipt, InvocationResponse, PipelineOutcome, PipelineStage};
pub use status::{PollAttempt, RenderStatus};
