//! Caption generation for rendered promo videos.
//!
//! This crate provides:
//! - `CaptionSource` - the pipeline's text-generation boundary
//! - `CaptionClient` - reqwest client for an OpenAI-compatible
//!   chat-completions API

pub mod client;
pub mod error;

pub use client::{CaptionClient, CaptionConfig, CaptionSource};
pub use error::{CaptionError, CaptionResult};
