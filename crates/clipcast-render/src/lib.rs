//! Render service client.
//!
//! This crate drives template renders through the rendering service:
//! - `RenderClient` - submits renders and queries their status
//! - `StatusPoller` - drives a submitted render to a terminal state under
//!   a bounded attempt budget
//! - Wire types tolerant of the service's object-or-array submission
//!   response

pub mod client;
pub mod error;
pub mod poller;
pub mod types;


pub use client::{RenderClient, RenderConfig};
pub use error::{RenderError, RenderResult};
pub use poller::StatusPoller;
