//! Render job types.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Service-assigned identifier of a render job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderJobId(String);

impl RenderJobId {
    /// Wrap an identifier reported by the render service.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RenderJobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A render accepted by the rendering service.
///
/// Created when a submission is acknowledged; immutable for the rest of
/// the invocation and discarded when the invocation ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderJob {
    /// Identifier assigned by the render service.
    pub id: RenderJobId,
    /// Modification map the job was submitted with.
    pub modifications: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_roundtrip() {
        let id = RenderJobId::new("render-123");
        assert_eq!(id.as_str(), "render-123");
        assert_eq!(id.to_string(), "render-123");
    }

    #[test]
    fn test_job_id_serializes_transparent() {
        let id = RenderJobId::new("abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc\"");

        let back: RenderJobId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
