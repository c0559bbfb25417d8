//! Render service wire types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Submission request body.
#[derive(Debug, Serialize)]
pub struct SubmitRenderRequest<'a> {
    pub template_id: &'a str,
    pub modifications: &'a HashMap<String, String>,
}

/// One job descriptor as returned by the submission endpoint.
///
/// The service reports more fields than this; the id is the only part the
/// pipeline treats as the job descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderDescriptor {
    #[serde(default)]
    pub id: Option<String>,
}

/// Submission response body.
///
/// The service answers with a single descriptor or an array of them
/// depending on how the render was enqueued. Both shapes are accepted
/// here so callers never see the difference.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SubmitRenderResponse {
    Many(Vec<RenderDescriptor>),
    One(RenderDescriptor),
}

impl SubmitRenderResponse {
    /// The descriptor this response designates: the single object, or the
    /// first element of the array form.
    pub fn into_descriptor(self) -> Option<RenderDescriptor> {
        match self {
            Self::One(descriptor) => Some(descriptor),
            Self::Many(descriptors) => descriptors.into_iter().next(),
        }
    }
}

/// Status query response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderStatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_object_response_normalizes() {
        let response: SubmitRenderResponse =
            serde_json::from_value(json!({ "id": "r1", "status": "planned" })).unwrap();
        let descriptor = response.into_descriptor().unwrap();
        assert_eq!(descriptor.id.as_deref(), Some("r1"));
    }

    #[test]
    fn test_array_response_takes_first_descriptor() {
        let response: SubmitRenderResponse =
            serde_json::from_value(json!([{ "id": "r1" }, { "id": "r2" }])).unwrap();
        let descriptor = response.into_descriptor().unwrap();
        assert_eq!(descriptor.id.as_deref(), Some("r1"));
    }

    #[test]
    fn test_empty_shapes_yield_no_id() {
        let response: SubmitRenderResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_descriptor().unwrap().id.is_none());

        let response: SubmitRenderResponse = serde_json::from_value(json!([])).unwrap();
        assert!(response.into_descriptor().is_none());
    }

    #[test]
    fn test_status_response_tolerates_missing_fields() {
        let report: RenderStatusResponse = serde_json::from_value(json!({})).unwrap();
        assert!(report.status.is_none());
        assert!(report.url.is_none());

        let report: RenderStatusResponse =
            serde_json::from_value(json!({ "status": "finished", "url": "https://a/b.mp4" }))
                .unwrap();
        assert_eq!(report.status.as_deref(), Some("finished"));
        assert_eq!(report.url.as_deref(), Some("https://a/b.mp4"));
    }
}
