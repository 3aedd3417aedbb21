//! Queued-response mock of [`ImageGenerationService`] for tests.

use super::ImageGenerationService;
use crate::models::{GeneratedImage, ImageInput};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Records one received request: the prompt and the image payloads.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub prompt: String,
    pub images: Vec<ImageInput>,
}

/// Mock client that answers from a per-payload response map (or a default)
/// and records every request it sees.
///
/// Bulk tests key responses by the first image's bytes so each input can be
/// tagged with a distinct result regardless of completion order.
#[derive(Clone, Default)]
pub struct MockImageClient {
    responses_by_payload: Arc<Mutex<HashMap<Vec<u8>, String>>>,
    failures_by_payload: Arc<Mutex<HashMap<Vec<u8>, String>>>,
    default_response: Arc<Mutex<Option<String>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer any request with this base64 payload unless a per-payload
    /// entry matches first.
    pub fn with_default_response(self, base64_data: impl Into<String>) -> Self {
        *self.default_response.lock().unwrap() = Some(base64_data.into());
        self
    }

    /// Answer requests whose first image has these bytes with the given
    /// base64 payload.
    pub fn with_response_for(self, payload: Vec<u8>, base64_data: impl Into<String>) -> Self {
        self.responses_by_payload
            .lock()
            .unwrap()
            .insert(payload, base64_data.into());
        self
    }

    /// Fail requests whose first image has these bytes.
    pub fn with_failure_for(self, payload: Vec<u8>, message: impl Into<String>) -> Self {
        self.failures_by_payload
            .lock()
            .unwrap()
            .insert(payload, message.into());
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate(&self, prompt: &str, images: Vec<ImageInput>) -> Result<GeneratedImage> {
        self.requests.lock().unwrap().push(RecordedRequest {
            prompt: prompt.to_string(),
            images: images.clone(),
        });

        let key = images.first().map(|i| i.data.clone()).unwrap_or_default();

        if let Some(message) = self.failures_by_payload.lock().unwrap().get(&key) {
            return Err(Error::Api(message.clone()));
        }

        if let Some(base64_data) = self.responses_by_payload.lock().unwrap().get(&key) {
            return Ok(GeneratedImage::from_base64(base64_data.clone()));
        }

        match self.default_response.lock().unwrap().as_ref() {
            Some(base64_data) => Ok(GeneratedImage::from_base64(base64_data.clone())),
            // Tiny deterministic payload so tests without explicit setup
            // still get a structurally valid result.
            None => Ok(GeneratedImage::from_base64("iVBORw0KGgo=")),
        }
    }
}
