//! Request adapter for Gemini image generation/editing.

use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::ImageGenerationService;
use crate::models::{GeneratedImage, ImageInput};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Finish reason reported on normal completion.
const FINISH_REASON_STOP: &str = "STOP";

#[derive(Debug, Serialize)]
struct ImageRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    response_modalities: Vec<String>,
}

/// Gemini-backed [`ImageGenerationService`].
///
/// Issues exactly one `generateContent` call per invocation, with image
/// parts in caller order followed by a single text part, and extracts one
/// generated image from the first candidate.
pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }

    /// Point the adapter at a different endpoint; used by tests to target a
    /// local mock server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    fn build_request(prompt: &str, images: &[ImageInput]) -> ImageRequest {
        // Image parts first, in selection order, then the instruction.
        // Style transfer depends on part 0 = content, part 1 = style, so
        // this order must never be permuted.
        let mut parts: Vec<Part> = images
            .iter()
            .map(|image| Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.base64_data(),
                },
            })
            .collect();
        parts.push(Part::Text {
            text: prompt.to_string(),
        });

        ImageRequest {
            contents: vec![Content { role: None, parts }],
            generation_config: ImageGenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            },
        }
    }

    fn extract_image(response: GenerateContentResponse) -> Result<GeneratedImage> {
        // Only the first candidate is consulted; this is a single-result
        // contract and any further candidates are ignored.
        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            tracing::error!("Gemini returned zero candidates");
            Error::NoCandidates
        })?;

        if let Some(content) = &candidate.content {
            for part in &content.parts {
                if let Part::InlineData { inline_data } = part {
                    tracing::debug!(
                        "Gemini returned image with mime_type: {}",
                        inline_data.mime_type
                    );
                    // The data URI is always labelled image/png regardless
                    // of the declared mime type, matching the upstream
                    // contract.
                    return Ok(GeneratedImage::from_base64(inline_data.data.clone()));
                }
            }
        }

        match candidate.finish_reason {
            Some(reason) if reason != FINISH_REASON_STOP => {
                tracing::error!("Gemini finished without an image: {}", reason);
                Err(Error::ContentPolicy(reason))
            }
            _ => {
                tracing::error!("Gemini response carried no inline image data");
                Err(Error::NoImageData)
            }
        }
    }
}

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate(&self, prompt: &str, images: Vec<ImageInput>) -> Result<GeneratedImage> {
        let request = Self::build_request(prompt, &images);

        tracing::debug!(
            "Sending generateContent request with {} image part(s)",
            images.len()
        );

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;
        Self::extract_image(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use wiremock::matchers::{body_string_contains, method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

    fn make_client(server: &MockServer) -> GeminiImageClient {
        GeminiImageClient::new("key".to_string(), DEFAULT_MODEL.to_string())
            .with_base_url(server.uri())
    }

    fn generate_content_mock() -> wiremock::MockBuilder {
        Mock::given(method("POST")).and(path_regex(r"^/v1beta/models/.*:generateContent$"))
    }

    fn png_input() -> ImageInput {
        ImageInput::new(vec![0x89, 0x50, 0x4E, 0x47], "image/png")
    }

    #[tokio::test]
    async fn test_generate_returns_png_data_uri() {
        let server = MockServer::start().await;

        let b64 = base64::engine::general_purpose::STANDARD.encode([0xAB, 0xCD]);
        generate_content_mock()
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{
                            "inlineData": { "mimeType": "image/webp", "data": b64 }
                        }]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let result = client
            .generate("a new pose", vec![png_input()])
            .await
            .unwrap();

        // The URI prefix is image/png even though the part declared webp.
        assert_eq!(result.data_uri(), format!("data:image/png;base64,{}", b64));
    }

    #[tokio::test]
    async fn test_generate_sends_images_before_text() {
        let server = MockServer::start().await;

        let content = ImageInput::new(vec![0x01], "image/png");
        let style = ImageInput::new(vec![0x02], "image/jpeg");
        let content_b64 = content.base64_data();
        let style_b64 = style.base64_data();

        let b64 = base64::engine::general_purpose::STANDARD.encode([0x00]);
        generate_content_mock()
            .and(body_string_contains("\"responseModalities\":[\"IMAGE\"]"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "inlineData": { "mimeType": "image/png", "data": b64 } }]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server);
        client
            .generate("restyle the content image", vec![content, style])
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8(requests[0].body.clone()).unwrap();

        // Exact part order: content image, style image, then the prompt.
        let content_pos = body.find(&content_b64).unwrap();
        let style_pos = body.find(&style_b64).unwrap();
        let text_pos = body.find("restyle the content image").unwrap();
        assert!(content_pos < style_pos);
        assert!(style_pos < text_pos);
    }

    #[tokio::test]
    async fn test_generate_fails_on_zero_candidates() {
        let server = MockServer::start().await;

        generate_content_mock()
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
            )
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client
            .generate("a new pose", vec![png_input()])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoCandidates));
        assert!(err.to_string().contains("No candidates"));
    }

    #[tokio::test]
    async fn test_generate_surfaces_safety_finish_reason() {
        let server = MockServer::start().await;

        generate_content_mock()
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [] },
                    "finishReason": "SAFETY"
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client
            .generate("something filtered", vec![png_input()])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ContentPolicy(_)));
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_generate_fails_generically_without_image_on_stop() {
        let server = MockServer::start().await;

        generate_content_mock()
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "prose instead of pixels" }] },
                    "finishReason": "STOP"
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client
            .generate("a new pose", vec![png_input()])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoImageData));
    }

    #[tokio::test]
    async fn test_api_error_is_wrapped_uniformly() {
        let server = MockServer::start().await;

        generate_content_mock()
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client
            .generate("a new pose", vec![png_input()])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_only_first_candidate_is_consulted() {
        let server = MockServer::start().await;

        let second = base64::engine::general_purpose::STANDARD.encode([0xFF]);
        generate_content_mock()
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "no image" }] }, "finishReason": "STOP" },
                    { "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": second } }] } }
                ]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client
            .generate("a new pose", vec![png_input()])
            .await
            .unwrap_err();

        // The second candidate's image must not be used.
        assert!(matches!(err, Error::NoImageData));
    }
}
