//! AI service integration for image generation
//!
//! Provides the service trait all editor modes call through, the Gemini
//! implementation, and a queued-response mock for tests.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiImageClient;
pub use mock::MockImageClient;

use crate::models::{GeneratedImage, ImageInput};
use crate::Result;
use async_trait::async_trait;

/// One remote call: ordered images plus one instruction, one image back.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate a single image from `images` (in selection order) and a
    /// free-text `prompt`. Image parts precede the text part on the wire,
    /// and their relative order is semantic (style transfer sends
    /// [content, style]).
    async fn generate(&self, prompt: &str, images: Vec<ImageInput>) -> Result<GeneratedImage>;
}
