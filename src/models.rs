//! Data models and structures
//!
//! Defines the image payload types exchanged with the generation service
//! and the per-mode editor configuration carried over from the web UI.

use crate::{Error, Result};
use base64::Engine as _;

/// Media type synthesized for every successful generation result.
///
/// The API response declares its own mime type per part, but the success
/// path always labels the data URI `image/png`. This mirrors the upstream
/// behavior exactly and is intentional, not an oversight.
pub const RESULT_MIME_TYPE: &str = "image/png";

/// An opaque binary image plus its media-type label.
///
/// Built once from a user-selected file (or a previous result) and moved
/// by value into the generation request; selection order is preserved all
/// the way to the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInput {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl ImageInput {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    /// Base64 payload as sent inline to the API.
    pub fn base64_data(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// A single generated image, held as the base64 payload returned by the
/// API and rendered as a self-describing data URI.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    base64_data: String,
}

impl GeneratedImage {
    pub fn from_base64(base64_data: impl Into<String>) -> Self {
        Self {
            base64_data: base64_data.into(),
        }
    }

    /// `data:image/png;base64,<payload>`, ready for display or download.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", RESULT_MIME_TYPE, self.base64_data)
    }

    /// Raw image bytes, for writing the result to disk.
    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.base64_data)
            .map_err(|e| Error::Api(format!("Failed to decode base64 image: {}", e)))
    }

    /// Turn this result into a fresh input so a follow-up edit replaces the
    /// previous image rather than accumulating onto it.
    pub fn into_input(self) -> Result<ImageInput> {
        let data = self.decode()?;
        Ok(ImageInput::new(data, RESULT_MIME_TYPE))
    }
}

/// The five editor modes of the lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Variations,
    Merge,
    Edit,
    StyleTransfer,
    BulkProcess,
}

/// Per-mode UI configuration: title, blurb, upload cap, and the example
/// prompt shown as a placeholder.
#[derive(Debug, Clone)]
pub struct ModeConfig {
    pub title: &'static str,
    pub description: &'static str,
    pub max_files: usize,
    pub prompt_placeholder: &'static str,
}

impl EditorMode {
    pub fn config(self) -> ModeConfig {
        match self {
            EditorMode::Variations => ModeConfig {
                title: "Generate Image Variations",
                description: "Upload a mascot or drawing to generate different postures or angles.",
                max_files: 1,
                prompt_placeholder: "e.g., a full body shot, in a fighting pose, pixel art style",
            },
            EditorMode::Merge => ModeConfig {
                title: "Merge Image Elements",
                description: "Upload a few images to merge their elements into a new scene.",
                max_files: 5,
                prompt_placeholder: "e.g., a bear driving a car while holding a cup",
            },
            EditorMode::Edit => ModeConfig {
                title: "Edit an Image",
                description: "Upload an image and use a prompt to add or remove elements.",
                max_files: 1,
                prompt_placeholder: "e.g., remove the person in the background, add a hat on the cat",
            },
            EditorMode::StyleTransfer => ModeConfig {
                title: "Transfer Image Style",
                description: "Apply the style of a reference image to a content image.",
                // Content image plus style reference.
                max_files: 2,
                prompt_placeholder:
                    "e.g., convert the content image to the style of the reference, make it a watercolor painting",
            },
            EditorMode::BulkProcess => ModeConfig {
                title: "Bulk Image Processing",
                description: "Upload multiple images and apply the same prompt to all of them.",
                max_files: 20,
                prompt_placeholder: "e.g., apply a vintage photo filter, convert to cartoon style",
            },
        }
    }

    /// Prefix for downloaded filenames, matching the web UI's naming.
    pub fn download_prefix(self) -> &'static str {
        match self {
            EditorMode::StyleTransfer => "gemini-styled",
            EditorMode::BulkProcess => "gemini-bulk",
            _ => "gemini-generated",
        }
    }
}
