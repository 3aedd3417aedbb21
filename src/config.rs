//! Environment configuration
//!
//! Resolves the Gemini credential and model once at startup so the API key
//! is injected into the client at construction time rather than read from
//! the environment on every call. A missing key is a typed error surfaced
//! before any network activity.

use crate::{Error, Result};

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub image_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .map_err(|_| Error::MissingApiKey)?,
            image_model: std::env::var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
        })
    }
}
