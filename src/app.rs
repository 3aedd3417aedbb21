//! Application orchestration for the editor modes.
//!
//! Validates each mode's preconditions before any network call, loads the
//! selected files, dispatches to a single generation or the bulk fan-out,
//! and writes results to the output directory.

use crate::ai::{GeminiImageClient, ImageGenerationService};
use crate::bulk::bulk_generate;
use crate::config::Config;
use crate::files::{load_images, save_result};
use crate::models::{EditorMode, GeneratedImage, ImageInput};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Runs editor modes against an injected generation service.
pub struct App {
    service: Arc<dyn ImageGenerationService>,
}

impl App {
    /// Build an app from a concrete service. Primarily useful for tests
    /// and harnesses that inject mocks.
    pub fn with_service(service: Arc<dyn ImageGenerationService>) -> Self {
        Self { service }
    }

    /// Construct an app backed by the real Gemini client, with the API key
    /// resolved once from configuration.
    pub fn from_config(config: &Config) -> Self {
        info!("Image provider: Gemini (model: {})", config.image_model);
        Self::with_service(Arc::new(GeminiImageClient::new(
            config.gemini_api_key.clone(),
            config.image_model.clone(),
        )))
    }

    /// Run one editor mode over the selected files and write the generated
    /// image(s) into `output_dir`. Returns the written paths in input order.
    pub async fn run_mode(
        &self,
        mode: EditorMode,
        prompt: &str,
        paths: &[PathBuf],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let config = mode.config();
        info!("{}", config.title);

        let images = load_images(paths, config.max_files)?;
        self.validate(mode, prompt, &images)?;

        let results = match mode {
            EditorMode::BulkProcess => {
                bulk_generate(Arc::clone(&self.service), prompt, images).await?
            }
            _ => vec![self.service.generate(prompt, images).await?],
        };

        let mut written = Vec::with_capacity(results.len());
        for (index, image) in results.iter().enumerate() {
            let bulk_index = (mode == EditorMode::BulkProcess).then_some(index);
            let path = save_result(output_dir, mode, bulk_index, image)?;
            info!("Saved result to {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    /// Generate without touching the filesystem; used for chained edits
    /// where the result feeds straight back in as a new input.
    pub async fn generate(
        &self,
        mode: EditorMode,
        prompt: &str,
        images: Vec<ImageInput>,
    ) -> Result<GeneratedImage> {
        self.validate(mode, prompt, &images)?;
        self.service.generate(prompt, images).await
    }

    fn validate(&self, mode: EditorMode, prompt: &str, images: &[ImageInput]) -> Result<()> {
        if images.is_empty() {
            return Err(Error::Validation(
                "Please upload at least one image and provide a prompt.".to_string(),
            ));
        }
        if prompt.trim().is_empty() {
            return Err(Error::Validation(
                "Please provide a prompt describing the change you want.".to_string(),
            ));
        }
        // Style transfer is positional: part 0 is the content image, part 1
        // the style reference. Both must be present.
        if mode == EditorMode::StyleTransfer && images.len() != 2 {
            return Err(Error::Validation(
                "Style transfer needs exactly two images: content first, then style.".to_string(),
            ));
        }
        Ok(())
    }
}
