//! Bulk orchestration: one shared prompt fanned out over many images.
//!
//! Each input image becomes an independent one-image generation job; jobs
//! are never batched into a single remote call. All jobs start at once with
//! no concurrency cap, and the batch is all-or-nothing: the first failure
//! aborts the remaining jobs and discards any completed results.

use crate::ai::ImageGenerationService;
use crate::models::{GeneratedImage, ImageInput};
use crate::{Error, Result};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Run one generation job per input image, all sharing `prompt`.
///
/// On success the results are re-associated to input order: `result[i]`
/// was generated from `images[i]`. On the first observed failure the
/// remaining jobs are aborted and that failure is returned; partial
/// successes are never surfaced.
pub async fn bulk_generate(
    service: Arc<dyn ImageGenerationService>,
    prompt: &str,
    images: Vec<ImageInput>,
) -> Result<Vec<GeneratedImage>> {
    let total = images.len();
    tracing::info!("Starting bulk generation for {} image(s)", total);

    let mut jobs = JoinSet::new();
    for (index, image) in images.into_iter().enumerate() {
        let service = Arc::clone(&service);
        let prompt = prompt.to_string();
        jobs.spawn(async move {
            let result = service.generate(&prompt, vec![image]).await;
            (index, result)
        });
    }

    let mut results: Vec<Option<GeneratedImage>> = (0..total).map(|_| None).collect();

    while let Some(joined) = jobs.join_next().await {
        let (index, result) = joined.map_err(|e| Error::Invariant(format!("Bulk job panicked: {}", e)))?;
        match result {
            Ok(image) => {
                tracing::debug!("Bulk job {}/{} completed", index + 1, total);
                results[index] = Some(image);
            }
            Err(e) => {
                tracing::error!("Bulk job {}/{} failed: {}", index + 1, total, e);
                jobs.abort_all();
                return Err(e);
            }
        }
    }

    results
        .into_iter()
        .map(|r| r.ok_or_else(|| Error::Invariant("Bulk job produced no result".to_string())))
        .collect()
}
