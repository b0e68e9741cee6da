//! Image orchestrator: object listing, primary-object selection, scene
//! description, and bounding-box localization combined into one result.
//!
//! Any adapter failure or an empty object list aborts the whole analysis;
//! no partial record is ever returned.

use super::detector::{best_box, ObjectDetector};
use super::{describe, objects};
use crate::error::CoreError;
use crate::llm::{ImageInput, LlmProvider};
use crate::types::ImageAnalysis;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Confidence reported when the detector returned no candidates for the
/// primary object.
const FALLBACK_CONFIDENCE: f32 = 0.85;

/// Seam for choosing the primary object from the listing.
///
/// Injectable so tests can pin the choice while production stays random.
pub trait ObjectSelector: Send {
    /// Index of the chosen object, or `None` for an empty slice.
    fn select(&mut self, objects: &[String]) -> Option<usize>;
}

/// Uniform random selection.
pub struct RandomSelector;

impl ObjectSelector for RandomSelector {
    fn select(&mut self, objects: &[String]) -> Option<usize> {
        if objects.is_empty() {
            return None;
        }
        Some(rand::thread_rng().gen_range(0..objects.len()))
    }
}

/// Always picks a fixed index (clamped to the slice).
pub struct FixedSelector(pub usize);

impl ObjectSelector for FixedSelector {
    fn select(&mut self, objects: &[String]) -> Option<usize> {
        if objects.is_empty() {
            return None;
        }
        Some(self.0.min(objects.len() - 1))
    }
}

/// Combines the listing, description, and localization adapters.
pub struct ImageAnalyzer {
    provider: Arc<dyn LlmProvider>,
    detector: Arc<dyn ObjectDetector>,
    request_counter: AtomicU64,
}

impl ImageAnalyzer {
    pub fn new(provider: Arc<dyn LlmProvider>, detector: Arc<dyn ObjectDetector>) -> Self {
        Self {
            provider,
            detector,
            request_counter: AtomicU64::new(0),
        }
    }

    /// Analyze an image with random primary-object selection.
    pub async fn analyze(&self, image: &ImageInput) -> Result<ImageAnalysis, CoreError> {
        self.analyze_with(image, &mut RandomSelector).await
    }

    /// Analyze an image with an injected selector.
    ///
    /// Steps run sequentially: listing, selection, description, then the
    /// bounding box for the selected label against the original image.
    pub async fn analyze_with(
        &self,
        image: &ImageInput,
        selector: &mut dyn ObjectSelector,
    ) -> Result<ImageAnalysis, CoreError> {
        let object_list = objects::list_objects(self.provider.as_ref(), image).await?;

        // list_objects guarantees a non-empty list, so selection can only
        // come back None on a broken selector implementation.
        let index = selector
            .select(&object_list)
            .ok_or(crate::error::AdapterError::NoObjects)?;
        let primary = object_list[index].clone();
        tracing::debug!(%primary, total = object_list.len(), "Primary object selected");

        let description = describe::describe_scene(self.provider.as_ref(), image).await?;

        let detections = self.detector.detect(image, &primary).await?;
        let best = best_box(&detections);
        if best.is_none() {
            tracing::warn!(%primary, "Detector returned no candidates for primary object");
        }

        let request_id = self.request_counter.fetch_add(1, Ordering::SeqCst) + 1;

        Ok(ImageAnalysis {
            request_id,
            description,
            confidence: best.map(|d| d.score).unwrap_or(FALLBACK_CONFIDENCE),
            primary_box: best.map(|d| d.bounding_box),
            primary_object: Some(primary),
            objects: object_list,
        })
    }
}
