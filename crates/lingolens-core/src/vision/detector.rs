//! Zero-shot object localization adapter.
//!
//! The detector itself is a hosted inference endpoint; this adapter sends
//! the image plus a free-text label and reduces the returned candidates to
//! a single best-scoring box.

use crate::config::{Config, DetectorConfig};
use crate::error::AdapterError;
use crate::llm::ImageInput;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Axis-aligned box `[x0, y0, x1, y1]` in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox(pub [f64; 4]);

impl BoundingBox {
    /// Build a box with all coordinates rounded to two decimal places.
    pub fn rounded(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        fn round2(v: f64) -> f64 {
            (v * 100.0).round() / 100.0
        }
        Self([round2(x0), round2(y0), round2(x1), round2(y1)])
    }
}

/// One candidate returned by the detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub score: f32,
    pub bounding_box: BoundingBox,
}

/// Trait the orchestrator localizes objects through.
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    /// Detector name for logging.
    fn name(&self) -> &str;

    /// Localize every candidate matching `label` in the image.
    /// Zero candidates is a valid outcome, not an error.
    async fn detect(
        &self,
        image: &ImageInput,
        label: &str,
    ) -> Result<Vec<Detection>, AdapterError>;
}

/// Select the best-scoring candidate.
///
/// Strictly maximum score; ties resolve to the first encountered.
pub fn best_box(detections: &[Detection]) -> Option<&Detection> {
    detections
        .iter()
        .reduce(|best, candidate| if candidate.score > best.score { candidate } else { best })
}

// --- Wire types for the hosted zero-shot detection endpoint ---

#[derive(Serialize)]
struct DetectionRequest<'a> {
    inputs: DetectionInputs<'a>,
    parameters: DetectionParameters,
}

#[derive(Serialize)]
struct DetectionInputs<'a> {
    image: &'a str,
    candidate_labels: Vec<&'a str>,
}

#[derive(Serialize)]
struct DetectionParameters {
    threshold: f32,
    text_threshold: f32,
}

#[derive(Deserialize)]
struct DetectionCandidate {
    score: f32,
    label: String,
    #[serde(rename = "box")]
    bounding_box: RawBox,
}

#[derive(Deserialize)]
struct RawBox {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

/// Detector backed by an HTTP inference endpoint.
pub struct HttpDetector {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    threshold: f32,
    text_threshold: f32,
    client: reqwest::Client,
}

impl HttpDetector {
    pub fn new(config: &Config) -> Self {
        Self::with_settings(&config.detector, config.detector_api_key())
    }

    pub fn with_settings(detector: &DetectorConfig, api_key: Option<String>) -> Self {
        Self {
            endpoint: detector.endpoint.trim_end_matches('/').to_string(),
            model: detector.model.clone(),
            api_key,
            threshold: detector.threshold,
            text_threshold: detector.text_threshold,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ObjectDetector for HttpDetector {
    fn name(&self) -> &str {
        "http-zero-shot"
    }

    async fn detect(
        &self,
        image: &ImageInput,
        label: &str,
    ) -> Result<Vec<Detection>, AdapterError> {
        let body = DetectionRequest {
            inputs: DetectionInputs {
                image: &image.data,
                candidate_labels: vec![label],
            },
            parameters: DetectionParameters {
                threshold: self.threshold,
                text_threshold: self.text_threshold,
            },
        };

        let url = format!("{}/{}", self.endpoint, self.model);
        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await.map_err(|e| AdapterError::Detector {
            message: format!("Detection request failed: {e}"),
            status_code: None,
        })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(AdapterError::Detector {
                message: format!("Detector HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let candidates: Vec<DetectionCandidate> =
            resp.json().await.map_err(|e| AdapterError::Detector {
                message: format!("Failed to parse detector response: {e}"),
                status_code: None,
            })?;

        let detections = candidates
            .into_iter()
            .map(|c| Detection {
                label: c.label,
                score: c.score,
                bounding_box: BoundingBox::rounded(
                    c.bounding_box.xmin,
                    c.bounding_box.ymin,
                    c.bounding_box.xmax,
                    c.bounding_box.ymax,
                ),
            })
            .collect();

        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(score: f32) -> Detection {
        Detection {
            label: "cat".to_string(),
            score,
            bounding_box: BoundingBox([0.0, 0.0, 10.0, 10.0]),
        }
    }

    #[test]
    fn test_best_box_picks_maximum_score() {
        let detections = vec![detection(0.2), detection(0.9), detection(0.4)];
        let best = best_box(&detections).unwrap();
        assert_eq!(best.score, 0.9);
    }

    #[test]
    fn test_best_box_tie_resolves_to_first() {
        let mut first = detection(0.5);
        first.label = "first".to_string();
        let mut second = detection(0.5);
        second.label = "second".to_string();

        let detections = vec![first, second];
        let best = best_box(&detections).unwrap();
        assert_eq!(best.label, "first");
    }

    #[test]
    fn test_best_box_empty_is_none() {
        assert!(best_box(&[]).is_none());
    }

    #[test]
    fn test_bounding_box_rounds_to_two_decimals() {
        let bbox = BoundingBox::rounded(3.14159, 2.71828, 141.421356, 173.20508);
        assert_eq!(bbox.0, [3.14, 2.72, 141.42, 173.21]);
    }

    #[test]
    fn test_detector_response_wire_format() {
        // The hosted endpoint returns {score, label, box: {xmin,...}}
        let json = r#"[
            {"score": 0.72, "label": "campfire", "box": {"xmin": 12.5, "ymin": 40.0, "xmax": 220.75, "ymax": 310.25}}
        ]"#;
        let candidates: Vec<DetectionCandidate> = serde_json::from_str(json).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].label, "campfire");
        assert_eq!(candidates[0].bounding_box.xmax, 220.75);
    }
}
