use serde::{Deserialize, Serialize};

/// Confidence shown with every recommendation. The prediction service does
/// not report a usable per-class score, so this is a fixed display value.
pub const PREDICTION_CONFIDENCE: u32 = 98;

/// Crop recommendation shown on the result card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub crop: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PredictionResult {
    pub fn new(crop: impl Into<String>) -> Self {
        Self {
            crop: crop.into(),
            confidence: Some(PREDICTION_CONFIDENCE),
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// What the prediction service answered, before it becomes a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    /// Empty when the response carried no `crop` field.
    pub crop: String,
    pub description: Option<String>,
}

impl From<Prediction> for PredictionResult {
    fn from(prediction: Prediction) -> Self {
        PredictionResult::new(prediction.crop).with_description(prediction.description)
    }
}
