//! Seam between the anomaly classifier and a remote labelling service.

use crate::error::ClassificationFailure;
use crate::flags::AiLabel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a remote classifier is told about one plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantSummary {
    pub plant_name: String,
    pub fuel_type: String,
    pub capacity_factor: f64,
    pub capacity: Option<f64>,
    pub state: String,
}

/// Outcome of classifying one batch: every label, or one failure reason.
pub type BatchOutcome = Result<HashMap<String, AiLabel>, ClassificationFailure>;

/// Labels a batch of plants by name.
///
/// Implementations must never panic on bad replies; anything that is not a
/// complete, well-formed label map is reported as a [`ClassificationFailure`].
pub trait BatchClassifier {
    fn classify_batch(&self, batch: &[PlantSummary]) -> BatchOutcome;
}

impl<T: BatchClassifier + ?Sized> BatchClassifier for &T {
    fn classify_batch(&self, batch: &[PlantSummary]) -> BatchOutcome {
        (**self).classify_batch(batch)
    }
}
