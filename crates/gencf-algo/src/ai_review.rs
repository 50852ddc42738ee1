//! Batched corrective pass through a remote [`BatchClassifier`].
//!
//! Runs after [`crate::classify::flag_records`]. Each batch either succeeds as
//! a whole, overwriting the flags of the plants it names with `AI_<label>`, or
//! fails as a whole and leaves every plant in it on the deterministic flag.
//! Failures are recorded in the returned summary and never abort the run.

use gencf_core::{
    BatchClassifier, CapacityFactorFlag, ClassificationFailure, FlaggedPlantRecord, PlantSummary,
};
use serde::Serialize;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_BATCH_SIZE: usize = 25;
pub const DEFAULT_PACING: Duration = Duration::from_secs(2);

/// Placeholder sent for a missing plant name or state.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiPassConfig {
    pub batch_size: usize,
    /// Sleep after each batch; zero disables pacing.
    pub pacing: Duration,
}

impl Default for AiPassConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            pacing: DEFAULT_PACING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub batch: usize,
    pub plants: usize,
    pub reason: String,
}

/// Counters reported after the pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AiPassSummary {
    /// Plants eligible for review (capacity factor and fuel description present)
    pub analyzed: usize,
    /// Plants in batches that returned a usable label map
    pub succeeded: usize,
    /// Plants in batches that fell back to deterministic flags
    pub failed: usize,
    pub batches: usize,
    pub relabeled: usize,
    pub failures: Vec<BatchFailure>,
}

impl AiPassSummary {
    /// Share of analyzed plants in successful batches, in percent.
    pub fn success_rate(&self) -> f64 {
        if self.analyzed == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.analyzed as f64 * 100.0
        }
    }
}

fn is_eligible(record: &FlaggedPlantRecord) -> bool {
    let r = &record.record;
    r.capacity_factor_percent.is_some()
        && r.fuel_type_description
            .as_deref()
            .is_some_and(|desc| !desc.trim().is_empty())
}

/// What the classifier is told about one record.
pub fn plant_summary(record: &FlaggedPlantRecord) -> Option<PlantSummary> {
    let r = &record.record;
    Some(PlantSummary {
        plant_name: r.plant_name.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        fuel_type: r.fuel_type_description.clone()?,
        capacity_factor: r.capacity_factor_percent?,
        capacity: r.total_capacity_mw,
        state: r.state.clone().unwrap_or_else(|| UNKNOWN.to_string()),
    })
}

/// Submit eligible records in fixed-size batches and apply the returned labels.
pub fn apply_ai_pass(
    records: &mut [FlaggedPlantRecord],
    classifier: &dyn BatchClassifier,
    config: &AiPassConfig,
) -> AiPassSummary {
    let eligible: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| is_eligible(record))
        .map(|(index, _)| index)
        .collect();

    let mut summary = AiPassSummary {
        analyzed: eligible.len(),
        ..AiPassSummary::default()
    };
    if eligible.is_empty() {
        info!("no plants eligible for AI review");
        return summary;
    }

    let batch_size = config.batch_size.max(1);
    let total_batches = eligible.len().div_ceil(batch_size);
    info!(
        plants = eligible.len(),
        batches = total_batches,
        batch_size,
        "starting AI review"
    );

    for (batch_index, indices) in eligible.chunks(batch_size).enumerate() {
        let batch: Vec<PlantSummary> = indices
            .iter()
            .filter_map(|&i| plant_summary(&records[i]))
            .collect();
        summary.batches += 1;

        let outcome = classifier
            .classify_batch(&batch)
            .and_then(|labels| {
                if labels.is_empty() {
                    Err(ClassificationFailure::Empty)
                } else {
                    Ok(labels)
                }
            });

        match outcome {
            Ok(labels) => {
                summary.succeeded += indices.len();
                for &i in indices {
                    let record = &mut records[i];
                    let name = record.record.plant_name.as_deref().unwrap_or(UNKNOWN);
                    if let Some(label) = labels.get(name) {
                        record.capacity_factor_flag = CapacityFactorFlag::Ai(label.clone());
                        summary.relabeled += 1;
                    }
                }
                debug!(
                    batch = batch_index + 1,
                    of = total_batches,
                    labels = labels.len(),
                    "batch classified"
                );
            }
            Err(failure) => {
                summary.failed += indices.len();
                warn!(
                    batch = batch_index + 1,
                    of = total_batches,
                    error = %failure,
                    "batch failed, keeping deterministic flags"
                );
                summary.failures.push(BatchFailure {
                    batch: batch_index + 1,
                    plants: indices.len(),
                    reason: failure.to_string(),
                });
            }
        }

        if !config.pacing.is_zero() {
            thread::sleep(config.pacing);
        }
    }

    info!(
        analyzed = summary.analyzed,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "AI review finished"
    );
    summary
}
