//! The AlexNet architecture model.
//!
//! An immutable, ordered table of nine stage descriptors plus a small set of
//! illustrative sample predictions. Nothing here mutates after load, so an
//! [`ArchitectureModel`] is `Copy` and can be handed to every component that
//! reads it.

pub mod predictions;
pub mod stage;
pub mod table;

pub use predictions::{Prediction, SamplePredictions, ranked};
pub use stage::{Archetype, StageDescriptor, StageId, VisualConfig};

/// Number of stages in the walkthrough.
pub const TOTAL_STAGES: StageId = 9;

/// Sample key used when none, or an unknown one, is selected.
pub const DEFAULT_SAMPLE: &str = "cat";

/// Read-only view over the stage table and sample predictions.
#[derive(Debug, Clone, Copy)]
pub struct ArchitectureModel {
    stages: &'static [StageDescriptor],
    samples: &'static [SamplePredictions],
}

impl ArchitectureModel {
    /// The AlexNet walkthrough.
    pub fn alexnet() -> Self {
        Self {
            stages: &table::ALEXNET_STAGES,
            samples: &table::SAMPLE_PREDICTIONS,
        }
    }

    /// Look up a stage by id. `None` means "skip rendering".
    pub fn get_stage(&self, id: StageId) -> Option<&'static StageDescriptor> {
        self.stages.iter().find(|stage| stage.id == id)
    }

    /// Number of stages.
    pub fn total_stages(&self) -> StageId {
        self.stages.len() as StageId
    }

    /// All stages in order.
    pub fn stages(&self) -> std::slice::Iter<'static, StageDescriptor> {
        self.stages.iter()
    }

    /// Stage names in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name).collect()
    }

    /// Sum of every stage's parameter count.
    pub fn total_parameters(&self) -> u64 {
        self.stages.iter().map(|stage| stage.parameters).sum()
    }

    /// Known sample keys.
    pub fn sample_keys(&self) -> Vec<&'static str> {
        self.samples.iter().map(|sample| sample.key).collect()
    }

    /// Whether `key` names a sample set.
    pub fn is_known_sample(&self, key: &str) -> bool {
        self.samples.iter().any(|sample| sample.key == key)
    }

    /// Predictions for `key`, falling back to [`DEFAULT_SAMPLE`] when unknown.
    pub fn predictions_for(&self, key: &str) -> &'static [Prediction] {
        self.sample_set(key).predictions
    }

    /// The sample set for `key`, with the same fallback as
    /// [`predictions_for`](Self::predictions_for).
    pub fn sample_set(&self, key: &str) -> &'static SamplePredictions {
        let samples: &'static [SamplePredictions] = self.samples;
        samples
            .iter()
            .find(|sample| sample.key == key)
            .or_else(|| samples.iter().find(|sample| sample.key == DEFAULT_SAMPLE))
            .unwrap_or(&table::SAMPLE_PREDICTIONS[0])
    }
}

impl Default for ArchitectureModel {
    fn default() -> Self {
        Self::alexnet()
    }
}

/// Compact parameter count: `60.60M`, `34.9K`, or the plain integer.
pub fn format_parameters(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.2}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_contiguous() {
        let model = ArchitectureModel::alexnet();
        let ids: Vec<_> = model.stages().map(|stage| stage.id).collect();
        assert_eq!(ids, (1..=TOTAL_STAGES).collect::<Vec<_>>());
        assert_eq!(model.total_stages(), TOTAL_STAGES);
    }

    #[test]
    fn test_format_parameters() {
        assert_eq!(format_parameters(0), "0");
        assert_eq!(format_parameters(999), "999");
        assert_eq!(format_parameters(34_944), "34.9K");
        assert_eq!(format_parameters(60_600_040), "60.60M");
    }

    #[test]
    fn test_only_last_stage_is_output() {
        let model = ArchitectureModel::alexnet();
        let outputs: Vec<_> = model
            .stages()
            .filter(|stage| matches!(stage.archetype(), Archetype::Output { .. }))
            .map(|stage| stage.id)
            .collect();
        assert_eq!(outputs, vec![TOTAL_STAGES]);
    }
}
