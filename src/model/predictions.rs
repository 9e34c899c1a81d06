//! Sample prediction sets shown on the output stage.

/// A single (class, probability) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Class label.
    pub label: &'static str,
    /// Probability in `[0, 1]`.
    pub probability: f64,
}

impl Prediction {
    /// Probability as a percentage with one decimal, e.g. `"73.0%"`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.probability * 100.0)
    }
}

/// Predictions for one sample image, ordered by descending probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePredictions {
    /// Sample key (e.g. `"cat"`).
    pub key: &'static str,
    /// Ranked predictions.
    pub predictions: &'static [Prediction],
}

impl SamplePredictions {
    /// The highest-ranked prediction.
    pub fn top(&self) -> Option<&'static Prediction> {
        self.predictions.first()
    }
}

/// Copy of `predictions` sorted by descending probability.
///
/// The stable sort keeps table order among equal probabilities.
pub fn ranked(predictions: &[Prediction]) -> Vec<Prediction> {
    let mut items = predictions.to_vec();
    items.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    items
}
