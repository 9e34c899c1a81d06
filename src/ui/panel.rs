//! Stage info panel content.

use crate::model::{StageDescriptor, StageId, format_parameters};

use super::glossary::{GlossaryEntry, find_terms};

/// Text shown next to the canvas for one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StagePanel {
    pub stage_id: StageId,
    /// "Stage N: name".
    pub title: String,
    pub description: &'static str,
    pub specs: Vec<&'static str>,
    /// Formatted parameter count, only for learnable stages.
    pub parameters: Option<String>,
    pub formula: Option<&'static str>,
    pub formula_explanation: Option<&'static str>,
    pub why_it_works: Option<&'static str>,
    pub what_it_learns: Option<&'static str>,
    /// "Step N of total".
    pub progress_text: String,
}

impl StagePanel {
    /// Build the panel for `stage` in a walkthrough of `total` stages.
    pub fn for_stage(stage: &StageDescriptor, total: StageId) -> Self {
        Self {
            stage_id: stage.id,
            title: format!("Stage {}: {}", stage.id, stage.name),
            description: stage.description,
            specs: stage.specs.to_vec(),
            parameters: stage
                .is_learnable()
                .then(|| format_parameters(stage.parameters)),
            formula: stage.formula,
            formula_explanation: stage.formula_explanation,
            why_it_works: stage.why_it_works,
            what_it_learns: stage.what_it_learns,
            progress_text: format!("Step {} of {}", stage.id, total),
        }
    }

    /// Plain-text body: description, specs and the optional sections.
    pub fn body(&self) -> String {
        let mut out = String::new();
        out.push_str(self.description);
        out.push_str("\n\nTechnical Specifications:\n");
        for spec in &self.specs {
            out.push_str(&format!("  • {spec}\n"));
        }
        if let Some(params) = &self.parameters {
            out.push_str(&format!("Parameters: {params}\n"));
        }
        if let Some(formula) = self.formula {
            out.push_str(&format!("\nMathematical Formula:\n  {formula}\n"));
            if let Some(explanation) = self.formula_explanation {
                out.push_str(&format!("  {explanation}\n"));
            }
        }
        if let Some(why) = self.why_it_works {
            out.push_str(&format!("\nWhy This Works:\n{why}\n"));
        }
        if let Some(learns) = self.what_it_learns {
            out.push_str(&format!("\nWhat It Learns:\n{learns}\n"));
        }
        out
    }

    /// Glossary terms mentioned in the description or specs.
    pub fn terms(&self) -> Vec<&'static GlossaryEntry> {
        let mut text = self.description.to_string();
        for spec in &self.specs {
            text.push('\n');
            text.push_str(spec);
        }
        find_terms(&text)
    }
}

/// Progress bar fill for `stage` of `total`, in percent.
pub fn progress_percent(stage: StageId, total: StageId) -> f64 {
    if total == 0 {
        return 0.0;
    }
    stage as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ArchitectureModel;

    #[test]
    fn test_panel_for_learnable_stage() {
        let model = ArchitectureModel::alexnet();
        let stage = model.get_stage(2).unwrap();
        let panel = StagePanel::for_stage(stage, 9);

        assert_eq!(panel.title, format!("Stage 2: {}", stage.name));
        assert_eq!(panel.parameters.as_deref(), Some("34.9K"));
        assert_eq!(panel.progress_text, "Step 2 of 9");
        assert!(panel.body().contains("Parameters: 34.9K"));
    }

    #[test]
    fn test_panel_omits_parameters_for_pooling() {
        let model = ArchitectureModel::alexnet();
        let panel = StagePanel::for_stage(model.get_stage(3).unwrap(), 9);
        assert!(panel.parameters.is_none());
        assert!(!panel.body().contains("Parameters:"));
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(9, 9), 100.0);
        assert_eq!(progress_percent(0, 0), 0.0);
        assert!((progress_percent(1, 9) - 11.111).abs() < 1e-3);
    }
}
