//! Stage descriptors and their visual archetypes.

use crate::surface::Color;

/// Identifier of a stage, `1..=TOTAL_STAGES`.
pub type StageId = u32;

/// Visual drawing pattern for a stage, with the geometry it draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    /// Preprocessed image tensor.
    Input { width: u32, height: u32, depth: u32 },
    /// Stack of convolution feature maps.
    Conv { width: u32, height: u32, depth: u32 },
    /// Before/after spatial downsampling.
    Pool { width: u32, height: u32, depth: u32 },
    /// Dense layer of neurons.
    FullyConnected { neurons: u32 },
    /// Ranked class probabilities.
    Output { bars: u32 },
}

impl Archetype {
    /// Short tag for logs and listings.
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Input { .. } => "input",
            Archetype::Conv { .. } => "conv",
            Archetype::Pool { .. } => "pool",
            Archetype::FullyConnected { .. } => "fc",
            Archetype::Output { .. } => "output",
        }
    }

    /// Channel depth for volumetric archetypes.
    pub fn depth(&self) -> Option<u32> {
        match *self {
            Archetype::Input { depth, .. }
            | Archetype::Conv { depth, .. }
            | Archetype::Pool { depth, .. } => Some(depth),
            Archetype::FullyConnected { .. } | Archetype::Output { .. } => None,
        }
    }
}

/// How a stage is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualConfig {
    /// Drawing pattern.
    pub archetype: Archetype,
    /// Accent colour.
    pub color: Color,
}

/// One step of the architecture walkthrough.
#[derive(Debug, Clone, PartialEq)]
pub struct StageDescriptor {
    /// Position in the walkthrough, starting at 1.
    pub id: StageId,
    /// Full display name.
    pub name: &'static str,
    /// Label drawn on the canvas.
    pub short_name: &'static str,
    /// Paragraph describing the stage.
    pub description: &'static str,
    /// Input tensor shape, free-form.
    pub input_shape: &'static str,
    /// Output tensor shape, free-form.
    pub output_shape: &'static str,
    /// Technical specification bullets.
    pub specs: &'static [&'static str],
    /// Operation label.
    pub operation: &'static str,
    /// Learnable parameter count.
    pub parameters: u64,
    /// Formula, if the stage has one.
    pub formula: Option<&'static str>,
    /// Explanation of the formula's terms.
    pub formula_explanation: Option<&'static str>,
    /// Intuition for why the stage helps.
    pub why_it_works: Option<&'static str>,
    /// What the stage learns, if anything.
    pub what_it_learns: Option<&'static str>,
    /// Drawing configuration.
    pub visual: VisualConfig,
}

impl StageDescriptor {
    /// The stage's drawing pattern.
    pub fn archetype(&self) -> Archetype {
        self.visual.archetype
    }

    /// Whether the stage has learnable parameters.
    pub fn is_learnable(&self) -> bool {
        self.parameters > 0
    }
}
