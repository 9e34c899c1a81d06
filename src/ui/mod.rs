//! Text and control surfaces around the canvas.
//!
//! The controller never touches a terminal or document directly. It pushes
//! panel text, progress and control enablement into a [`UiSink`]; hosts that
//! lack one of those elements simply ignore the call.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use alexnet_viz::ui::{SilentUi, TerminalUi};
//!
//! let ui = TerminalUi::stdout();
//! let controller = StageController::new(model, renderer, ui);
//! ```

pub mod glossary;
pub mod panel;
pub mod terminal;

pub use glossary::{GLOSSARY, GlossaryEntry, find_terms, lookup};
pub use panel::{StagePanel, progress_percent};
pub use terminal::{TerminalUi, boxed, date_banner, progress_bar};

use crate::controller::Affordances;
use crate::model::StageId;

/// Where to scroll the visualization to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAnchor {
    /// Page top, after a reset.
    Top,
    /// Centre the canvas, after starting.
    Center,
}

/// Receives UI updates from the stage controller.
pub trait UiSink {
    /// Replace the stage info panel.
    fn set_stage_info(&mut self, panel: &StagePanel);

    /// Update the progress text and bar.
    fn set_progress(&mut self, stage: StageId, total: StageId, percent: f64);

    /// Enable or disable the navigation controls.
    fn set_affordances(&mut self, affordances: &Affordances);

    /// Bring the visualization into view.
    fn scroll_into_view(&mut self, anchor: ScrollAnchor);
}

impl<U: UiSink + ?Sized> UiSink for &mut U {
    fn set_stage_info(&mut self, panel: &StagePanel) {
        (**self).set_stage_info(panel);
    }

    fn set_progress(&mut self, stage: StageId, total: StageId, percent: f64) {
        (**self).set_progress(stage, total, percent);
    }

    fn set_affordances(&mut self, affordances: &Affordances) {
        (**self).set_affordances(affordances);
    }

    fn scroll_into_view(&mut self, anchor: ScrollAnchor) {
        (**self).scroll_into_view(anchor);
    }
}

/// No-op UI for headless use.
pub struct SilentUi;

impl Default for SilentUi {
    fn default() -> Self {
        Self
    }
}

impl UiSink for SilentUi {
    fn set_stage_info(&mut self, _panel: &StagePanel) {}
    fn set_progress(&mut self, _stage: StageId, _total: StageId, _percent: f64) {}
    fn set_affordances(&mut self, _affordances: &Affordances) {}
    fn scroll_into_view(&mut self, _anchor: ScrollAnchor) {}
}
