//! Stage navigation state machine.
//!
//! [`StageController`] owns the walkthrough position and the selected
//! sample. Every operation checks its precondition, mutates state, and then
//! pushes the consequences to the renderer and the UI. Invalid calls are
//! no-ops that return `false`.
//!
//! Animated moves update the controls immediately, but the info panel and
//! progress only follow once the renderer reports that the transition
//! finished, via [`StageController::tick`].

use tracing::{debug, warn};

use crate::model::{ArchitectureModel, StageId};
use crate::render::{RenderSurface, TransitionTicket};
use crate::ui::{ScrollAnchor, StagePanel, UiSink, progress_percent};

/// Label of the advance control while more stages follow.
pub const NEXT_LABEL: &str = "Next Step";
/// Label of the advance control on the last stage.
pub const COMPLETE_LABEL: &str = "Complete";

/// Where the walkthrough is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationState {
    /// Initial state; only start is possible.
    #[default]
    NotStarted,
    /// Showing a stage.
    Active(StageId),
}

impl NavigationState {
    pub fn is_started(&self) -> bool {
        matches!(self, NavigationState::Active(_))
    }

    /// The active stage, if started.
    pub fn stage(&self) -> Option<StageId> {
        match *self {
            NavigationState::NotStarted => None,
            NavigationState::Active(stage) => Some(stage),
        }
    }
}

/// Which navigation controls are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub start: bool,
    pub advance: bool,
    pub retreat: bool,
    pub reset: bool,
    /// Text on the advance control.
    pub advance_label: &'static str,
}

impl Affordances {
    /// Controls for `state` in a walkthrough of `total` stages.
    pub fn for_state(state: NavigationState, total: StageId) -> Self {
        match state {
            NavigationState::NotStarted => Self {
                start: true,
                advance: false,
                retreat: false,
                reset: false,
                advance_label: NEXT_LABEL,
            },
            NavigationState::Active(stage) => Self {
                start: false,
                advance: stage < total,
                retreat: stage > 1,
                reset: true,
                advance_label: if stage >= total {
                    COMPLETE_LABEL
                } else {
                    NEXT_LABEL
                },
            },
        }
    }
}

/// A keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Right arrow, `n`.
    Advance,
    /// Left arrow, `p`.
    Retreat,
    /// `r`.
    Reset,
    /// Space: start if not started, otherwise advance.
    StartOrAdvance,
}

impl KeyCommand {
    /// Map a key name (as a browser reports `KeyboardEvent.key`) to a command.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | "n" | "N" => Some(KeyCommand::Advance),
            "ArrowLeft" | "p" | "P" => Some(KeyCommand::Retreat),
            "r" | "R" => Some(KeyCommand::Reset),
            " " | "Space" | "Spacebar" => Some(KeyCommand::StartOrAdvance),
            _ => None,
        }
    }
}

/// A stage move waiting on its transition.
#[derive(Debug, Clone, Copy)]
struct PendingMove {
    ticket: TransitionTicket,
    to: StageId,
}

/// Drives the walkthrough.
pub struct StageController<R, U> {
    model: ArchitectureModel,
    renderer: R,
    ui: U,
    state: NavigationState,
    selected_sample: String,
    pending: Option<PendingMove>,
    completed_transitions: usize,
}

impl<R: RenderSurface, U: UiSink> StageController<R, U> {
    /// Create a controller in [`NavigationState::NotStarted`] showing the
    /// default sample.
    pub fn new(model: ArchitectureModel, renderer: R, ui: U) -> Self {
        Self {
            model,
            renderer,
            ui,
            state: NavigationState::NotStarted,
            selected_sample: crate::model::DEFAULT_SAMPLE.to_string(),
            pending: None,
            completed_transitions: 0,
        }
    }

    /// Start with a different sample selected.
    pub fn with_sample(mut self, key: &str) -> Self {
        self.selected_sample = key.to_string();
        self
    }

    /// Draw the current stage and populate the UI from the navigation state.
    /// Before starting that is stage 1. A move still fading is cut short.
    pub fn mount(&mut self) {
        self.cancel_pending();
        let stage = self.current_stage();
        self.renderer.draw(stage, &self.selected_sample);
        self.sync_stage(stage);
        self.sync_affordances();
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// The stage shown or being moved to; stage 1 before starting.
    pub fn current_stage(&self) -> StageId {
        self.state.stage().unwrap_or(1)
    }

    pub fn selected_sample(&self) -> &str {
        &self.selected_sample
    }

    pub fn total_stages(&self) -> StageId {
        self.model.total_stages()
    }

    pub fn affordances(&self) -> Affordances {
        Affordances::for_state(self.state, self.total_stages())
    }

    /// Whether a stage move is still animating.
    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of animated moves that ran to completion.
    pub fn completed_transitions(&self) -> usize {
        self.completed_transitions
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Begin the walkthrough at stage 1. Already started is a no-op.
    pub fn start(&mut self) -> bool {
        if self.state.is_started() {
            debug!("start ignored, walkthrough already active");
            return false;
        }

        self.cancel_pending();
        self.state = NavigationState::Active(1);
        self.renderer.draw(1, &self.selected_sample);
        self.sync_stage(1);
        self.sync_affordances();
        self.ui.scroll_into_view(ScrollAnchor::Center);
        debug!("walkthrough started");
        true
    }

    /// Move one stage forward with a cross-fade.
    pub fn advance(&mut self) -> bool {
        match self.state {
            NavigationState::Active(stage) if stage < self.total_stages() => {
                self.move_to(stage, stage + 1);
                true
            }
            _ => false,
        }
    }

    /// Move one stage back with a cross-fade.
    pub fn retreat(&mut self) -> bool {
        match self.state {
            NavigationState::Active(stage) if stage > 1 => {
                self.move_to(stage, stage - 1);
                true
            }
            _ => false,
        }
    }

    /// Return to the initial state from anywhere.
    pub fn reset_all(&mut self) {
        self.cancel_pending();
        self.state = NavigationState::NotStarted;
        self.renderer.draw(1, &self.selected_sample);
        self.sync_stage(1);
        self.sync_affordances();
        self.ui.scroll_into_view(ScrollAnchor::Top);
        debug!("walkthrough reset");
    }

    /// Choose the sample shown on the output stage. Only the output stage is
    /// redrawn, and only while it is active.
    pub fn select_sample(&mut self, key: &str) {
        if !self.model.is_known_sample(key) {
            warn!(
                sample = key,
                fallback = crate::model::DEFAULT_SAMPLE,
                "unknown sample, output stage falls back"
            );
        }
        self.selected_sample = key.to_string();

        let total = self.total_stages();
        if self.state == NavigationState::Active(total) {
            // A fade into the output stage would finish with stale bars.
            if self.cancel_pending() {
                self.sync_stage(total);
                self.sync_affordances();
            }
            self.renderer.draw(total, &self.selected_sample);
            debug!(sample = key, "output stage redrawn");
        }
    }

    /// Apply a keyboard shortcut. Reset works in every state; before
    /// starting, space starts and the arrows do nothing.
    pub fn handle_key(&mut self, command: KeyCommand) -> bool {
        match (self.state, command) {
            (_, KeyCommand::Reset) => {
                self.reset_all();
                true
            }
            (NavigationState::NotStarted, KeyCommand::StartOrAdvance) => self.start(),
            (NavigationState::NotStarted, _) => false,
            (NavigationState::Active(_), KeyCommand::Advance | KeyCommand::StartOrAdvance) => {
                self.advance()
            }
            (NavigationState::Active(_), KeyCommand::Retreat) => self.retreat(),
        }
    }

    /// Drive the renderer by one frame. Returns the stage whose transition
    /// finished on this frame.
    pub fn tick(&mut self) -> Option<StageId> {
        let ticket = self.renderer.tick()?;
        let pending = self.pending.filter(|p| p.ticket == ticket)?;

        self.pending = None;
        self.completed_transitions += 1;
        self.sync_stage(pending.to);
        self.sync_affordances();
        debug!(stage = pending.to, "stage move complete");
        Some(pending.to)
    }

    /// Refit the canvas to a new container width.
    pub fn resize(&mut self, container_width: f64) {
        self.renderer.resize(container_width);
    }

    fn move_to(&mut self, from: StageId, to: StageId) {
        self.state = NavigationState::Active(to);
        let ticket = self
            .renderer
            .animate_transition(from, to, &self.selected_sample);
        if let Some(previous) = self.pending.replace(PendingMove { ticket, to }) {
            debug!(superseded = previous.to, to, "stage move superseded");
        }
        self.sync_affordances();
    }

    fn cancel_pending(&mut self) -> bool {
        let had_pending = self.pending.take().is_some();
        self.renderer.cancel_transition();
        had_pending
    }

    fn sync_stage(&mut self, stage_id: StageId) {
        let total = self.total_stages();
        if let Some(stage) = self.model.get_stage(stage_id) {
            self.ui.set_stage_info(&StagePanel::for_stage(stage, total));
        }
        self.ui
            .set_progress(stage_id, total, progress_percent(stage_id, total));
    }

    fn sync_affordances(&mut self) {
        let affordances = self.affordances();
        self.ui.set_affordances(&affordances);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affordances_not_started() {
        let a = Affordances::for_state(NavigationState::NotStarted, 9);
        assert!(a.start);
        assert!(!a.advance && !a.retreat && !a.reset);
    }

    #[test]
    fn test_affordances_at_ends() {
        let first = Affordances::for_state(NavigationState::Active(1), 9);
        assert!(!first.retreat && first.advance && first.reset && !first.start);
        assert_eq!(first.advance_label, NEXT_LABEL);

        let last = Affordances::for_state(NavigationState::Active(9), 9);
        assert!(!last.advance && last.retreat);
        assert_eq!(last.advance_label, COMPLETE_LABEL);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyCommand::from_key("ArrowRight"), Some(KeyCommand::Advance));
        assert_eq!(KeyCommand::from_key("N"), Some(KeyCommand::Advance));
        assert_eq!(KeyCommand::from_key("p"), Some(KeyCommand::Retreat));
        assert_eq!(KeyCommand::from_key("R"), Some(KeyCommand::Reset));
        assert_eq!(KeyCommand::from_key(" "), Some(KeyCommand::StartOrAdvance));
        assert_eq!(KeyCommand::from_key("x"), None);
    }
}
