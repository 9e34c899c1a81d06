//! Integration tests for the stage navigation state machine.

use alexnet_viz::controller::{COMPLETE_LABEL, NEXT_LABEL};
use alexnet_viz::surface::DrawOp;
use alexnet_viz::{
    Affordances, ArchitectureModel, DrawingSurface, FrameQueue, KeyCommand, ManualClock,
    NavigationState, RecordingSurface, RenderSurface, ScrollAnchor, StageController, StageId,
    StagePanel, StageRenderer, UiSink, VizConfig,
};

#[derive(Default)]
struct UiLog {
    panels: Vec<StageId>,
    progress: Vec<(StageId, StageId, f64)>,
    affordances: Vec<Affordances>,
    scrolls: Vec<ScrollAnchor>,
}

impl UiSink for UiLog {
    fn set_stage_info(&mut self, panel: &StagePanel) {
        self.panels.push(panel.stage_id);
    }

    fn set_progress(&mut self, stage: StageId, total: StageId, percent: f64) {
        self.progress.push((stage, total, percent));
    }

    fn set_affordances(&mut self, affordances: &Affordances) {
        self.affordances.push(*affordances);
    }

    fn scroll_into_view(&mut self, anchor: ScrollAnchor) {
        self.scrolls.push(anchor);
    }
}

type Renderer = StageRenderer<RecordingSurface, FrameQueue, ManualClock>;
type Controller = StageController<Renderer, UiLog>;

fn setup() -> (Controller, ManualClock) {
    let clock = ManualClock::new();
    let config = VizConfig::default().with_filter_seed(42);
    let model = ArchitectureModel::alexnet();
    let renderer = StageRenderer::with_parts(
        model,
        RecordingSurface::new(0.0, 0.0),
        FrameQueue::new(),
        clock.clone(),
        &config,
    );
    (StageController::new(model, renderer, UiLog::default()), clock)
}

/// Let the in-flight transition run out and return the finished stage.
fn finish(controller: &mut Controller, clock: &ManualClock) -> Option<StageId> {
    clock.advance(600.0);
    controller.tick()
}

fn clears(controller: &Controller) -> usize {
    controller.renderer().surface().clear_count()
}

#[test]
fn test_initial_state() {
    let (controller, _) = setup();
    assert_eq!(controller.state(), NavigationState::NotStarted);
    assert_eq!(controller.current_stage(), 1);
    assert_eq!(controller.selected_sample(), "cat");
    assert!(controller.affordances().start);
}

#[test]
fn test_mount_draws_first_stage() {
    let (mut controller, _) = setup();
    controller.mount();

    assert_eq!(clears(&controller), 1);
    assert_eq!(controller.ui().panels, vec![1]);
    assert_eq!(controller.ui().progress.len(), 1);
    assert_eq!(controller.state(), NavigationState::NotStarted);
}

#[test]
fn test_mount_follows_navigation_state() {
    let (mut controller, clock) = setup();
    controller.start();
    controller.advance();
    finish(&mut controller, &clock);
    controller.advance();
    finish(&mut controller, &clock);
    // A third move is still fading when the canvas is remounted.
    controller.advance();

    controller.mount();
    assert_eq!(controller.state(), NavigationState::Active(4));
    assert!(!controller.is_transitioning());
    assert_eq!(controller.renderer().current_stage(), Some(4));
    assert_eq!(controller.ui().panels.last(), Some(&4));
    assert_eq!(controller.ui().progress.last().map(|p| p.0), Some(4));
    let labels: Vec<&str> = controller
        .renderer()
        .surface()
        .last_frame()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert!(labels.contains(&"Conv2 + ReLU"));
    assert!(!labels.contains(&"Pool1 + LRN"));

    // The cut-short fade never repaints over the mounted stage.
    assert_eq!(finish(&mut controller, &clock), None);
    assert_eq!(controller.completed_transitions(), 2);
    assert_eq!(controller.renderer().current_stage(), Some(4));
}

#[test]
fn test_reset_key_works_before_start() {
    let (mut controller, _) = setup();
    controller.mount();

    assert!(controller.handle_key(KeyCommand::Reset));
    assert_eq!(controller.state(), NavigationState::NotStarted);
    assert_eq!(controller.ui().scrolls, vec![ScrollAnchor::Top]);
    assert_eq!(controller.ui().panels, vec![1, 1]);
}

#[test]
fn test_advance_before_start_is_a_no_op() {
    let (mut controller, _) = setup();
    assert!(!controller.advance());
    assert!(!controller.retreat());
    assert_eq!(controller.state(), NavigationState::NotStarted);
    assert_eq!(clears(&controller), 0);
}

#[test]
fn test_start_moves_to_first_stage() {
    let (mut controller, _) = setup();
    assert!(controller.start());

    assert_eq!(controller.state(), NavigationState::Active(1));
    assert_eq!(clears(&controller), 1);
    assert_eq!(controller.ui().panels, vec![1]);
    assert_eq!(controller.ui().scrolls, vec![ScrollAnchor::Center]);
    assert!(!controller.renderer().is_animating());
}

#[test]
fn test_start_when_active_is_a_no_op() {
    let (mut controller, clock) = setup();
    controller.start();
    controller.advance();
    finish(&mut controller, &clock);

    assert!(!controller.start());
    assert_eq!(controller.state(), NavigationState::Active(2));
}

#[test]
fn test_retreat_at_first_stage_is_a_no_op() {
    let (mut controller, _) = setup();
    controller.start();
    assert!(!controller.retreat());
    assert_eq!(controller.state(), NavigationState::Active(1));
    assert!(!controller.is_transitioning());
}

#[test]
fn test_walk_to_last_stage() {
    let (mut controller, clock) = setup();
    controller.start();

    for expected in 2..=9 {
        assert!(controller.advance());
        assert_eq!(finish(&mut controller, &clock), Some(expected));
    }
    assert_eq!(controller.state(), NavigationState::Active(9));
    assert_eq!(controller.completed_transitions(), 8);

    assert!(!controller.advance());
    assert_eq!(controller.state(), NavigationState::Active(9));
}

#[test]
fn test_retreat_moves_back() {
    let (mut controller, clock) = setup();
    controller.start();
    controller.advance();
    finish(&mut controller, &clock);

    assert!(controller.retreat());
    assert_eq!(controller.state(), NavigationState::Active(1));
    assert_eq!(finish(&mut controller, &clock), Some(1));
}

#[test]
fn test_panel_follows_transition_completion() {
    let (mut controller, clock) = setup();
    controller.start();
    controller.advance();

    // Controls update immediately, the panel waits for the fade.
    assert_eq!(controller.ui().panels, vec![1]);
    let affordances = controller.ui().affordances.last().copied().unwrap();
    assert!(affordances.retreat);

    clock.advance(250.0);
    assert_eq!(controller.tick(), None);
    assert_eq!(controller.ui().panels, vec![1]);

    assert_eq!(finish(&mut controller, &clock), Some(2));
    assert_eq!(controller.ui().panels, vec![1, 2]);
    let (stage, total, percent) = *controller.ui().progress.last().unwrap();
    assert_eq!((stage, total), (2, 9));
    assert!((percent - 200.0 / 9.0).abs() < 1e-9);
}

#[test]
fn test_superseded_transition_completes_once() {
    let (mut controller, clock) = setup();
    controller.start();

    controller.advance();
    clock.advance(100.0);
    controller.tick();
    controller.advance();

    assert_eq!(finish(&mut controller, &clock), Some(3));
    assert_eq!(controller.tick(), None);
    clock.advance(1000.0);
    assert_eq!(controller.tick(), None);

    assert_eq!(controller.completed_transitions(), 1);
    assert_eq!(controller.state(), NavigationState::Active(3));
    assert_eq!(controller.ui().panels, vec![1, 3]);
}

#[test]
fn test_reset_from_any_state() {
    let (mut controller, clock) = setup();
    controller.reset_all();
    assert_eq!(controller.state(), NavigationState::NotStarted);

    controller.start();
    controller.advance();
    finish(&mut controller, &clock);
    controller.advance();

    controller.reset_all();
    assert_eq!(controller.state(), NavigationState::NotStarted);
    assert!(!controller.is_transitioning());
    assert!(!controller.renderer().is_animating());
    assert_eq!(controller.ui().scrolls.last(), Some(&ScrollAnchor::Top));
    assert_eq!(controller.renderer().current_stage(), Some(1));

    // The cancelled fade never completes.
    assert_eq!(finish(&mut controller, &clock), None);
    assert_eq!(
        controller.ui().affordances.last().copied(),
        Some(Affordances::for_state(NavigationState::NotStarted, 9))
    );
}

#[test]
fn test_affordances_by_stage() {
    let (mut controller, clock) = setup();
    controller.start();
    let first = controller.affordances();
    assert!(!first.start && first.reset && first.advance && !first.retreat);

    controller.advance();
    finish(&mut controller, &clock);
    let middle = controller.affordances();
    assert!(middle.advance && middle.retreat);
    assert_eq!(middle.advance_label, NEXT_LABEL);

    for _ in 3..=9 {
        controller.advance();
        finish(&mut controller, &clock);
    }
    let last = controller.affordances();
    assert!(!last.advance && last.retreat);
    assert_eq!(last.advance_label, COMPLETE_LABEL);
}

#[test]
fn test_select_sample_redraws_only_output_stage() {
    let (mut controller, clock) = setup();
    controller.start();
    for _ in 2..=4 {
        controller.advance();
        finish(&mut controller, &clock);
    }

    let before = clears(&controller);
    controller.select_sample("dog");
    assert_eq!(clears(&controller), before);
    assert_eq!(controller.selected_sample(), "dog");

    for _ in 5..=9 {
        controller.advance();
        finish(&mut controller, &clock);
    }
    let before = clears(&controller);
    controller.select_sample("car");
    assert_eq!(clears(&controller), before + 1);
    assert!(controller.renderer().surface().drew_text("Top 10 Predictions"));
}

#[test]
fn test_select_sample_before_start_does_not_render() {
    let (mut controller, _) = setup();
    controller.select_sample("dog");
    assert_eq!(clears(&controller), 0);
    assert_eq!(controller.selected_sample(), "dog");
}

#[test]
fn test_keyboard_shortcuts() {
    let (mut controller, clock) = setup();

    assert!(!controller.handle_key(KeyCommand::Advance));
    assert!(!controller.handle_key(KeyCommand::Retreat));
    assert!(controller.handle_key(KeyCommand::StartOrAdvance));
    assert_eq!(controller.state(), NavigationState::Active(1));

    assert!(controller.handle_key(KeyCommand::StartOrAdvance));
    finish(&mut controller, &clock);
    assert_eq!(controller.state(), NavigationState::Active(2));

    assert!(controller.handle_key(KeyCommand::Retreat));
    finish(&mut controller, &clock);
    assert_eq!(controller.state(), NavigationState::Active(1));

    assert!(controller.handle_key(KeyCommand::Reset));
    assert_eq!(controller.state(), NavigationState::NotStarted);
}

#[test]
fn test_resize_redraws_current_stage() {
    let (mut controller, _) = setup();
    controller.start();
    let before = clears(&controller);

    controller.resize(864.0);
    assert_eq!(controller.renderer().surface().width(), 800.0);
    assert_eq!(clears(&controller), before + 1);
}
