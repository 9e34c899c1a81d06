//! Integration tests for stage drawing and cross-fades.

use alexnet_viz::surface::DrawOp;
use alexnet_viz::{
    ArchitectureModel, DrawingSurface, FrameQueue, ManualClock, RecordingSurface, RenderSurface,
    StageRenderer, SvgSurface, VizConfig,
};
use approx::assert_relative_eq;

type Renderer = StageRenderer<RecordingSurface, FrameQueue, ManualClock>;

fn setup() -> (Renderer, ManualClock) {
    let clock = ManualClock::new();
    let config = VizConfig::default().with_filter_seed(3);
    let renderer = StageRenderer::with_parts(
        ArchitectureModel::alexnet(),
        RecordingSurface::new(0.0, 0.0),
        FrameQueue::new(),
        clock.clone(),
        &config,
    );
    (renderer, clock)
}

fn frame_alphas(ops: &[DrawOp]) -> Vec<f64> {
    ops.iter().filter_map(DrawOp::alpha).collect()
}

fn frame_texts(ops: &[DrawOp]) -> Vec<&str> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_every_stage_draws_its_label() {
    let (mut renderer, _) = setup();
    let model = ArchitectureModel::alexnet();

    for stage in model.stages() {
        renderer.draw(stage.id, "cat");
        let frame = renderer.surface().last_frame();
        assert!(
            frame_texts(frame).contains(&stage.short_name),
            "stage {} missing label",
            stage.id
        );
        assert!(frame_alphas(frame).iter().all(|a| *a <= 1.0));
    }
    assert_eq!(renderer.surface().clear_count(), 9);
}

#[test]
fn test_output_stage_shows_ranked_predictions() {
    let (mut renderer, _) = setup();
    renderer.draw(9, "dog");

    let surface = renderer.surface();
    assert!(surface.drew_text("Top 10 Predictions"));
    assert!(surface.drew_text("Golden Retriever"));
    assert!(surface.drew_text("68.0%"));
    assert!(!surface.drew_text("Tabby Cat"));
}

#[test]
fn test_unknown_sample_draws_default_predictions() {
    let (mut renderer, _) = setup();
    renderer.draw(9, "giraffe");
    assert!(renderer.surface().drew_text("Tabby Cat"));
    assert!(renderer.surface().drew_text("73.0%"));
}

#[test]
fn test_crossfade_midpoint() {
    let (mut renderer, clock) = setup();
    renderer.draw(1, "cat");
    renderer.animate_transition(1, 2, "cat");

    clock.advance(250.0);
    assert_eq!(renderer.tick(), None);

    let frame = renderer.surface().last_frame();
    let texts = frame_texts(frame);
    assert!(texts.contains(&"Input"));
    assert!(texts.contains(&"Conv1 + ReLU"));

    let alphas = frame_alphas(frame);
    assert!(alphas.iter().all(|a| *a <= 0.5 + 1e-9));
    assert!(alphas.iter().any(|a| (a - 0.5).abs() < 1e-9));
}

#[test]
fn test_crossfade_ends_on_fully_opaque_target() {
    let (mut renderer, clock) = setup();
    renderer.draw(4, "cat");
    let ticket = renderer.animate_transition(4, 5, "cat");
    assert!(renderer.is_animating());

    clock.advance(500.0);
    assert_eq!(renderer.tick(), Some(ticket));
    assert!(!renderer.is_animating());

    let frame = renderer.surface().last_frame();
    let texts = frame_texts(frame);
    assert!(texts.contains(&"Conv3-5 + ReLU"));
    assert!(!texts.contains(&"Conv2 + ReLU"));
    let label_alpha = frame
        .iter()
        .find_map(|op| match op {
            DrawOp::Text { text, alpha, .. } if text == "Conv3-5 + ReLU" => Some(*alpha),
            _ => None,
        })
        .unwrap();
    assert_relative_eq!(label_alpha, 1.0);
}

#[test]
fn test_new_transition_cancels_running_one() {
    let (mut renderer, clock) = setup();
    renderer.draw(1, "cat");
    let first = renderer.animate_transition(1, 2, "cat");
    clock.advance(100.0);
    renderer.tick();

    let second = renderer.animate_transition(2, 3, "cat");
    assert_ne!(first, second);
    assert_eq!(renderer.scheduler().cancelled_count(), 1);
    assert_eq!(renderer.current_stage(), Some(3));

    clock.advance(500.0);
    assert_eq!(renderer.tick(), Some(second));
    assert_eq!(renderer.tick(), None);
}

#[test]
fn test_cancel_transition_stops_frames() {
    let (mut renderer, clock) = setup();
    renderer.animate_transition(2, 3, "cat");
    assert!(renderer.cancel_transition());
    assert!(!renderer.cancel_transition());
    assert!(!renderer.is_animating());

    clock.advance(1000.0);
    assert_eq!(renderer.tick(), None);
    assert_eq!(renderer.scheduler().pending_count(), 0);
}

#[test]
fn test_resize_keeps_fixed_height() {
    let (mut renderer, _) = setup();
    assert_eq!(renderer.surface().width(), 896.0);
    assert_eq!(renderer.surface().height(), 500.0);

    renderer.draw(3, "cat");
    renderer.resize(464.0);
    assert_eq!(renderer.surface().width(), 400.0);
    assert_eq!(renderer.surface().height(), 500.0);
    assert_eq!(renderer.surface().clear_count(), 2);
    assert!(
        frame_texts(renderer.surface().last_frame()).contains(&"Pool1 + LRN"),
        "resize should redraw the current stage"
    );

    renderer.resize(10.0);
    assert_eq!(renderer.surface().width(), 0.0);
}

#[test]
fn test_svg_surface_renders_stage() {
    let config = VizConfig::default().with_filter_seed(11);
    let mut renderer =
        StageRenderer::new(ArchitectureModel::alexnet(), SvgSurface::new(0.0, 0.0), &config);
    renderer.draw(9, "car");

    let svg = renderer.surface().to_svg_string();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="896""#));
    assert!(svg.contains("Sports Car"));
    assert!(svg.contains("linearGradient"));
}
