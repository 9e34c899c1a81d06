//! Small looping demos of the operations inside the network.
//!
//! Each demo redraws its whole diagram every frame from constant data and a
//! [`StepCounter`]. A [`DemoRunner`] owns the demo canvases and keeps at most
//! one in-flight frame per canvas: starting a demo on a busy canvas cancels
//! the old loop first.

pub mod convolution;
pub mod hierarchy;
pub mod pooling;
pub mod relu;

use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::StageId;
use crate::schedule::{FrameHandle, FrameQueue, FrameScheduler};
use crate::surface::{Color, DrawingSurface, Font, TextAlign, TextBaseline};

pub use convolution::ConvolutionDemo;
pub use hierarchy::FeatureHierarchyDemo;
pub use pooling::PoolingDemo;
pub use relu::ReluDemo;

/// Extra steps shown after the last one before a demo loops.
pub const LOOP_PAUSE_STEPS: u32 = 3;

/// Discrete step index that advances once every `frames_per_step` frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCounter {
    step: u32,
    frame: u32,
    max_steps: u32,
    frames_per_step: u32,
}

impl StepCounter {
    pub fn new(max_steps: u32, frames_per_step: u32) -> Self {
        Self {
            step: 0,
            frame: 0,
            max_steps,
            frames_per_step: frames_per_step.max(1),
        }
    }

    /// Current step, `0..max_steps + LOOP_PAUSE_STEPS`.
    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Whether the current step is a real one rather than the pause.
    pub fn is_showing(&self) -> bool {
        self.step < self.max_steps
    }

    /// Jump to `step`, wrapping past the pause.
    pub fn set_step(&mut self, step: u32) {
        self.step = step % (self.max_steps + LOOP_PAUSE_STEPS);
        self.frame = 0;
    }

    /// Count one rendered frame. Returns whether the step changed.
    pub fn advance_frame(&mut self) -> bool {
        self.frame += 1;
        if self.frame < self.frames_per_step {
            return false;
        }
        self.frame = 0;
        self.step += 1;
        if self.step >= self.max_steps + LOOP_PAUSE_STEPS {
            self.step = 0;
        }
        true
    }
}

/// A demo that can draw itself onto any surface.
pub trait Demo {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Pixel size the demo's canvas is set to when it starts.
    fn canvas_size(&self) -> (f64, f64);

    /// Clear and draw the current frame, then count it.
    fn render_frame(&mut self, surface: &mut dyn DrawingSurface);

    /// Whether the demo wants another frame after this one.
    fn is_animated(&self) -> bool {
        true
    }
}

/// The built-in demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DemoKind {
    Convolution,
    Pooling,
    Relu,
    FeatureHierarchy,
}

impl DemoKind {
    pub const ALL: [DemoKind; 4] = [
        DemoKind::Convolution,
        DemoKind::Pooling,
        DemoKind::Relu,
        DemoKind::FeatureHierarchy,
    ];

    /// Canvas the demo is normally mounted on.
    pub fn canvas_id(&self) -> &'static str {
        match self {
            DemoKind::Convolution => "convolution-demo",
            DemoKind::Pooling => "pooling-demo",
            DemoKind::Relu => "relu-demo",
            DemoKind::FeatureHierarchy => "feature-maps-demo",
        }
    }

    /// Build the demo. `stage` only matters for the feature hierarchy.
    pub fn build(&self, frames_per_step: u32, stage: Option<StageId>) -> Box<dyn Demo> {
        match self {
            DemoKind::Convolution => Box::new(ConvolutionDemo::new(frames_per_step)),
            DemoKind::Pooling => Box::new(PoolingDemo::new(frames_per_step)),
            DemoKind::Relu => Box::new(ReluDemo),
            DemoKind::FeatureHierarchy => Box::new(FeatureHierarchyDemo::new(stage)),
        }
    }
}

impl FromStr for DemoKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "conv" | "convolution" => Ok(DemoKind::Convolution),
            "pool" | "pooling" => Ok(DemoKind::Pooling),
            "relu" => Ok(DemoKind::Relu),
            "features" | "hierarchy" => Ok(DemoKind::FeatureHierarchy),
            _ => Err(Error::UnknownDemo(s.to_string())),
        }
    }
}

struct DemoCanvas<S> {
    surface: S,
    demo: Option<Box<dyn Demo>>,
    frame: Option<FrameHandle>,
}

/// Runs demos on named canvases, one loop per canvas.
pub struct DemoRunner<S, F = FrameQueue> {
    scheduler: F,
    frames_per_step: u32,
    canvases: BTreeMap<String, DemoCanvas<S>>,
}

impl<S: DrawingSurface> DemoRunner<S> {
    /// A runner with its own frame queue.
    pub fn new(frames_per_step: u32) -> Self {
        Self::with_scheduler(FrameQueue::new(), frames_per_step)
    }
}

impl<S: DrawingSurface, F: FrameScheduler> DemoRunner<S, F> {
    pub fn with_scheduler(scheduler: F, frames_per_step: u32) -> Self {
        Self {
            scheduler,
            frames_per_step,
            canvases: BTreeMap::new(),
        }
    }

    /// Register a canvas. Replacing an existing one stops its demo.
    pub fn add_canvas(&mut self, canvas_id: &str, surface: S) {
        self.stop(canvas_id);
        self.canvases.insert(
            canvas_id.to_string(),
            DemoCanvas {
                surface,
                demo: None,
                frame: None,
            },
        );
    }

    /// Start `demo` on `canvas_id`, cancelling whatever ran there. Returns
    /// `false` when no such canvas was added.
    pub fn start(&mut self, canvas_id: &str, mut demo: Box<dyn Demo>) -> bool {
        let Some(canvas) = self.canvases.get_mut(canvas_id) else {
            debug!(canvas_id, "no such demo canvas");
            return false;
        };

        if let Some(frame) = canvas.frame.take() {
            self.scheduler.cancel_frame(frame);
            debug!(canvas_id, "previous demo loop cancelled");
        }

        let (width, height) = demo.canvas_size();
        canvas.surface.resize(width, height);
        demo.render_frame(&mut canvas.surface);
        if demo.is_animated() {
            canvas.frame = Some(self.scheduler.request_frame());
        }
        debug!(canvas_id, demo = demo.name(), "demo started");
        canvas.demo = Some(demo);
        true
    }

    /// Start a built-in demo on its usual canvas.
    pub fn start_kind(&mut self, kind: DemoKind, stage: Option<StageId>) -> bool {
        let demo = kind.build(self.frames_per_step, stage);
        self.start(kind.canvas_id(), demo)
    }

    /// Present due frames. Returns how many canvases were redrawn.
    pub fn tick(&mut self) -> usize {
        let due = self.scheduler.present();
        let mut drawn = 0;
        for canvas in self.canvases.values_mut() {
            let Some(frame) = canvas.frame else {
                continue;
            };
            if !due.contains(&frame) {
                continue;
            }
            canvas.frame = None;
            if let Some(demo) = canvas.demo.as_mut() {
                demo.render_frame(&mut canvas.surface);
                drawn += 1;
                if demo.is_animated() {
                    canvas.frame = Some(self.scheduler.request_frame());
                }
            }
        }
        drawn
    }

    /// Stop the loop on one canvas. The last frame stays drawn.
    pub fn stop(&mut self, canvas_id: &str) -> bool {
        let Some(frame) = self
            .canvases
            .get_mut(canvas_id)
            .and_then(|canvas| canvas.frame.take())
        else {
            return false;
        };
        self.scheduler.cancel_frame(frame);
        true
    }

    /// Stop every loop. Returns how many were running.
    pub fn stop_all(&mut self) -> usize {
        let mut stopped = 0;
        for canvas in self.canvases.values_mut() {
            if let Some(frame) = canvas.frame.take() {
                self.scheduler.cancel_frame(frame);
                stopped += 1;
            }
        }
        debug!(stopped, "all demos stopped");
        stopped
    }

    /// Whether a loop is scheduled on `canvas_id`.
    pub fn is_animating(&self, canvas_id: &str) -> bool {
        self.canvases
            .get(canvas_id)
            .is_some_and(|canvas| canvas.frame.is_some())
    }

    /// Canvases with a loop scheduled.
    pub fn running(&self) -> Vec<&str> {
        self.canvases
            .iter()
            .filter(|(_, canvas)| canvas.frame.is_some())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn surface(&self, canvas_id: &str) -> Option<&S> {
        self.canvases.get(canvas_id).map(|canvas| &canvas.surface)
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }
}

/// Draw text with an alphabetic baseline.
pub(crate) fn label<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    x: f64,
    y: f64,
    font: Font,
    color: Color,
    align: TextAlign,
) {
    surface.set_fill(color.into());
    surface.set_font(font);
    surface.set_text_align(align);
    surface.set_text_baseline(TextBaseline::Alphabetic);
    surface.fill_text(text, x, y);
}

/// Draw text centred on `(x, y)` in both directions.
pub(crate) fn centered<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    x: f64,
    y: f64,
    font: Font,
    color: Color,
) {
    surface.set_fill(color.into());
    surface.set_font(font);
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);
    surface.fill_text(text, x, y);
    surface.set_text_align(TextAlign::Left);
    surface.set_text_baseline(TextBaseline::Alphabetic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_step_counter_holds_then_advances() {
        let mut counter = StepCounter::new(4, 3);
        assert!(!counter.advance_frame());
        assert!(!counter.advance_frame());
        assert!(counter.advance_frame());
        assert_eq!(counter.step(), 1);
    }

    #[test]
    fn test_step_counter_wraps_after_pause() {
        let mut counter = StepCounter::new(2, 1);
        let steps: Vec<u32> = (0..6)
            .map(|_| {
                counter.advance_frame();
                counter.step()
            })
            .collect();
        // 2 real steps, 3 pause steps, then back to 0
        assert_eq!(steps, vec![1, 2, 3, 4, 0, 1]);
        counter.set_step(2);
        assert!(!counter.is_showing());
    }

    #[test]
    fn test_demo_kind_parse() {
        assert_eq!("conv".parse::<DemoKind>().unwrap(), DemoKind::Convolution);
        assert_eq!("Pooling".parse::<DemoKind>().unwrap(), DemoKind::Pooling);
        assert!(matches!(
            "dropout".parse::<DemoKind>(),
            Err(Error::UnknownDemo(name)) if name == "dropout"
        ));
    }

    #[test]
    fn test_restart_cancels_previous_loop() {
        let mut runner: DemoRunner<RecordingSurface> = DemoRunner::new(90);
        runner.add_canvas("convolution-demo", RecordingSurface::new(0.0, 0.0));

        assert!(runner.start_kind(DemoKind::Convolution, None));
        assert!(runner.start_kind(DemoKind::Convolution, None));
        assert_eq!(runner.scheduler().pending_count(), 1);
        assert_eq!(runner.scheduler().cancelled_count(), 1);
        assert_eq!(runner.tick(), 1);
    }

    #[test]
    fn test_start_on_missing_canvas_is_a_no_op() {
        let mut runner: DemoRunner<RecordingSurface> = DemoRunner::new(90);
        assert!(!runner.start_kind(DemoKind::Pooling, None));
        assert!(!runner.scheduler().has_pending());
    }
}
