//! Stage rendering and animated transitions.
//!
//! [`StageRenderer`] turns stage ids into diagrams on a [`DrawingSurface`].
//! A transition draws its first frame immediately, then one frame per
//! presented [`FrameScheduler`] tick until the cross-fade is done, at which
//! point [`RenderSurface::tick`] hands back the transition's ticket.

mod archetype;
pub mod transition;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::config::VizConfig;
use crate::model::{ArchitectureModel, StageId};
use crate::schedule::{Clock, FrameQueue, FrameScheduler, MonotonicClock};
use crate::surface::DrawingSurface;

use archetype::{Painter, paint_stage};
pub use transition::{TransitionTicket, crossfade_alphas};
use transition::Transition;

/// What the stage controller needs from a renderer.
pub trait RenderSurface {
    /// Clear and draw `stage_id` fully opaque. Unknown ids draw nothing.
    fn draw(&mut self, stage_id: StageId, sample: &str);

    /// Start a cross-fade from `from` to `to`, cancelling any transition
    /// already in flight.
    fn animate_transition(&mut self, from: StageId, to: StageId, sample: &str)
    -> TransitionTicket;

    /// Abandon the in-flight transition. Returns whether one was running.
    fn cancel_transition(&mut self) -> bool;

    /// Whether a transition is in flight.
    fn is_animating(&self) -> bool;

    /// Present due frames. Returns the ticket of a transition that finished
    /// on this tick.
    fn tick(&mut self) -> Option<TransitionTicket>;

    /// Fit the canvas to a new container width and redraw.
    fn resize(&mut self, container_width: f64);

    /// The stage most recently drawn or targeted.
    fn current_stage(&self) -> Option<StageId>;
}

/// Draws AlexNet stages onto a surface.
pub struct StageRenderer<S, F = FrameQueue, C = MonotonicClock> {
    model: ArchitectureModel,
    surface: S,
    scheduler: F,
    clock: C,
    canvas_height: f64,
    container_padding: f64,
    transition_ms: f64,
    filter_shades: [u8; 9],
    current_stage: Option<StageId>,
    sample: String,
    transition: Option<Transition>,
    finished: Option<TransitionTicket>,
    next_ticket: u64,
}

impl<S: DrawingSurface> StageRenderer<S> {
    /// A renderer on the wall clock with its own frame queue.
    pub fn new(model: ArchitectureModel, surface: S, config: &VizConfig) -> Self {
        Self::with_parts(model, surface, FrameQueue::new(), MonotonicClock::new(), config)
    }
}

impl<S, F, C> StageRenderer<S, F, C>
where
    S: DrawingSurface,
    F: FrameScheduler,
    C: Clock,
{
    /// A renderer with an explicit scheduler and clock.
    pub fn with_parts(
        model: ArchitectureModel,
        mut surface: S,
        scheduler: F,
        clock: C,
        config: &VizConfig,
    ) -> Self {
        surface.resize(config.canvas_width(), config.canvas_height);
        Self {
            model,
            surface,
            scheduler,
            clock,
            canvas_height: config.canvas_height,
            container_padding: config.container_padding,
            transition_ms: config.transition_ms,
            filter_shades: filter_shades(config.filter_seed),
            current_stage: None,
            sample: config.default_sample.clone(),
            transition: None,
            finished: None,
            next_ticket: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Brightness of the decorative 3x3 filter swatch, fixed at construction.
    pub fn filter_shades(&self) -> &[u8; 9] {
        &self.filter_shades
    }

    /// Give back the surface, dropping any transition.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Draw one stage at `alpha` without clearing.
    fn paint(&mut self, stage_id: StageId, sample: &str, alpha: f64) {
        let Some(stage) = self.model.get_stage(stage_id) else {
            trace!(stage_id, "no such stage, skipping");
            return;
        };
        let predictions = self.model.predictions_for(sample);
        let mut painter = Painter::new(&mut self.surface, alpha);
        paint_stage(&mut painter, stage, predictions, &self.filter_shades);
    }

    /// Draw the current frame of the in-flight transition.
    fn run_transition_frame(&mut self) -> Option<TransitionTicket> {
        let (from, to, sample, progress) = {
            let t = self.transition.as_ref()?;
            (t.from, t.to, t.sample.clone(), t.progress(self.clock.now_ms()))
        };

        let (from_alpha, to_alpha) = crossfade_alphas(progress);
        self.surface.clear();
        self.paint(from, &sample, from_alpha);
        self.paint(to, &sample, to_alpha);
        self.surface.set_global_alpha(1.0);

        if progress < 1.0 {
            let frame = self.scheduler.request_frame();
            if let Some(t) = self.transition.as_mut() {
                t.frame = Some(frame);
            }
            return None;
        }

        let done = self.transition.take()?;
        self.draw(to, &sample);
        debug!(from, to, "transition complete");
        Some(done.ticket)
    }
}

impl<S, F, C> RenderSurface for StageRenderer<S, F, C>
where
    S: DrawingSurface,
    F: FrameScheduler,
    C: Clock,
{
    fn draw(&mut self, stage_id: StageId, sample: &str) {
        if self.model.get_stage(stage_id).is_none() {
            trace!(stage_id, "no such stage, skipping");
            return;
        }
        self.surface.clear();
        self.paint(stage_id, sample, 1.0);
        self.surface.set_global_alpha(1.0);
        self.current_stage = Some(stage_id);
        self.sample = sample.to_string();
    }

    fn animate_transition(
        &mut self,
        from: StageId,
        to: StageId,
        sample: &str,
    ) -> TransitionTicket {
        self.cancel_transition();

        self.next_ticket += 1;
        let ticket = TransitionTicket(self.next_ticket);
        self.transition = Some(Transition {
            ticket,
            from,
            to,
            sample: sample.to_string(),
            started_at: self.clock.now_ms(),
            duration_ms: self.transition_ms,
            frame: None,
        });
        self.current_stage = Some(to);
        self.sample = sample.to_string();
        debug!(
            ticket = ticket.id(),
            from,
            to,
            duration_ms = self.transition_ms,
            "transition started"
        );

        // A zero-length fade finishes on its first frame; hold the ticket
        // for the next tick so completion always arrives the same way.
        self.finished = self.run_transition_frame();
        ticket
    }

    fn cancel_transition(&mut self) -> bool {
        if self.finished.take().is_some() {
            return true;
        }
        let Some(t) = self.transition.take() else {
            return false;
        };
        if let Some(frame) = t.frame {
            self.scheduler.cancel_frame(frame);
        }
        debug!(from = t.from, to = t.to, "transition cancelled");
        true
    }

    fn is_animating(&self) -> bool {
        self.transition.is_some() || self.finished.is_some()
    }

    fn tick(&mut self) -> Option<TransitionTicket> {
        let due = self.scheduler.present();
        if let Some(ticket) = self.finished.take() {
            return Some(ticket);
        }
        let frame = self.transition.as_ref()?.frame?;
        if due.contains(&frame) {
            self.run_transition_frame()
        } else {
            None
        }
    }

    fn resize(&mut self, container_width: f64) {
        let width = (container_width - self.container_padding).max(0.0);
        self.surface.resize(width, self.canvas_height);
        debug!(width, height = self.canvas_height, "canvas resized");

        // An in-flight transition repaints on its next frame.
        if self.transition.is_none()
            && let Some(stage) = self.current_stage
        {
            let sample = self.sample.clone();
            self.draw(stage, &sample);
        }
    }

    fn current_stage(&self) -> Option<StageId> {
        self.current_stage
    }
}

/// Decorative filter brightness in `100..200`.
fn filter_shades(seed: Option<u64>) -> [u8; 9] {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    std::array::from_fn(|_| rng.gen_range(100u8..200u8))
}
