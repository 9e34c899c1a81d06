//! alexnet-viz: an interactive, step-by-step walkthrough of AlexNet.
//!
//! The crate draws each of the nine stages of the network as a diagram and
//! walks a learner through them:
//! - A read-only architecture model with per-stage text and sample predictions
//! - A stage renderer with linear cross-fades between stages
//! - A navigation state machine that keeps the canvas, info panel and
//!   controls in sync
//! - Looping demos of convolution, max pooling and ReLU

pub mod config;
pub mod error;
pub mod logging;

pub mod controller;
pub mod demo;
pub mod model;
pub mod render;
pub mod schedule;
pub mod surface;
pub mod ui;

pub use config::VizConfig;
pub use controller::{Affordances, KeyCommand, NavigationState, StageController};
pub use demo::{Demo, DemoKind, DemoRunner, StepCounter};
pub use error::{Error, Result};
pub use model::{
    ArchitectureModel, Archetype, Prediction, StageDescriptor, StageId, TOTAL_STAGES,
    format_parameters,
};
pub use render::{RenderSurface, StageRenderer, TransitionTicket};
pub use schedule::{Clock, FrameQueue, FrameScheduler, ManualClock, MonotonicClock};
pub use surface::{DrawingSurface, RecordingSurface, SvgSurface};
pub use ui::{ScrollAnchor, SilentUi, StagePanel, TerminalUi, UiSink};
