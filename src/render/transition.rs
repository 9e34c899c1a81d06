//! Cross-fade bookkeeping.

use crate::model::StageId;
use crate::schedule::FrameHandle;

/// Identifies one requested transition. Returned again by
/// [`RenderSurface::tick`](super::RenderSurface::tick) when that transition
/// completes, never for a transition that was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionTicket(pub(crate) u64);

impl TransitionTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A cross-fade in flight.
#[derive(Debug, Clone)]
pub(crate) struct Transition {
    pub(crate) ticket: TransitionTicket,
    pub(crate) from: StageId,
    pub(crate) to: StageId,
    pub(crate) sample: String,
    pub(crate) started_at: f64,
    pub(crate) duration_ms: f64,
    pub(crate) frame: Option<FrameHandle>,
}

impl Transition {
    /// Linear progress in `[0, 1]` at `now`.
    pub(crate) fn progress(&self, now: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }
}

/// Opacities of the outgoing and incoming stage at progress `p`.
pub fn crossfade_alphas(progress: f64) -> (f64, f64) {
    let p = progress.clamp(0.0, 1.0);
    (1.0 - p, p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(duration_ms: f64) -> Transition {
        Transition {
            ticket: TransitionTicket(1),
            from: 1,
            to: 2,
            sample: "cat".to_string(),
            started_at: 1000.0,
            duration_ms,
            frame: None,
        }
    }

    #[test]
    fn test_progress_is_linear_and_clamped() {
        let t = transition(500.0);
        assert_eq!(t.progress(1000.0), 0.0);
        assert_eq!(t.progress(1250.0), 0.5);
        assert_eq!(t.progress(2000.0), 1.0);
        assert_eq!(t.progress(900.0), 0.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        assert_eq!(transition(0.0).progress(1000.0), 1.0);
    }

    #[test]
    fn test_crossfade_alphas_sum_to_one() {
        let (out, inc) = crossfade_alphas(0.25);
        assert_eq!(out, 0.75);
        assert_eq!(inc, 0.25);
    }
}
