//! Animation timing
//!
//! Curves map linear time progress in `[0, 1]` to eased progress.

use std::time::Duration;

/// Duration used when none is given
pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

/// Timing curve of an animation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationCurve {
    /// The platform's standard curve (ease in and out)
    #[default]
    Default,
    EaseInOut,
    EaseIn,
    EaseOut,
    Linear,
}

impl AnimationCurve {
    /// Eased progress for linear progress `t`, clamped to `[0, 1]`
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            AnimationCurve::Linear => t,
            AnimationCurve::EaseIn => t * t,
            AnimationCurve::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            AnimationCurve::Default | AnimationCurve::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// How a layout change should be animated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationParams {
    pub duration: Duration,
    pub curve: AnimationCurve,
}

impl AnimationParams {
    pub fn new(duration: Duration, curve: AnimationCurve) -> Self {
        Self { duration, curve }
    }

    /// The default curve over `duration`
    pub fn with_duration(duration: Duration) -> Self {
        Self::new(duration, AnimationCurve::Default)
    }

    /// The default duration with `curve`
    pub fn with_curve(curve: AnimationCurve) -> Self {
        Self::new(DEFAULT_DURATION, curve)
    }

    /// Eased progress after `elapsed` time
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.curve
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION, AnimationCurve::Default)
    }
}
