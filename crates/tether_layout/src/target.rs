//! Target adapters
//!
//! A target is the element whose geometry is driven. The layout engine only
//! sees it through [`Target`]: streams describing the element, and a setter
//! that commits a resolved rect.

use std::cell::RefCell;
use std::rc::Rc;

use tether_animation::{current_animation, AnimationParams};
use tether_core::{
    combine_latest2, Event, GeometryError, GeometryValue, Rect, Size, Stream, Subscription,
};

/// Which of the target's rects a commit sets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RectProperty {
    Frame,
    /// The frame adjusted by the target's alignment insets
    ///
    /// Baseline bindings are only meaningful against this rect.
    AlignmentRect,
}

/// The edge baseline offsets are measured from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BaselineOrigin {
    /// Offsets measured up from the bottom edge (top-left origin platforms)
    #[default]
    MaxY,
    /// Offsets measured up from the min-Y edge (bottom-left origin platforms)
    MinY,
}

impl BaselineOrigin {
    /// Y position of the baseline of `rect`
    pub fn baseline_of(self, rect: Rect, offset: f64) -> f64 {
        match self {
            BaselineOrigin::MaxY => rect.max_y() - offset,
            BaselineOrigin::MinY => rect.min_y() + offset,
        }
    }

    /// Move `rect` vertically so its baseline lands on `baseline`
    pub fn align(self, rect: Rect, baseline: f64, offset: f64) -> Rect {
        let y = match self {
            BaselineOrigin::MaxY => baseline + offset - rect.height(),
            BaselineOrigin::MinY => baseline - offset,
        };
        Rect::new(rect.x(), y, rect.width(), rect.height())
    }
}

/// Extra information handed to the target with every commit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommitContext {
    /// Set when the commit happens inside an animated delivery
    pub animation: Option<AnimationParams>,
}

impl CommitContext {
    /// Context for a commit made right now on this thread
    pub fn current() -> Self {
        Self {
            animation: current_animation(),
        }
    }

    pub fn is_animated(&self) -> bool {
        self.animation.is_some()
    }
}

/// Platform view adapter
pub trait Target {
    /// Current bounds of the element, in its own coordinate space
    fn bounds(&self) -> Stream<Rect>;

    /// Size the element would like to have
    fn intrinsic_content_size(&self) -> Stream<Size>;

    /// Zero-origin rect of the intrinsic content size
    ///
    /// The starting rect for layouts that do not bind `Rect`.
    fn intrinsic_bounds(&self) -> Stream<Rect> {
        self.intrinsic_content_size().map(Rect::with_size)
    }

    /// Offset of the first baseline from the [`Target::baseline_origin`] edge
    fn baseline_offsets(&self) -> Stream<f64>;

    fn baseline_origin(&self) -> BaselineOrigin {
        BaselineOrigin::default()
    }

    /// Absolute Y of the element's first baseline, following [`Target::bounds`]
    ///
    /// Bind this to another target's `Baseline` to line the two up.
    fn baselines(&self) -> Stream<GeometryValue> {
        baseline_positions(&self.bounds(), &self.baseline_offsets(), self.baseline_origin())
    }

    /// Move `rect` so the element's baseline lands on `baseline`
    fn align_baseline(&self, rect: Rect, baseline: f64, offset: f64) -> Rect {
        self.baseline_origin().align(rect, baseline, offset)
    }

    /// Apply a resolved rect
    fn set_rect(&self, property: RectProperty, rect: Rect, context: CommitContext);
}

/// Absolute baseline Y of each rect, given baseline offsets from `origin`
pub fn baseline_positions(
    rects: &Stream<Rect>,
    offsets: &Stream<f64>,
    origin: BaselineOrigin,
) -> Stream<GeometryValue> {
    combine_latest2(rects, offsets)
        .map(move |(rect, offset)| origin.baseline_of(rect, offset).into())
}

/// Sink that commits every rect it receives to `target`
///
/// A stream error ends the commits; it is logged and stored in `last_error`.
pub(crate) fn commit_sink(
    target: Rc<dyn Target>,
    property: RectProperty,
    last_error: Rc<RefCell<Option<GeometryError>>>,
) -> impl Fn(Event<Rect>) + 'static {
    move |event| match event {
        Event::Next(rect) => {
            let context = CommitContext::current();
            tracing::trace!(?property, %rect, animated = context.is_animated(), "commit");
            target.set_rect(property, rect, context);
        }
        Event::Error(error) => {
            tracing::warn!(?property, %error, "layout stream failed, commits stopped");
            *last_error.borrow_mut() = Some(error);
        }
        Event::Completed => {
            tracing::debug!(?property, "layout stream completed");
        }
    }
}

/// Commit every rect of `rects` to `target` until the subscription is disposed
pub fn bind_rects(
    rects: &Stream<Rect>,
    target: Rc<dyn Target>,
    property: RectProperty,
) -> Subscription {
    rects.subscribe(commit_sink(target, property, Rc::new(RefCell::new(None))))
}
