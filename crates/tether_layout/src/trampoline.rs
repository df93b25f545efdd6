//! Attribute trampoline
//!
//! Turns a set of attribute bindings into committed rects. The trampoline
//! combines the latest value of every bound source with the target's basis
//! rect, applies the attributes in their fixed evaluation order, and hands
//! the result to the target once per combined emission.
//!
//! Lifecycle:
//!
//! ```text
//! Idle ──start──▶ Committing ──tear_down / drop──▶ TornDown
//!   │                 │
//!   └── set / merge ──┘ (re-subscribes while committing)
//! ```
//!
//! Binding `Baseline` assumes the trampoline drives
//! [`RectProperty::AlignmentRect`]; frame-based baselines are not adjusted.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tether_core::{
    combine_latest, GeometryError, GeometryValue, Rect, Result, Stream, Subscription,
    WritingDirection,
};

use crate::attribute::LayoutAttribute;
use crate::binding::{AttributeSource, Bindings};
use crate::config::writing_direction;
use crate::target::{baseline_positions, commit_sink, RectProperty, Target};

type RectTransform = Rc<dyn Fn(Stream<Rect>) -> Stream<Rect>>;

/// Where a trampoline is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrampolineState {
    /// Bindings are buffered, nothing is evaluated
    #[default]
    Idle,
    /// Exactly one combined subscription feeds the target
    Committing,
    /// No further commits, whatever is bound afterwards
    TornDown,
}

/// One input of the combined stream
#[derive(Clone, Debug)]
enum Slot {
    Basis(Rect),
    Value(LayoutAttribute, GeometryValue),
    Direction(WritingDirection),
    BaselineOffset(f64),
}

/// Binds layout attributes of one target property
///
/// One trampoline per target property is a caller contract; two trampolines
/// committing to the same property race each other.
pub struct Trampoline {
    target: Rc<dyn Target>,
    property: RectProperty,
    bindings: Bindings,
    state: TrampolineState,
    subscription: Option<Subscription>,
    transform: Option<RectTransform>,
    last_error: Rc<RefCell<Option<GeometryError>>>,
}

impl Trampoline {
    pub fn new(target: Rc<dyn Target>, property: RectProperty) -> Self {
        Self {
            target,
            property,
            bindings: Bindings::new(),
            state: TrampolineState::Idle,
            subscription: None,
            transform: None,
            last_error: Rc::new(RefCell::new(None)),
        }
    }

    pub fn state(&self) -> TrampolineState {
        self.state
    }

    pub fn property(&self) -> RectProperty {
        self.property
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// The error that stopped the current subscription, if any
    pub fn last_error(&self) -> Option<GeometryError> {
        self.last_error.borrow().clone()
    }

    /// Replace the whole binding set
    ///
    /// Constants of the wrong kind are rejected and leave the current
    /// bindings untouched.
    pub fn set(&mut self, bindings: Bindings) -> Result<()> {
        bindings.validate()?;
        self.bindings = bindings;
        self.rebind();
        Ok(())
    }

    /// Add `bindings`, replacing sources already bound for the same attributes
    pub fn merge(&mut self, bindings: Bindings) -> Result<()> {
        bindings.validate()?;
        self.bindings.merge(bindings);
        self.rebind();
        Ok(())
    }

    pub fn bind(
        &mut self,
        attribute: LayoutAttribute,
        source: impl Into<AttributeSource>,
    ) -> Result<()> {
        self.merge(Bindings::new().bind(attribute, source))
    }

    pub fn unbind(&mut self, attribute: LayoutAttribute) -> Option<AttributeSource> {
        let removed = self.bindings.remove(attribute);
        if removed.is_some() {
            self.rebind();
        }
        removed
    }

    /// Resolved rects of the current binding set, without committing them
    pub fn rects(&self) -> Stream<Rect> {
        let mut inputs: Vec<Stream<Slot>> = Vec::with_capacity(self.bindings.len() + 3);

        if !self.bindings.contains(LayoutAttribute::Rect) {
            inputs.push(self.target.intrinsic_bounds().map(Slot::Basis));
        }
        for (attribute, source) in self.bindings.iter() {
            inputs.push(
                source
                    .to_stream()
                    .map(move |value| Slot::Value(attribute, value)),
            );
        }
        if self.bindings.iter().any(|(attribute, _)| attribute.depends_on_direction()) {
            inputs.push(writing_direction().map(Slot::Direction));
        }
        if self.bindings.contains(LayoutAttribute::Baseline) {
            inputs.push(self.target.baseline_offsets().map(Slot::BaselineOffset));
        }

        let target = Rc::clone(&self.target);
        let property = self.property;
        combine_latest(inputs).try_map(move |slots| {
            let rect = resolve(target.as_ref(), &slots)?;
            tracing::trace!(?property, %rect, "resolved");
            Ok(rect)
        })
    }

    /// Absolute baseline Y of each resolved rect
    ///
    /// Bind another trampoline's `Baseline` to this to line the two targets
    /// up. The stream reflects the bindings set when it is created.
    pub fn baselines(&self) -> Stream<GeometryValue> {
        baseline_positions(
            &self.rects(),
            &self.target.baseline_offsets(),
            self.target.baseline_origin(),
        )
    }

    /// Start committing resolved rects to the target
    pub fn start(&mut self) {
        self.transform = None;
        self.activate();
    }

    /// Start committing, passing the resolved rects through `transform` first
    ///
    /// ```ignore
    /// trampoline.start_with(move |rects| rects.animate(scheduler.clone(), params));
    /// ```
    pub fn start_with(&mut self, transform: impl Fn(Stream<Rect>) -> Stream<Rect> + 'static) {
        self.transform = Some(Rc::new(transform));
        self.activate();
    }

    fn activate(&mut self) {
        match self.state {
            TrampolineState::TornDown => {
                tracing::warn!(
                    property = ?self.property,
                    "Trampoline: start after teardown ignored"
                );
            }
            TrampolineState::Idle | TrampolineState::Committing => {
                tracing::debug!(
                    "Trampoline: {:?} {:?} -> Committing ({} bindings)",
                    self.property,
                    self.state,
                    self.bindings.len()
                );
                self.state = TrampolineState::Committing;
                self.subscribe();
            }
        }
    }

    /// Stop committing for good
    pub fn tear_down(&mut self) {
        if self.state == TrampolineState::TornDown {
            return;
        }
        tracing::debug!("Trampoline: {:?} {:?} -> TornDown", self.property, self.state);
        self.state = TrampolineState::TornDown;
        if let Some(subscription) = self.subscription.take() {
            subscription.dispose();
        }
    }

    fn rebind(&mut self) {
        if self.state == TrampolineState::Committing {
            tracing::debug!(
                "Trampoline: {:?} rebinding {} attributes",
                self.property,
                self.bindings.len()
            );
            self.subscribe();
        }
    }

    fn subscribe(&mut self) {
        if let Some(previous) = self.subscription.take() {
            previous.dispose();
        }
        self.last_error.borrow_mut().take();

        let rects = match &self.transform {
            Some(transform) => transform(self.rects()),
            None => self.rects(),
        };
        let sink = commit_sink(
            Rc::clone(&self.target),
            self.property,
            Rc::clone(&self.last_error),
        );
        self.subscription = Some(rects.subscribe(sink));
    }
}

impl Drop for Trampoline {
    fn drop(&mut self) {
        self.tear_down();
    }
}

impl fmt::Debug for Trampoline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trampoline")
            .field("property", &self.property)
            .field("state", &self.state)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

/// Fold one combined emission into a rect
fn resolve(target: &dyn Target, slots: &[Slot]) -> Result<Rect> {
    let mut direction = WritingDirection::default();
    let mut baseline_offset = 0.0;
    for slot in slots {
        match slot {
            Slot::Direction(value) => direction = *value,
            Slot::BaselineOffset(value) => baseline_offset = *value,
            Slot::Basis(_) | Slot::Value(..) => {}
        }
    }

    slots.iter().try_fold(Rect::ZERO, |rect, slot| match slot {
        Slot::Basis(basis) => Ok(*basis),
        Slot::Value(LayoutAttribute::Baseline, value) => match value {
            GeometryValue::Scalar(baseline) => {
                Ok(target.align_baseline(rect, *baseline, baseline_offset))
            }
            other => Err(GeometryError::AttributeTypeMismatch {
                attribute: LayoutAttribute::Baseline.name(),
                expected: LayoutAttribute::Baseline.expected_kind(),
                found: other.kind(),
            }),
        },
        Slot::Value(attribute, value) => attribute.apply(rect, value, direction),
        Slot::Direction(_) | Slot::BaselineOffset(_) => Ok(rect),
    })
}
