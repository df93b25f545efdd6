//! Animation drivers
//!
//! A driver is the platform's animation engine: it applies a batch of
//! changes as one animated transaction and reports when that transaction has
//! finished.

use tether_core::Subscription;

use crate::curve::AnimationParams;

/// Platform animation engine
pub trait AnimationDriver {
    /// Apply `changes` as one animation and call `completion` when it ends
    ///
    /// `changes` runs synchronously before this returns. Disposing the
    /// returned subscription cancels the animation, after which `completion`
    /// is never called.
    fn animate(
        &self,
        params: AnimationParams,
        changes: &mut dyn FnMut(),
        completion: Box<dyn FnOnce()>,
    ) -> Subscription;
}

/// Applies every change and completes it straight away
///
/// Suited to headless use and to platforms without an animation engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateDriver;

impl AnimationDriver for ImmediateDriver {
    fn animate(
        &self,
        _params: AnimationParams,
        changes: &mut dyn FnMut(),
        completion: Box<dyn FnOnce()>,
    ) -> Subscription {
        changes();
        completion();
        Subscription::disposed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_immediate_driver_runs_changes_then_completes() {
        let steps = Rc::new(RefCell::new(Vec::new()));
        let changed = Rc::clone(&steps);
        let completed = Rc::clone(&steps);

        let subscription = ImmediateDriver.animate(
            AnimationParams::default(),
            &mut || changed.borrow_mut().push("changes"),
            Box::new(move || completed.borrow_mut().push("completion")),
        );

        assert_eq!(*steps.borrow(), vec!["changes", "completion"]);
        assert!(subscription.is_disposed());
    }
}
