//! Animated delivery scope
//!
//! While an animated value is being delivered, the parameters of its
//! animation are visible to everything running synchronously inside that
//! delivery. Scopes nest strictly: the innermost one wins, and leaving it
//! restores the enclosing one.
//!
//! ```ignore
//! use tether_animation::context::{current_animation, with_animation};
//!
//! with_animation(AnimationParams::default(), || {
//!     assert!(current_animation().is_some());
//! });
//! assert!(current_animation().is_none());
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;

use crate::curve::AnimationParams;

thread_local! {
    static ANIMATION_STACK: RefCell<Vec<AnimationParams>> = const { RefCell::new(Vec::new()) };
}

/// Check if the current thread is delivering an animated value
pub fn in_animated_context() -> bool {
    ANIMATION_STACK.with(|stack| !stack.borrow().is_empty())
}

/// Parameters of the innermost animated scope, if any
pub fn current_animation() -> Option<AnimationParams> {
    ANIMATION_STACK.with(|stack| stack.borrow().last().copied())
}

/// Run `f` inside an animated scope
pub fn with_animation<R>(params: AnimationParams, f: impl FnOnce() -> R) -> R {
    let _scope = AnimationScope::enter(params);
    f()
}

/// Guard for an animated scope; leaving happens on drop
///
/// Bound to the thread that entered it.
#[must_use = "the scope ends as soon as the guard is dropped"]
pub struct AnimationScope {
    /// Stack depth below this scope's entry
    depth: usize,
    _thread_bound: PhantomData<*const ()>,
}

impl AnimationScope {
    pub fn enter(params: AnimationParams) -> Self {
        let depth = ANIMATION_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(params);
            stack.len() - 1
        });
        Self {
            depth,
            _thread_bound: PhantomData,
        }
    }
}

impl Drop for AnimationScope {
    // Also leaves every scope entered after this one, whatever order the
    // guards are dropped in
    fn drop(&mut self) {
        ANIMATION_STACK.with(|stack| stack.borrow_mut().truncate(self.depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::AnimationCurve;
    use std::time::Duration;

    #[test]
    fn test_outside_any_scope() {
        assert!(!in_animated_context());
        assert_eq!(current_animation(), None);
    }

    #[test]
    fn test_scopes_nest() {
        let outer = AnimationParams::with_duration(Duration::from_secs(1));
        let inner = AnimationParams::with_curve(AnimationCurve::Linear);

        with_animation(outer, || {
            assert_eq!(current_animation(), Some(outer));
            with_animation(inner, || {
                assert_eq!(current_animation(), Some(inner));
            });
            assert_eq!(current_animation(), Some(outer));
        });
        assert!(!in_animated_context());
    }

    #[test]
    fn test_out_of_order_drop_restores_enclosing_scope() {
        let outer = AnimationParams::with_duration(Duration::from_secs(1));
        let inner = AnimationParams::with_curve(AnimationCurve::EaseIn);

        let first = AnimationScope::enter(outer);
        let second = AnimationScope::enter(inner);
        drop(first);
        assert!(!in_animated_context());

        drop(second);
        assert!(!in_animated_context());

        let base = AnimationScope::enter(outer);
        let first = AnimationScope::enter(inner);
        let second = AnimationScope::enter(inner);
        drop(first);
        drop(second);
        assert_eq!(current_animation(), Some(outer));
        drop(base);
        assert_eq!(current_animation(), None);
    }

    #[test]
    fn test_scope_ends_on_panic() {
        let result = std::panic::catch_unwind(|| {
            with_animation(AnimationParams::default(), || panic!("delivery failed"));
        });
        assert!(result.is_err());
        assert!(!in_animated_context());
    }
}
