//! Animated streams
//!
//! Wraps each value of a stream in an animation: the value is delivered
//! inside an animated scope (see [`crate::context`]) while the driver runs
//! its transaction, so whatever commits the value can see that it should
//! animate.

use tether_core::{Observer, Stream};

use crate::context::with_animation;
use crate::curve::AnimationParams;
use crate::driver::AnimationDriver;

/// Animation adapters for any stream
pub trait AnimatedStreamExt<T: 'static> {
    /// One inner stream per value
    ///
    /// Each inner stream delivers its value inside an animated scope and
    /// completes when the driver reports the animation finished. Disposing an
    /// inner stream cancels its animation.
    fn animated_streams<D>(&self, driver: D, params: AnimationParams) -> Stream<Stream<T>>
    where
        D: AnimationDriver + Clone + 'static;

    /// Animate every value, each animation starting after the previous one
    /// finished
    fn animate<D>(&self, driver: D, params: AnimationParams) -> Stream<T>
    where
        D: AnimationDriver + Clone + 'static,
    {
        self.animated_streams(driver, params).concat()
    }

    /// Animate every value, cancelling any animation still in flight
    fn animate_interruptibly<D>(&self, driver: D, params: AnimationParams) -> Stream<T>
    where
        D: AnimationDriver + Clone + 'static,
    {
        self.animated_streams(driver, params).switch_to_latest()
    }
}

impl<T: Clone + 'static> AnimatedStreamExt<T> for Stream<T> {
    fn animated_streams<D>(&self, driver: D, params: AnimationParams) -> Stream<Stream<T>>
    where
        D: AnimationDriver + Clone + 'static,
    {
        self.map(move |value| animated_value(value, driver.clone(), params))
    }
}

fn animated_value<T, D>(value: T, driver: D, params: AnimationParams) -> Stream<T>
where
    T: Clone + 'static,
    D: AnimationDriver + 'static,
{
    Stream::new(move |observer: Observer<T>| {
        let delivering = observer.clone();
        let mut changes = || {
            with_animation(params, || delivering.next(value.clone()));
        };

        let finished = observer.clone();
        let completion = Box::new(move || {
            tracing::trace!("animated value finished");
            finished.complete();
        });

        let animation = driver.animate(params, &mut changes, completion);
        observer.subscription().add(animation);
    })
}
