//! Push-based value streams
//!
//! A [`Stream`] is a cold description of a sequence of values: nothing runs
//! until it is subscribed, and every subscription gets its own run of the
//! producer. Delivery is synchronous on the thread that triggered it.
//!
//! A run ends with exactly one terminal event (error or completion), or when
//! the returned [`Subscription`] is disposed. Disposal is idempotent and
//! stops all further delivery to that subscriber, including values already
//! in flight upstream.
//!
//! ```ignore
//! use tether_core::stream::{combine_latest, Stream};
//!
//! let widths = combine_latest(vec![Stream::just(10.0), Stream::just(20.0)])
//!     .map(|values| values.iter().sum::<f64>());
//!
//! let subscription = widths.subscribe_next(|width| println!("{width}"));
//! subscription.dispose();
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::error::GeometryError;

/// One delivery on a stream
#[derive(Debug, Clone, PartialEq)]
pub enum Event<T> {
    Next(T),
    Error(GeometryError),
    Completed,
}

impl<T> Event<T> {
    /// Transform the carried value, passing terminal events through
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Event<U> {
        match self {
            Event::Next(value) => Event::Next(f(value)),
            Event::Error(error) => Event::Error(error),
            Event::Completed => Event::Completed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Event::Next(_))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Subscription
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct SubscriptionInner {
    disposed: Cell<bool>,
    teardowns: RefCell<Vec<Box<dyn FnOnce()>>>,
}

/// Handle to a running subscription (cheap to clone)
///
/// Clones share the same underlying state: disposing any clone disposes all
/// of them.
#[derive(Clone, Default)]
pub struct Subscription {
    inner: Rc<SubscriptionInner>,
}

impl Subscription {
    pub fn new() -> Self {
        Self::default()
    }

    /// An already-disposed subscription
    pub fn disposed() -> Self {
        let subscription = Self::new();
        subscription.dispose();
        subscription
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// Register cleanup to run on disposal
    ///
    /// Runs immediately if the subscription is already disposed.
    pub fn on_dispose(&self, teardown: impl FnOnce() + 'static) {
        if self.is_disposed() {
            teardown();
            return;
        }
        self.inner.teardowns.borrow_mut().push(Box::new(teardown));
    }

    /// Dispose `child` together with this subscription
    pub fn add(&self, child: Subscription) {
        if Rc::ptr_eq(&self.inner, &child.inner) {
            return;
        }
        self.on_dispose(move || child.dispose());
    }

    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }

        // Teardowns may dispose other subscriptions that point back here
        let teardowns = std::mem::take(&mut *self.inner.teardowns.borrow_mut());
        for teardown in teardowns {
            teardown();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Observer
// ─────────────────────────────────────────────────────────────────────────────

struct ObserverInner<T> {
    sink: Box<dyn Fn(Event<T>)>,
    subscription: Subscription,
    stopped: Cell<bool>,
}

/// The receiving end handed to a stream's producer
///
/// Enforces the stream grammar: values after a terminal event, or after the
/// subscription was disposed, are dropped.
pub struct Observer<T> {
    inner: Rc<ObserverInner<T>>,
}

impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Observer<T> {
    pub fn new(sink: impl Fn(Event<T>) + 'static) -> Self {
        Self {
            inner: Rc::new(ObserverInner {
                sink: Box::new(sink),
                subscription: Subscription::new(),
                stopped: Cell::new(false),
            }),
        }
    }

    pub fn next(&self, value: T) {
        if self.is_closed() {
            return;
        }
        (self.inner.sink)(Event::Next(value));
    }

    pub fn error(&self, error: GeometryError) {
        self.terminate(Event::Error(error));
    }

    pub fn complete(&self) {
        self.terminate(Event::Completed);
    }

    pub fn send(&self, event: Event<T>) {
        match event {
            Event::Next(value) => self.next(value),
            terminal => self.terminate(terminal),
        }
    }

    fn terminate(&self, event: Event<T>) {
        if self.is_closed() {
            return;
        }
        self.inner.stopped.set(true);
        (self.inner.sink)(event);
        self.inner.subscription.dispose();
    }

    /// True once a terminal event was delivered or the subscription disposed
    pub fn is_closed(&self) -> bool {
        self.inner.stopped.get() || self.inner.subscription.is_disposed()
    }

    /// The subscription this observer feeds
    ///
    /// Producers attach their cleanup here.
    pub fn subscription(&self) -> &Subscription {
        &self.inner.subscription
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stream
// ─────────────────────────────────────────────────────────────────────────────

/// A cold stream of `T` (cheap to clone)
pub struct Stream<T> {
    producer: Rc<dyn Fn(Observer<T>)>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            producer: Rc::clone(&self.producer),
        }
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream").finish_non_exhaustive()
    }
}

impl<T: 'static> Stream<T> {
    /// Build a stream from a producer run once per subscription
    pub fn new(producer: impl Fn(Observer<T>) + 'static) -> Self {
        Self {
            producer: Rc::new(producer),
        }
    }

    /// One value, then completion
    pub fn just(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(move |observer| {
            observer.next(value.clone());
            observer.complete();
        })
    }

    /// Completes without emitting
    pub fn empty() -> Self {
        Self::new(|observer| observer.complete())
    }

    /// Never emits or terminates
    pub fn never() -> Self {
        Self::new(|_| {})
    }

    /// Fails immediately
    pub fn fail(error: GeometryError) -> Self {
        Self::new(move |observer| observer.error(error.clone()))
    }

    /// Every item of `values` in order, then completion
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter(values: impl IntoIterator<Item = T>) -> Self
    where
        T: Clone,
    {
        let values: Vec<T> = values.into_iter().collect();
        Self::new(move |observer| {
            for value in &values {
                if observer.is_closed() {
                    return;
                }
                observer.next(value.clone());
            }
            observer.complete();
        })
    }

    /// Run the producer, delivering every event to `sink`
    pub fn subscribe(&self, sink: impl Fn(Event<T>) + 'static) -> Subscription {
        let observer = Observer::new(sink);
        let subscription = observer.subscription().clone();
        (self.producer)(observer);
        subscription
    }

    /// Subscribe to values only, ignoring terminal events
    pub fn subscribe_next(&self, on_next: impl Fn(T) + 'static) -> Subscription {
        self.subscribe(move |event| {
            if let Event::Next(value) = event {
                on_next(value);
            }
        })
    }

    fn pipe<U: 'static>(&self, on_event: impl Fn(&Observer<U>, Event<T>) + 'static) -> Stream<U> {
        let source = self.clone();
        let on_event = Rc::new(on_event);
        Stream::new(move |observer: Observer<U>| {
            let on_event = Rc::clone(&on_event);
            let downstream = observer.clone();
            let upstream = source.subscribe(move |event| on_event(&downstream, event));
            observer.subscription().add(upstream);
        })
    }

    pub fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> Stream<U> {
        self.pipe(move |observer, event| observer.send(event.map(&f)))
    }

    /// Map with a fallible function; the first `Err` terminates the stream
    pub fn try_map<U: 'static>(
        &self,
        f: impl Fn(T) -> Result<U, GeometryError> + 'static,
    ) -> Stream<U> {
        self.pipe(move |observer, event| match event {
            Event::Next(value) => match f(value) {
                Ok(mapped) => observer.next(mapped),
                Err(error) => observer.error(error),
            },
            Event::Error(error) => observer.error(error),
            Event::Completed => observer.complete(),
        })
    }

    pub fn filter_map<U: 'static>(&self, f: impl Fn(T) -> Option<U> + 'static) -> Stream<U> {
        self.pipe(move |observer, event| match event {
            Event::Next(value) => {
                if let Some(mapped) = f(value) {
                    observer.next(mapped);
                }
            }
            Event::Error(error) => observer.error(error),
            Event::Completed => observer.complete(),
        })
    }

    /// Run `f` on every value before passing it on
    pub fn inspect(&self, f: impl Fn(&T) + 'static) -> Stream<T> {
        self.pipe(move |observer, event| {
            if let Event::Next(value) = &event {
                f(value);
            }
            observer.send(event);
        })
    }

    /// Drop values equal to the previously delivered one
    pub fn distinct_until_changed(&self) -> Stream<T>
    where
        T: Clone + PartialEq,
    {
        let source = self.clone();
        Stream::new(move |observer: Observer<T>| {
            let last: RefCell<Option<T>> = RefCell::new(None);
            let downstream = observer.clone();
            let upstream = source.subscribe(move |event| match event {
                Event::Next(value) => {
                    let changed = last.borrow().as_ref() != Some(&value);
                    if changed {
                        *last.borrow_mut() = Some(value.clone());
                        downstream.next(value);
                    }
                }
                terminal => downstream.send(terminal),
            });
            observer.subscription().add(upstream);
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Combining
// ─────────────────────────────────────────────────────────────────────────────

struct CombineState<T> {
    latest: Vec<Option<T>>,
    active: usize,
}

/// Latest value of every input, re-emitted whenever any input changes
///
/// Nothing is emitted until every input has produced a value. The first
/// error from any input terminates the result. The result completes when
/// the last input completes; an empty input list completes immediately.
pub fn combine_latest<T: Clone + 'static>(streams: Vec<Stream<T>>) -> Stream<Vec<T>> {
    Stream::new(move |observer: Observer<Vec<T>>| {
        let count = streams.len();
        if count == 0 {
            observer.complete();
            return;
        }

        let state = Rc::new(RefCell::new(CombineState {
            latest: vec![None; count],
            active: count,
        }));

        for (index, stream) in streams.iter().enumerate() {
            if observer.is_closed() {
                break;
            }

            let state = Rc::clone(&state);
            let downstream = observer.clone();
            let upstream = stream.subscribe(move |event| match event {
                Event::Next(value) => {
                    let snapshot = {
                        let mut state = state.borrow_mut();
                        state.latest[index] = Some(value);
                        state.latest.iter().cloned().collect::<Option<Vec<T>>>()
                    };
                    if let Some(values) = snapshot {
                        downstream.next(values);
                    }
                }
                Event::Error(error) => downstream.error(error),
                Event::Completed => {
                    let finished = {
                        let mut state = state.borrow_mut();
                        state.active -= 1;
                        state.active == 0
                    };
                    if finished {
                        downstream.complete();
                    }
                }
            });
            observer.subscription().add(upstream);
        }
    })
}

#[derive(Clone)]
enum Pair<A, B> {
    First(A),
    Second(B),
}

/// [`combine_latest`] over two streams of different types
pub fn combine_latest2<A, B>(first: &Stream<A>, second: &Stream<B>) -> Stream<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    let first = first.map(Pair::First);
    let second = second.map(Pair::Second);
    combine_latest(vec![first, second]).filter_map(|values| {
        let mut values = values.into_iter();
        match (values.next(), values.next()) {
            (Some(Pair::First(a)), Some(Pair::Second(b))) => Some((a, b)),
            _ => None,
        }
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Flattening
// ─────────────────────────────────────────────────────────────────────────────

struct ConcatState<T> {
    queue: VecDeque<Stream<T>>,
    active: bool,
    draining: bool,
    outer_done: bool,
    current: Option<Subscription>,
}

struct SwitchState {
    generation: u64,
    current: Option<Subscription>,
    inner_active: bool,
    outer_done: bool,
}

impl<T: 'static> Stream<Stream<T>> {
    /// Subscribe to each inner stream only after the previous one completes
    ///
    /// Completes once the outer stream and every queued inner stream have
    /// completed.
    pub fn concat(&self) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |observer: Observer<T>| {
            let state = Rc::new(RefCell::new(ConcatState {
                queue: VecDeque::new(),
                active: false,
                draining: false,
                outer_done: false,
                current: None,
            }));

            let teardown_state = Rc::clone(&state);
            observer.subscription().on_dispose(move || {
                let current = teardown_state.borrow_mut().current.take();
                if let Some(current) = current {
                    current.dispose();
                }
            });

            let outer_state = Rc::clone(&state);
            let downstream = observer.clone();
            let outer = source.subscribe(move |event| match event {
                Event::Next(inner) => {
                    outer_state.borrow_mut().queue.push_back(inner);
                    drain_concat(&outer_state, &downstream);
                }
                Event::Error(error) => downstream.error(error),
                Event::Completed => {
                    outer_state.borrow_mut().outer_done = true;
                    drain_concat(&outer_state, &downstream);
                }
            });
            observer.subscription().add(outer);
        })
    }

    /// Forward only the most recent inner stream
    ///
    /// A new inner stream disposes the previous one. Completes once the outer
    /// stream and the current inner stream have both completed.
    pub fn switch_to_latest(&self) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |observer: Observer<T>| {
            let state = Rc::new(RefCell::new(SwitchState {
                generation: 0,
                current: None,
                inner_active: false,
                outer_done: false,
            }));

            let teardown_state = Rc::clone(&state);
            observer.subscription().on_dispose(move || {
                let current = teardown_state.borrow_mut().current.take();
                if let Some(current) = current {
                    current.dispose();
                }
            });

            let outer_state = Rc::clone(&state);
            let downstream = observer.clone();
            let outer = source.subscribe(move |event| match event {
                Event::Next(inner) => switch_inner(&outer_state, &downstream, inner),
                Event::Error(error) => downstream.error(error),
                Event::Completed => {
                    let finished = {
                        let mut state = outer_state.borrow_mut();
                        state.outer_done = true;
                        !state.inner_active
                    };
                    if finished {
                        downstream.complete();
                    }
                }
            });
            observer.subscription().add(outer);
        })
    }
}

fn drain_concat<T: 'static>(state: &Rc<RefCell<ConcatState<T>>>, observer: &Observer<T>) {
    loop {
        let inner = {
            let mut guard = state.borrow_mut();
            if guard.active || guard.draining {
                return;
            }
            let popped = guard.queue.pop_front();
            match popped {
                Some(inner) => {
                    guard.active = true;
                    guard.draining = true;
                    inner
                }
                None => {
                    let finished = guard.outer_done;
                    drop(guard);
                    if finished {
                        observer.complete();
                    }
                    return;
                }
            }
        };

        if observer.is_closed() {
            return;
        }

        let inner_state = Rc::clone(state);
        let downstream = observer.clone();
        let subscription = inner.subscribe(move |event| match event {
            Event::Next(value) => downstream.next(value),
            Event::Error(error) => downstream.error(error),
            Event::Completed => {
                {
                    let mut guard = inner_state.borrow_mut();
                    guard.active = false;
                    guard.current = None;
                }
                drain_concat(&inner_state, &downstream);
            }
        });

        let mut guard = state.borrow_mut();
        guard.draining = false;
        if guard.active {
            guard.current = Some(subscription);
            return;
        }
        // The inner stream completed synchronously; move on to the next one
    }
}

fn switch_inner<T: 'static>(
    state: &Rc<RefCell<SwitchState>>,
    observer: &Observer<T>,
    inner: Stream<T>,
) {
    let (generation, previous) = {
        let mut guard = state.borrow_mut();
        guard.generation += 1;
        guard.inner_active = true;
        (guard.generation, guard.current.take())
    };
    if let Some(previous) = previous {
        previous.dispose();
    }

    let inner_state = Rc::clone(state);
    let downstream = observer.clone();
    let subscription = inner.subscribe(move |event| {
        if inner_state.borrow().generation != generation {
            return;
        }
        match event {
            Event::Next(value) => downstream.next(value),
            Event::Error(error) => downstream.error(error),
            Event::Completed => {
                let finished = {
                    let mut guard = inner_state.borrow_mut();
                    guard.inner_active = false;
                    guard.current = None;
                    guard.outer_done
                };
                if finished {
                    downstream.complete();
                }
            }
        }
    });

    let mut guard = state.borrow_mut();
    if guard.generation != generation {
        drop(guard);
        subscription.dispose();
    } else if guard.inner_active {
        guard.current = Some(subscription);
    }
}
