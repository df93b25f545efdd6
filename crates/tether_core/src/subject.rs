//! Hot stream sources
//!
//! A [`Subject`] is both a stream and the handle that feeds it. Adapters use
//! subjects to turn platform callbacks (a view resized, the writing direction
//! flipped) into streams.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::GeometryError;
use crate::stream::{Event, Observer, Stream};

new_key_type! {
    /// Unique identifier for a subject's observer
    pub struct ObserverId;
}

struct SubjectInner<T> {
    observers: SlotMap<ObserverId, Observer<T>>,
    latest: Option<T>,
    replay: bool,
    terminal: Option<Event<T>>,
}

/// A multicast stream source (cheap to clone)
///
/// Every value sent is delivered to the observers subscribed at that moment.
/// A replaying subject also hands its latest value to each new subscriber.
/// After `complete` or `fail`, new subscribers receive only that terminal
/// event.
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectInner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Subject<T> {
    /// A subject that only delivers values sent after subscription
    pub fn new() -> Self {
        Self::build(None, false)
    }

    /// A replaying subject seeded with `value`
    pub fn with_value(value: T) -> Self {
        Self::build(Some(value), true)
    }

    fn build(latest: Option<T>, replay: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner {
                observers: SlotMap::with_key(),
                latest,
                replay,
                terminal: None,
            })),
        }
    }

    pub fn send(&self, value: T) {
        let observers: SmallVec<[Observer<T>; 4]> = {
            let mut inner = self.inner.borrow_mut();
            if inner.terminal.is_some() {
                return;
            }
            if inner.replay {
                inner.latest = Some(value.clone());
            }
            inner.observers.values().cloned().collect()
        };

        for observer in observers {
            observer.next(value.clone());
        }
    }

    pub fn complete(&self) {
        self.terminate(Event::Completed);
    }

    pub fn fail(&self, error: GeometryError) {
        self.terminate(Event::Error(error));
    }

    fn terminate(&self, event: Event<T>) {
        let observers: SmallVec<[Observer<T>; 4]> = {
            let mut inner = self.inner.borrow_mut();
            if inner.terminal.is_some() {
                return;
            }
            inner.terminal = Some(event.clone());
            inner.observers.drain().map(|(_, observer)| observer).collect()
        };

        tracing::trace!(observers = observers.len(), "subject terminated");

        for observer in observers {
            observer.send(event.clone());
        }
    }

    /// The most recent value, if this subject replays
    pub fn latest(&self) -> Option<T> {
        self.inner.borrow().latest.clone()
    }

    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    /// A stream view of this subject
    ///
    /// The stream does not keep the subject alive: once every `Subject`
    /// handle is dropped, new subscribers see an empty stream.
    pub fn stream(&self) -> Stream<T> {
        let weak = Rc::downgrade(&self.inner);
        Stream::new(move |observer: Observer<T>| {
            let Some(inner) = weak.upgrade() else {
                observer.complete();
                return;
            };
            subscribe_to(&inner, observer);
        })
    }
}

fn subscribe_to<T: Clone + 'static>(inner: &Rc<RefCell<SubjectInner<T>>>, observer: Observer<T>) {
    let (terminal, replayed) = {
        let state = inner.borrow();
        let replayed = if state.replay { state.latest.clone() } else { None };
        (state.terminal.clone(), replayed)
    };

    if let Some(terminal) = terminal {
        observer.send(terminal);
        return;
    }

    if let Some(value) = replayed {
        observer.next(value);
    }
    if observer.is_closed() {
        return;
    }

    let id = inner.borrow_mut().observers.insert(observer.clone());
    let weak: Weak<RefCell<SubjectInner<T>>> = Rc::downgrade(inner);
    observer.subscription().on_dispose(move || {
        if let Some(inner) = weak.upgrade() {
            inner.borrow_mut().observers.remove(id);
        }
    });
}
