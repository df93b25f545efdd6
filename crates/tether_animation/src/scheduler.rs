//! Frame-driven animation scheduler
//!
//! Records every animated transaction and advances them when ticked, so
//! callers control time explicitly. Completions fire from `tick`, outside
//! any internal borrow, which lets them start new animations.
//!
//! ```ignore
//! let scheduler = AnimationScheduler::new();
//! let layout = rects.animate(scheduler.clone(), AnimationParams::default());
//!
//! // In the frame loop:
//! while scheduler.tick(Duration::from_millis(16)) {}
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use tether_core::Subscription;

use crate::curve::AnimationParams;
use crate::driver::AnimationDriver;

new_key_type! {
    /// Handle to a running animated transaction
    pub struct TransactionId;
}

struct Transaction {
    params: AnimationParams,
    elapsed: Duration,
    completion: Option<Box<dyn FnOnce()>>,
}

impl Transaction {
    fn is_finished(&self) -> bool {
        self.elapsed >= self.params.duration
    }
}

#[derive(Default)]
struct SchedulerInner {
    transactions: SlotMap<TransactionId, Transaction>,
}

/// Animation driver advanced by explicit ticks (cheap to clone)
///
/// Clones share the same set of transactions.
#[derive(Clone, Default)]
pub struct AnimationScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every transaction by `dt`
    ///
    /// Returns true if any transactions are still running.
    pub fn tick(&self, dt: Duration) -> bool {
        let completions: Vec<Box<dyn FnOnce()>> = {
            let mut inner = self.inner.borrow_mut();
            for (_, transaction) in inner.transactions.iter_mut() {
                transaction.elapsed += dt;
            }

            let finished: Vec<TransactionId> = inner
                .transactions
                .iter()
                .filter(|(_, transaction)| transaction.is_finished())
                .map(|(id, _)| id)
                .collect();

            finished
                .into_iter()
                .filter_map(|id| inner.transactions.remove(id))
                .filter_map(|mut transaction| transaction.completion.take())
                .collect()
        };

        if !completions.is_empty() {
            tracing::debug!(
                "AnimationScheduler: {} transaction(s) finished",
                completions.len()
            );
        }
        for completion in completions {
            completion();
        }

        self.has_active_animations()
    }

    /// Run every transaction to its end
    pub fn finish_all(&self) {
        let longest = self
            .inner
            .borrow()
            .transactions
            .values()
            .map(|transaction| transaction.params.duration.saturating_sub(transaction.elapsed))
            .max();

        if let Some(remaining) = longest {
            self.tick(remaining);
        }
    }

    /// Eased progress of a running transaction
    pub fn progress(&self, id: TransactionId) -> Option<f64> {
        self.inner
            .borrow()
            .transactions
            .get(id)
            .map(|transaction| transaction.params.progress_at(transaction.elapsed))
    }

    /// Ids of the running transactions
    pub fn transaction_ids(&self) -> Vec<TransactionId> {
        self.inner.borrow().transactions.keys().collect()
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().transactions.len()
    }

    pub fn has_active_animations(&self) -> bool {
        !self.inner.borrow().transactions.is_empty()
    }
}

impl AnimationDriver for AnimationScheduler {
    fn animate(
        &self,
        params: AnimationParams,
        changes: &mut dyn FnMut(),
        completion: Box<dyn FnOnce()>,
    ) -> Subscription {
        changes();

        if params.duration.is_zero() {
            completion();
            return Subscription::disposed();
        }

        let id = self.inner.borrow_mut().transactions.insert(Transaction {
            params,
            elapsed: Duration::ZERO,
            completion: Some(completion),
        });
        tracing::debug!(
            "AnimationScheduler: started transaction {:?} ({:?}, {:?})",
            id,
            params.duration,
            params.curve
        );

        let subscription = Subscription::new();
        let inner = Rc::downgrade(&self.inner);
        subscription.on_dispose(move || {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let cancelled = inner.borrow_mut().transactions.remove(id).is_some();
            if cancelled {
                tracing::debug!("AnimationScheduler: cancelled transaction {:?}", id);
            }
        });
        subscription
    }
}
