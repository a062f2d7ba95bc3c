//! Presenter hook invoked by the solver between steps
//!
//! The solver never renders, sleeps or performs I/O; anything of that kind
//! lives behind this trait. Cancellation is polled once per step.

use crate::algorithm::solver::CollapseRecord;
use crate::spatial::grid::GridSnapshot;

/// Receives grid snapshots while a solve runs
pub trait SolveObserver {
    /// Called after every successful collapse step
    fn on_step(&mut self, _snapshot: &GridSnapshot, _record: &CollapseRecord) {}

    /// Called once when the solve loop ends, with the last valid grid if it stopped at a contradiction
    fn on_finish(&mut self, _snapshot: &GridSnapshot) {}

    /// Polled before every step; returning true stops the solve early
    fn should_cancel(&mut self) -> bool {
        false
    }
}

impl SolveObserver for () {}

impl<O: SolveObserver + ?Sized> SolveObserver for &mut O {
    fn on_step(&mut self, snapshot: &GridSnapshot, record: &CollapseRecord) {
        (**self).on_step(snapshot, record);
    }

    fn on_finish(&mut self, snapshot: &GridSnapshot) {
        (**self).on_finish(snapshot);
    }

    fn should_cancel(&mut self) -> bool {
        (**self).should_cancel()
    }
}

impl<O: SolveObserver> SolveObserver for Option<O> {
    fn on_step(&mut self, snapshot: &GridSnapshot, record: &CollapseRecord) {
        if let Some(observer) = self {
            observer.on_step(snapshot, record);
        }
    }

    fn on_finish(&mut self, snapshot: &GridSnapshot) {
        if let Some(observer) = self {
            observer.on_finish(snapshot);
        }
    }

    fn should_cancel(&mut self) -> bool {
        self.as_mut().is_some_and(SolveObserver::should_cancel)
    }
}

impl<A: SolveObserver, B: SolveObserver> SolveObserver for (A, B) {
    fn on_step(&mut self, snapshot: &GridSnapshot, record: &CollapseRecord) {
        self.0.on_step(snapshot, record);
        self.1.on_step(snapshot, record);
    }

    fn on_finish(&mut self, snapshot: &GridSnapshot) {
        self.0.on_finish(snapshot);
        self.1.on_finish(snapshot);
    }

    fn should_cancel(&mut self) -> bool {
        self.0.should_cancel() || self.1.should_cancel()
    }
}

/// Adapts a closure into a presenter called after each step and at the end
pub struct Callback<F>(pub F);

impl<F: FnMut(&GridSnapshot)> SolveObserver for Callback<F> {
    fn on_step(&mut self, snapshot: &GridSnapshot, _record: &CollapseRecord) {
        (self.0)(snapshot);
    }

    fn on_finish(&mut self, snapshot: &GridSnapshot) {
        (self.0)(snapshot);
    }
}

/// Adapts a predicate into a cancellation hook
pub struct CancelWhen<F>(pub F);

impl<F: FnMut() -> bool> SolveObserver for CancelWhen<F> {
    fn should_cancel(&mut self) -> bool {
        (self.0)()
    }
}
