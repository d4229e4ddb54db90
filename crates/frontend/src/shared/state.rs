//! Mutable state cell shared by the async drivers.
//!
//! The query and mutation drivers only need "read" and "mutate in place".
//! In the app that is a `RwSignal`, in unit tests a plain `Rc<RefCell<_>>`.

use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub trait StateCell<S> {
    /// Mutates the state. A disposed cell ignores the call.
    fn apply(&self, f: impl FnOnce(&mut S));

    /// Reads without subscribing. `None` once the cell is disposed.
    fn peek<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R>;
}

impl<S: Send + Sync + 'static> StateCell<S> for RwSignal<S> {
    fn apply(&self, f: impl FnOnce(&mut S)) {
        if self.try_update(f).is_none() {
            log::debug!("state update skipped, signal disposed");
        }
    }

    fn peek<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }
}

impl<S> StateCell<S> for Rc<RefCell<S>> {
    fn apply(&self, f: impl FnOnce(&mut S)) {
        f(&mut self.borrow_mut());
    }

    fn peek<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_cell_reads_back_updates() {
        let owner = Owner::new();
        owner.with(|| {
            let cell = RwSignal::new(1);
            cell.apply(|v| *v += 1);
            assert_eq!(cell.peek(|v| *v), Some(2));
        });
    }

    #[test]
    fn test_disposed_signal_is_ignored() {
        let owner = Owner::new();
        let cell = owner.with(|| RwSignal::new(1));
        cell.dispose();
        cell.apply(|v| *v += 1);
        assert_eq!(cell.peek(|v| *v), None);
    }

    #[test]
    fn test_refcell_cell() {
        let cell = Rc::new(RefCell::new(vec![1]));
        cell.apply(|v| v.push(2));
        assert_eq!(cell.peek(|v| v.len()), Some(2));
    }
}
