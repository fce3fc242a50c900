//! Thread-scoped provider for the application's movement binder.
//!
//! # Responsibility
//! - Make one binder reachable to views for the duration of a scope.
//! - Fail fast when views reach for a binder outside any scope.
//!
//! # Invariants
//! - Scopes nest; the innermost binder wins and the outer one is restored
//!   when the inner scope ends, including on unwind.
//! - `use_movement` outside a scope panics. It never falls back to a default.
//! - `use_movement` must not be re-entered for the same binder; the binder
//!   is exclusively borrowed for the duration of the callback.

use crate::service::movement_binder::MovementBinder;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

type SharedBinder = Rc<RefCell<MovementBinder>>;

thread_local! {
    static PROVIDERS: RefCell<Vec<SharedBinder>> = const { RefCell::new(Vec::new()) };
}

struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        PROVIDERS.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Installs `binder` for the duration of `body` and hands it back afterwards.
pub fn provide<R>(binder: MovementBinder, body: impl FnOnce() -> R) -> (R, MovementBinder) {
    let shared: SharedBinder = Rc::new(RefCell::new(binder));
    let depth = PROVIDERS.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.push(Rc::clone(&shared));
        stack.len()
    });
    debug!("event=provider_enter module=service status=ok depth={depth}");

    let result = {
        let _guard = ScopeGuard;
        body()
    };

    debug!("event=provider_exit module=service status=ok depth={depth}");
    let binder = match Rc::try_unwrap(shared) {
        Ok(cell) => cell.into_inner(),
        Err(_) => panic!("movement binder is still shared after its provider scope ended"),
    };
    (result, binder)
}

/// Runs `f` against the innermost provided binder.
///
/// # Panics
/// - When called outside any `provide` scope.
/// - When re-entered from inside another `use_movement` on the same binder.
pub fn use_movement<R>(f: impl FnOnce(&mut MovementBinder) -> R) -> R {
    let Some(shared) = PROVIDERS.with(|stack| stack.borrow().last().cloned()) else {
        panic!("use_movement must be used within a movement provider scope");
    };
    let mut binder = shared.borrow_mut();
    f(&mut binder)
}

/// Returns whether a binder is provided on this thread.
pub fn has_movement_provider() -> bool {
    PROVIDERS.with(|stack| !stack.borrow().is_empty())
}
