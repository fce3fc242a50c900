//! View-facing services over the domain store.
//!
//! # Responsibility
//! - Project store collections into an observable snapshot.
//! - Provide one scoped binder to views and derived statistics over it.
//!
//! # See also
//! - `crate::store` for the mutation rules these services delegate to.

pub mod calendar;
pub mod movement_binder;
pub mod provider;
pub mod stats;
