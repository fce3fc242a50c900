//! Authoritative in-memory state and its mutation contract.
//!
//! # Responsibility
//! - Define the `TrainingStore` contract views reach through the binder.
//! - Own the catalog, logs, user and quests in one explicitly constructed
//!   instance; there is no process-global store.
//!
//! # Invariants
//! - At most one `TrainingLog` per date.
//! - Every write goes through a `TrainingStore` mutation method.

pub mod domain_store;

pub use domain_store::{DomainStore, InitialState, TrainingStore};
