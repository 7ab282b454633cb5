//! Repository layer: blob persistence contracts and the task collection
//! owner.
//!
//! # Responsibility
//! - Define the key-value persistence boundary consumed by the repository.
//! - Keep collection state transitions and change fan-out in one place.
//!
//! # Invariants
//! - Only the task repository reads or writes the fixed store key.
//! - Store failures degrade to in-memory operation, never to a crash.

pub mod blob_store;
pub mod task_repo;
