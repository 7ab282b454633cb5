//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `docap_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use docap_core::{MemoryBlobStore, TaskRepository};

fn main() {
    println!("docap_core ping={}", docap_core::ping());
    println!("docap_core version={}", docap_core::core_version());

    // Exercise the repository against the in-memory store so the probe
    // covers the collection path, not just linkage.
    let mut repo = TaskRepository::new(MemoryBlobStore::new());
    repo.initialize();
    repo.add_task("smoke task");
    println!("docap_core tasks={}", repo.all_tasks().len());
}
