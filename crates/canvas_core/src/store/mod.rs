//! Scene storage contracts and the in-memory implementation.
//!
//! # Responsibility
//! - Hold the canonical ordered element sequence and selection key.
//! - Publish a snapshot to observers after every state transition.
//!
//! # Invariants
//! - Insertion order is paint order.
//! - Selection is stored once; per-element flags are derived on read.
//! - Only store methods mutate scene state.

pub mod element_store;
pub mod snapshot;
