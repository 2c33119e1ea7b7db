//! Core use-case services.
//!
//! # Responsibility
//! - Turn parsed commands into store mutations (`executor`).
//! - Run whole agent messages as ordered batches (`processor`).
//!
//! # Invariants
//! - Services never bypass `ElementStore` to touch scene state.

pub mod executor;
pub mod processor;
