//! Scene data model shared by the store, executor and render observers.
//!
//! # Responsibility
//! - Define the closed set of element variants and their wire fields.
//! - Own the default values used when an agent omits fields on create.
//!
//! # Invariants
//! - Every element is identified by a stable `ElementId`.
//! - An element's variant is fixed at creation time.

pub mod element;
