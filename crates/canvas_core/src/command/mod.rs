//! Agent command protocol.
//!
//! # Responsibility
//! - Define the structured `Command` record shared by both surface syntaxes.
//! - Extract commands from free-form agent text.
//!
//! # Invariants
//! - Parsing never fails; malformed payloads are recovered or dropped.
//! - Inline commands always precede fenced-block commands in the output.

pub mod model;
pub mod parser;
