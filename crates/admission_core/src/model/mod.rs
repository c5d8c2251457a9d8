//! Admission domain model.
//!
//! # Responsibility
//! - Define the flat admission record shared by every layer.
//!
//! # Invariants
//! - Records are flat; no entity references another.
//! - Deletion is a hard delete; there are no tombstones.

pub mod admission;
