//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate document store details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `AdmissionRecord::validate()`.
//! - A missing document on update is surfaced as a store error.

pub mod admission_repo;
