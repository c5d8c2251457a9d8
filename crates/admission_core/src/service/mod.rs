//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and repository calls into use-case APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod admission_service;
