//! # fair-core
//!
//! Core types and error types for Fairkit.
//!
//! This crate provides the foundational types shared across all Fairkit crates:
//! - Persisted entity structs (deposition records, license records, tokens)
//! - Status enums with state machine transitions
//! - The static SPDX license table used to vet archival licenses
//!
//! Error types live with the crates that raise them; everything converges
//! into `fair_release::ReleaseError` at the orchestrator boundary.

pub mod entities;
pub mod enums;
pub mod spdx;
