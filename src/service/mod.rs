//! Use-case services over the store contract.
//!
//! # Responsibility
//! - Orchestrate store calls into caller-facing catalog operations.
//! - Keep any presentation layer decoupled from storage details.

pub mod catalog;
