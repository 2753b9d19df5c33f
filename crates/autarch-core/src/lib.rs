//! Core types and definitions shared across the autarch sidecar.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the per-tick snapshot, the role registry, doctrine weights, rule
//! metadata, engine memory fields, and the wire envelope/command types.
//! It has no dependency on tokio or any transport framework.

pub mod constants;
pub mod doctrine;
pub mod memory;
pub mod role;
pub mod rule;
pub mod snapshot;
pub mod types;
pub mod wire;

#[cfg(test)]
mod tests;
