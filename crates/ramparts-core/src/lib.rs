//! Core types and definitions for the RAMPARTS tower-defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! kinds and their base stats, commands, events, errors, snapshots,
//! save records and the observer hooks. It has no dependency on the
//! ECS, the RNG or any runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod hooks;
pub mod save;
pub mod state;
pub mod stats;
pub mod types;
