//! RAMPARTS headless application.
//!
//! Drives the simulation on a fixed-timestep thread, fans snapshots out to
//! render hooks, and autosaves through the persistence crate.

pub mod bootstrap;
pub mod game_loop;
pub mod render;
pub mod state;

pub use ramparts_core as core;
