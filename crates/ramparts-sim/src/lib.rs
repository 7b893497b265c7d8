//! Simulation engine for RAMPARTS.
//!
//! Owns the hecs ECS world, runs systems at a fixed (or caller-supplied)
//! timestep, and produces GameStateSnapshots for observers.

pub mod config;
pub mod economy;
pub mod engine;
pub mod entities;
pub mod path;
pub mod placement;
pub mod systems;
pub mod wave;
pub mod world_setup;

pub use config::SimConfig;
pub use engine::SimulationEngine;
pub use ramparts_core as core;
