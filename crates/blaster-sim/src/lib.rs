//! Simulation engine for BLASTER.
//!
//! Owns the hecs ECS world, runs systems once per driver tick,
//! and produces `FrameSnapshot`s for the renderer.

pub mod assets;
pub mod camera;
pub mod clock;
pub mod config;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use blaster_core as core;
pub use config::SimConfig;
pub use engine::SimulationEngine;
