//! Core types and definitions for the BLASTER target range.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, input, commands, snapshots, events, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod errors;
pub mod events;
pub mod input;
pub mod spatial;
pub mod state;
pub mod types;
pub mod visual;
