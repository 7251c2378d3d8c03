//! Systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` plus whatever engine state
//! they need passed in explicitly. They do not own state.

pub mod cleanup;
pub mod collision;
pub mod control;
pub mod loading;
pub mod projectiles;
pub mod snapshot;
