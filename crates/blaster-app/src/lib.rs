//! BLASTER driver.
//!
//! Runs the headless simulation on a fixed-rate thread and feeds it player
//! commands from a line-based console.

pub mod console;
pub mod driver;
pub mod game_loop;
pub mod state;

pub use blaster_core as core;
