//! Entry points a front end calls to run the simulation.
//!
//! They bridge requests to the game loop thread via channels.

use std::fmt;

use tracing::info;

use blaster_core::commands::PlayerCommand;
use blaster_core::state::FrameSnapshot;
use blaster_sim::SimConfig;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

#[derive(Debug)]
pub enum DriverError {
    AlreadyRunning,
    NotRunning,
    /// The game loop thread has exited.
    Disconnected,
    /// A thread panicked while holding shared state.
    Poisoned,
    Spawn(std::io::Error),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::AlreadyRunning => write!(f, "simulation already running"),
            DriverError::NotRunning => write!(f, "simulation not started"),
            DriverError::Disconnected => write!(f, "game loop has stopped"),
            DriverError::Poisoned => write!(f, "shared state poisoned"),
            DriverError::Spawn(e) => write!(f, "failed to spawn game loop: {e}"),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for DriverError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        DriverError::Poisoned
    }
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(state: &AppState, config: SimConfig) -> Result<(), DriverError> {
    let mut tx_lock = state.command_tx.lock()?;
    if tx_lock.is_some() {
        return Err(DriverError::AlreadyRunning);
    }

    info!(seed = config.seed, "starting simulation");
    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(config, state.latest_snapshot.clone()).map_err(DriverError::Spawn)?;

    *tx_lock = Some(cmd_tx);
    *state.loop_thread.lock()? = Some(handle);
    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), DriverError> {
    let tx_lock = state.command_tx.lock()?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::Player(command))
            .map_err(|_| DriverError::Disconnected),
        None => Err(DriverError::NotRunning),
    }
}

/// Get the latest snapshot synchronously.
pub fn get_snapshot(state: &AppState) -> Result<Option<FrameSnapshot>, DriverError> {
    let lock = state.latest_snapshot.lock()?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread to finish.
pub fn shutdown(state: &AppState) -> Result<(), DriverError> {
    let Some(tx) = state.command_tx.lock()?.take() else {
        return Err(DriverError::NotRunning);
    };
    // The loop may already be gone; joining below is what matters.
    let _ = tx.send(GameLoopCommand::Shutdown);

    if let Some(handle) = state.loop_thread.lock()?.take() {
        if handle.join().is_err() {
            return Err(DriverError::Poisoned);
        }
    }
    info!("simulation stopped");
    Ok(())
}
