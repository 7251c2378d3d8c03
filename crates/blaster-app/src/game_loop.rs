//! Game loop thread: runs the simulation engine at a fixed rate and publishes snapshots.
//!
//! The engine is created inside this thread so it never has to cross threads.
//! Commands arrive via `mpsc` channel. Each tick's snapshot is stored in shared
//! state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use blaster_core::constants::TICK_RATE;
use blaster_core::events::SimEvent;
use blaster_core::state::FrameSnapshot;
use blaster_sim::assets::HeadlessBackend;
use blaster_sim::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the driver to use, plus the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("blaster-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config, HeadlessBackend::new());
    engine.setup();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => {
                    debug!(?cmd, "command received");
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "game loop stopping");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();
        log_events(&snapshot);

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

fn log_events(snapshot: &FrameSnapshot) {
    for event in &snapshot.events {
        if let SimEvent::TargetHit { target_id, .. } = event {
            info!(
                target_id,
                hit = snapshot.score.targets_hit,
                remaining = snapshot.score.targets_remaining,
                "target down"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blaster_core::commands::PlayerCommand;
    use blaster_core::input::Key;

    fn wait_for(
        latest: &Mutex<Option<FrameSnapshot>>,
        pred: impl Fn(&FrameSnapshot) -> bool,
    ) -> Option<FrameSnapshot> {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if let Some(snap) = latest.lock().unwrap().as_ref() {
                if pred(snap) {
                    return Some(snap.clone());
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_fire_key_release_reaches_engine() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest.clone()).unwrap();

        tx.send(GameLoopCommand::Player(PlayerCommand::KeyDown { key: Key::Fire }))
            .unwrap();
        let snap = wait_for(&latest, |s| s.time.tick >= 3).expect("loop is ticking");
        assert_eq!(snap.score.shots_fired, 0, "holding fire does not shoot");

        tx.send(GameLoopCommand::Player(PlayerCommand::KeyUp { key: Key::Fire }))
            .unwrap();
        let snap = wait_for(&latest, |s| s.score.shots_fired == 1).expect("release fires");
        assert_eq!(snap.score.shots_fired, 1);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_loop_publishes_snapshots_and_stops() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest.clone()).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while latest.lock().unwrap().is_none() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        let snapshot = latest.lock().unwrap().clone().expect("loop published a snapshot");
        assert_eq!(snapshot.targets.len(), 9);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_loop_stops_when_sender_dropped() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest).unwrap();
        drop(tx);
        handle.join().unwrap();
    }
}
