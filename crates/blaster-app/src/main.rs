use std::io::{self, BufRead};
use std::process::ExitCode;

use tracing::{error, info, warn};

use blaster_app::console::{self, ConsoleInput};
use blaster_app::driver;
use blaster_app::state::AppState;
use blaster_core::errors::ConfigError;
use blaster_core::state::FrameSnapshot;
use blaster_sim::SimConfig;

const CONFIG_ENV: &str = "BLASTER_CONFIG";

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .with_writer(io::stderr)
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Config path from the first argument, else `BLASTER_CONFIG`, else defaults.
fn load_config() -> Result<SimConfig, ConfigError> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok());
    match path {
        Some(path) => {
            info!(%path, "loading config");
            SimConfig::from_file(path)
        }
        None => Ok(SimConfig::default()),
    }
}

fn print_status(snapshot: &FrameSnapshot) {
    let emitter = &snapshot.emitter;
    println!(
        "tick {} | pos ({:.2}, {:.2}, {:.2}) aim ({:.2}, {:.2}, {:.2}) | darts {} | targets {}/{} standing | hits {} of {} shots",
        snapshot.time.tick,
        emitter.transform.position.x,
        emitter.transform.position.y,
        emitter.transform.position.z,
        emitter.camera_direction.x,
        emitter.camera_direction.y,
        emitter.camera_direction.z,
        snapshot.projectiles.len(),
        snapshot.score.targets_remaining,
        snapshot.score.targets_total,
        snapshot.score.targets_hit,
        snapshot.score.shots_fired,
    );
}

fn main() -> ExitCode {
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load config");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new();
    if let Err(e) = driver::start_simulation(&state, config) {
        error!(error = %e, "failed to start simulation");
        return ExitCode::FAILURE;
    }

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "stdin read failed");
                break;
            }
        };
        match console::parse_line(&line) {
            Ok(None) => {}
            Ok(Some(ConsoleInput::Command(command))) => {
                if let Err(e) = driver::send_command(&state, command) {
                    error!(error = %e, "command not delivered");
                    break;
                }
            }
            Ok(Some(ConsoleInput::Status)) => match driver::get_snapshot(&state) {
                Ok(Some(snapshot)) => print_status(&snapshot),
                Ok(None) => println!("no snapshot yet"),
                Err(e) => warn!(error = %e, "snapshot unavailable"),
            },
            Ok(Some(ConsoleInput::Quit)) => break,
            Err(e) => warn!(error = %e, %line, "ignoring input"),
        }
    }

    if let Err(e) = driver::shutdown(&state) {
        error!(error = %e, "shutdown failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
