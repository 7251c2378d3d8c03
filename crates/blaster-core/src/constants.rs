//! Simulation constants and tuning parameters.

use std::f64::consts::FRAC_PI_2;

/// Rate the app driver ticks the simulation at (Hz).
pub const TICK_RATE: u32 = 60;

// --- Projectiles ---

/// Wall-clock lifetime of a projectile (milliseconds).
pub const PROJECTILE_LIFETIME_MS: u64 = 1000;

/// Distance a projectile travels per tick along its firing direction.
pub const PROJECTILE_SPEED: f64 = 0.1;

/// Height above the emitter origin at which projectiles leave the muzzle.
pub const MUZZLE_HEIGHT: f64 = 0.3;

/// Distance along the firing direction the projectile is pushed out of the emitter.
pub const MUZZLE_FORWARD_OFFSET: f64 = 0.01;

/// Projectile-target distance below which a hit registers (strict).
pub const HIT_RADIUS: f64 = 0.25;

// --- Emitter control ---

/// Yaw applied per tick while a turn key is held (radians).
pub const TURN_STEP: f64 = 0.02;

/// Distance moved per tick while a move or strafe key is held.
pub const MOVE_STEP: f64 = 0.1;

/// Angle between the view direction and the strafe direction.
pub const STRAFE_ANGLE: f64 = FRAC_PI_2;

/// Camera mount relative to the emitter (behind and above the muzzle).
pub const CAMERA_OFFSET: [f64; 3] = [0.0, 0.5, 1.0];

// --- Targets ---

/// Height targets are placed at.
pub const TARGET_HEIGHT: f64 = 0.3;

/// Random target placement box on the ground plane.
pub const TARGET_MIN_X: f64 = -8.0;
pub const TARGET_MAX_X: f64 = 8.0;
pub const TARGET_MIN_Z: f64 = -20.0;
pub const TARGET_MAX_Z: f64 = -10.0;

/// Targets spawned by the opening scene before the random batch.
pub const OPENING_TARGETS: [[f64; 3]; 4] = [
    [-1.0, TARGET_HEIGHT, -3.0],
    [1.0, TARGET_HEIGHT, -3.0],
    [2.0, TARGET_HEIGHT, -3.0],
    [3.0, TARGET_HEIGHT, -4.0],
];

/// Random targets added by the opening scene and by each restart.
pub const RANDOM_TARGET_BATCH: u32 = 5;
