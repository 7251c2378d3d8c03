//! Control mapper: held keys to emitter motion.
//!
//! Without strafe held, Left/Right yaw the emitter. The camera direction is
//! then recomputed from the new orientation, and Forward/Backward move along
//! it. With strafe held, Left/Right slide sideways instead of turning.
//! Opposing keys never cancel: Left beats Right, Forward beats Backward.

use glam::DVec3;

use blaster_core::constants::STRAFE_ANGLE;
use blaster_core::input::{InputState, Key};
use blaster_core::spatial::rotate_about_vertical;
use blaster_core::types::Transform;

use crate::camera::CameraRig;
use crate::config::SimConfig;

/// Apply one tick of input to the emitter. Returns the camera direction
/// after the update.
pub fn run(
    input: &InputState,
    emitter: &mut Transform,
    camera: &CameraRig,
    config: &SimConfig,
) -> DVec3 {
    let strafing = input.is_held(Key::Strafe);

    if !strafing {
        if input.is_held(Key::Left) {
            emitter.rotate_y(config.turn_step);
        } else if input.is_held(Key::Right) {
            emitter.rotate_y(-config.turn_step);
        }
    }

    let direction = camera.direction(emitter);

    if input.is_held(Key::Forward) {
        emitter.translate(direction * config.move_step);
    } else if input.is_held(Key::Backward) {
        emitter.translate(direction * -config.move_step);
    }

    if strafing {
        if input.is_held(Key::Left) {
            emitter.translate(rotate_about_vertical(direction, STRAFE_ANGLE) * config.move_step);
        } else if input.is_held(Key::Right) {
            emitter.translate(rotate_about_vertical(direction, -STRAFE_ANGLE) * config.move_step);
        }
    }

    direction
}
