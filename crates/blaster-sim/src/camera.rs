//! First-person camera rigidly mounted on the emitter.

use glam::DVec3;

use blaster_core::constants::CAMERA_OFFSET;
use blaster_core::types::Transform;

/// Where the camera sits relative to the emitter. The camera has no
/// rotation of its own, so it always looks where the emitter points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub offset: DVec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            offset: DVec3::from_array(CAMERA_OFFSET),
        }
    }
}

impl CameraRig {
    /// Unit view direction for a camera riding on `mount`.
    pub fn direction(&self, mount: &Transform) -> DVec3 {
        mount.forward().normalize()
    }

    /// Camera position in world space.
    pub fn eye(&self, mount: &Transform) -> DVec3 {
        mount.position + mount.rotation * self.offset
    }
}
