//! Spatial helpers shared by the control and collision systems.

use glam::{DQuat, DVec3};

/// Straight-line distance between two points.
pub fn distance(a: DVec3, b: DVec3) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Rotate a vector about the world +Y axis. Positive angles turn -Z toward -X.
pub fn rotate_about_vertical(v: DVec3, angle: f64) -> DVec3 {
    DQuat::from_rotation_y(angle) * v
}
