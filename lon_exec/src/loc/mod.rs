//! # Localisation module
//!
//! This module provides the pose type shared by the vehicle state and by
//! every trajectory point.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use nalgebra::{UnitQuaternion, Vector2, Vector3};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A position and orientation in the map frame.
///
/// The orientation must be a normalised quaternion. Nothing in this library
/// renormalises it, a non-unit quaternion gives meaningless angles.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Pose {

    /// The position in the map frame
    pub position_m: Vector3<f64>,

    /// The orientation in the map frame. Rotates an object from the body
    /// frame into the map frame.
    pub orientation_q: UnitQuaternion<f64>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {

    pub fn new(position_m: Vector3<f64>, orientation_q: UnitQuaternion<f64>) -> Self {
        Self {
            position_m,
            orientation_q
        }
    }

    /// Create a pose on the XY plane with the given heading.
    pub fn from_xy_yaw(x_m: f64, y_m: f64, yaw_rad: f64) -> Self {
        Self {
            position_m: Vector3::new(x_m, y_m, 0.0),
            orientation_q: UnitQuaternion::from_euler_angles(0.0, 0.0, yaw_rad)
        }
    }

    /// Return the heading (angle to the positive X axis) in radians, in the
    /// range [-pi, pi].
    pub fn get_heading(&self) -> f64 {
        self.orientation_q.euler_angles().2
    }

    /// Get the position projected onto the XY plane.
    pub fn position2(&self) -> Vector2<f64> {
        self.position_m.xy()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_from_xy_yaw() {
        let pose = Pose::from_xy_yaw(1.0, -2.0, FRAC_PI_2);

        assert_eq!(pose.position2(), Vector2::new(1.0, -2.0));
        assert_eq!(pose.position_m[2], 0.0);
        assert_relative_eq!(pose.get_heading(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_default_is_identity() {
        let pose = Pose::default();

        assert_eq!(pose.orientation_q, UnitQuaternion::identity());
        assert_eq!(pose.get_heading(), 0.0);
    }
}
