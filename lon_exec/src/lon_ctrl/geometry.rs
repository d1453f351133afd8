//! # Geometry primitives
//!
//! Pitch and elevation angles, and orientation interpolation.
//!
//! Angles follow the usual vehicle convention: pitch is the rotation about the
//! lateral (Y) axis, positive when the nose points down. Driving uphill gives a
//! negative pitch.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::UnitQuaternion;

use crate::traj::TrajectoryPoint;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Threshold on the sine of the half angle between two orientations below
/// which slerp is considered ill-conditioned.
const SLERP_EPSILON: f64 = 1e-12;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the pitch angle of an orientation.
///
/// The quaternion must be normalised, it is not renormalised here.
pub fn get_pitch_by_pose(orientation_q: &UnitQuaternion<f64>) -> f64 {
    orientation_q.euler_angles().1
}

/// Get the road pitch angle from the shape of the trajectory ahead of the vehicle.
///
/// The road pitch would be the elevation angle between the point nearest the rear axle
/// (`closest_idx`) and the first point more than `wheel_base_m` ahead of it. Planned trajectories
/// carry no reliable elevation, so this always returns 0.0. Use [`get_pitch_by_pose`] where the
/// terrain is not flat.
pub fn get_pitch_by_traj(
    _points: &[TrajectoryPoint],
    _closest_idx: usize,
    _wheel_base_m: f64,
) -> f64 {
    0.0
}

/// Get the elevation angle of `p_to` as seen from `p_from`.
///
/// The angle is `atan2(dz, dxy)` with `dz = z_from - z_to`, matching the sign of
/// [`get_pitch_by_pose`]. If the points are at the same XY position the angle is 0.
pub fn calc_elevation_angle(p_from: &TrajectoryPoint, p_to: &TrajectoryPoint) -> f64 {
    let dxy_m = (p_to.pose.position2() - p_from.pose.position2()).norm();

    if dxy_m == 0.0 {
        return 0.0;
    }

    let dz_m = p_from.pose.position_m[2] - p_to.pose.position_m[2];

    dz_m.atan2(dxy_m)
}

/// Spherically interpolate between two orientations.
///
/// The shorter of the two arcs between the orientations is followed. `ratio` is not clamped,
/// values outside [0, 1] extrapolate along the same arc.
pub fn lerp_orientation(
    o_from: &UnitQuaternion<f64>,
    o_to: &UnitQuaternion<f64>,
    ratio: f64,
) -> UnitQuaternion<f64> {
    // try_slerp flips the sign of `o_to` when needed to take the short arc
    o_from
        .try_slerp(o_to, ratio, SLERP_EPSILON)
        .unwrap_or(*o_from)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Quaternion, Vector3};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn point(x: f64, y: f64, z: f64) -> TrajectoryPoint {
        let mut p = TrajectoryPoint::from_xy_yaw_vel(x, y, 0.0, 1.0);
        p.pose.position_m = Vector3::new(x, y, z);
        p
    }

    #[test]
    fn test_pitch_by_pose() {
        assert_eq!(get_pitch_by_pose(&UnitQuaternion::identity()), 0.0);

        let q = UnitQuaternion::from_euler_angles(0.1, 0.3, -2.0);
        assert_relative_eq!(get_pitch_by_pose(&q), 0.3, epsilon = 1e-12);

        let q = UnitQuaternion::from_euler_angles(0.0, -0.25, 1.0);
        assert_relative_eq!(get_pitch_by_pose(&q), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_pitch_by_traj() {
        let traj: Vec<_> = (0..10).map(|i| point(i as f64, 0.0, 0.1 * i as f64)).collect();

        assert_eq!(get_pitch_by_traj(&traj, 0, 2.7), 0.0);
        assert_eq!(get_pitch_by_traj(&traj, 9, 2.7), 0.0);
        assert_eq!(get_pitch_by_traj(&[], 0, 2.7), 0.0);
    }

    #[test]
    fn test_elevation_angle() {
        // Uphill is a negative pitch
        let a = calc_elevation_angle(&point(0.0, 0.0, 0.0), &point(3.0, 4.0, 5.0));
        assert_relative_eq!(a, -FRAC_PI_4, epsilon = 1e-12);

        let a = calc_elevation_angle(&point(3.0, 4.0, 5.0), &point(0.0, 0.0, 0.0));
        assert_relative_eq!(a, FRAC_PI_4, epsilon = 1e-12);

        assert_eq!(calc_elevation_angle(&point(1.0, 1.0, 0.0), &point(2.0, 1.0, 0.0)), 0.0);

        // Coincident on the XY plane, even with a height difference
        assert_eq!(calc_elevation_angle(&point(1.0, 1.0, 0.0), &point(1.0, 1.0, 0.0)), 0.0);
        assert_eq!(calc_elevation_angle(&point(1.0, 1.0, 0.0), &point(1.0, 1.0, 3.0)), 0.0);
    }

    #[test]
    fn test_lerp_orientation_identity() {
        let o = UnitQuaternion::from_euler_angles(0.2, -0.1, 1.3);

        for r in [0.0, 0.25, 0.5, 1.0, 1.5, -0.5].iter() {
            assert_relative_eq!(lerp_orientation(&o, &o, *r), o, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_lerp_orientation_yaw() {
        let from = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.0);
        let to = UnitQuaternion::from_euler_angles(0.0, 0.0, FRAC_PI_2);

        assert_relative_eq!(lerp_orientation(&from, &to, 0.0), from, epsilon = 1e-12);
        assert_relative_eq!(lerp_orientation(&from, &to, 1.0), to, epsilon = 1e-12);
        assert_relative_eq!(
            lerp_orientation(&from, &to, 0.5).euler_angles().2,
            FRAC_PI_4,
            epsilon = 1e-12
        );

        // Extrapolation continues along the same arc
        assert_relative_eq!(
            lerp_orientation(&from, &to, 2.0).euler_angles().2.abs(),
            PI,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_lerp_orientation_short_arc() {
        let from = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.0);
        let to = UnitQuaternion::from_euler_angles(0.0, 0.0, FRAC_PI_2);

        // The same rotation as `to` with the opposite sign must give the same result
        let to_neg = UnitQuaternion::new_unchecked(-to.into_inner());
        let a = lerp_orientation(&from, &to, 0.3).euler_angles().2;
        let b = lerp_orientation(&from, &to_neg, 0.3).euler_angles().2;

        assert_relative_eq!(a, 0.3 * FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(b, a, epsilon = 1e-12);

        let q: Quaternion<f64> = lerp_orientation(&from, &to_neg, 0.3).into_inner();
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-12);
    }
}
