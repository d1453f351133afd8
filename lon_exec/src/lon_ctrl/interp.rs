//! # Trajectory point interpolation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;
use nalgebra::Vector3;

use super::geometry::lerp_orientation;
use crate::loc::Pose;
use crate::traj::{
    calc_longitudinal_offset_to_segment, calc_signed_arc_length,
    find_first_nearest_segment_index_with_soft_constraints, TrajectoryPoint,
};
use util::maths::lerp;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Interpolate the trajectory point nearest to `pose`.
///
/// The nearest segment is found with the soft `max_dist_m` and `max_yaw_rad` constraints (see
/// [`find_first_nearest_segment_index_with_soft_constraints`]), and the pose is projected onto it.
/// Every quantity of the point is then linearly interpolated between the two ends of the segment,
/// apart from the orientation which is spherically interpolated. The projection is clamped to the
/// segment so the result never extrapolates.
///
/// Accepts anything that can be viewed as a slice of points (a `Vec`, an array, a
/// [`Trajectory`](crate::traj::Trajectory)) without copying it. The returned point is always a new
/// value.
///
/// A trajectory with a single point returns that point, and an empty one returns the default
/// point.
pub fn lerp_trajectory_point<P>(
    points: &P,
    pose: &Pose,
    max_dist_m: f64,
    max_yaw_rad: f64,
) -> TrajectoryPoint
where
    P: AsRef<[TrajectoryPoint]> + ?Sized,
{
    let points = points.as_ref();

    let seg_idx = match find_first_nearest_segment_index_with_soft_constraints(
        points,
        pose,
        max_dist_m,
        max_yaw_rad,
    ) {
        Some(i) => i,
        None => return points.first().cloned().unwrap_or_default(),
    };

    let ratio = calc_interpolation_ratio(points, seg_idx, &pose.position_m);

    trace!("Interpolating segment {} at ratio {:.4}", seg_idx, ratio);

    lerp_between(&points[seg_idx], &points[seg_idx + 1], ratio)
}

/// Position of the projection of `position_m` along segment `seg_idx`, as a fraction of the
/// segment length clamped to [0, 1]. A zero length segment gives 0.
fn calc_interpolation_ratio(
    points: &[TrajectoryPoint],
    seg_idx: usize,
    position_m: &Vector3<f64>,
) -> f64 {
    let offset_m = calc_longitudinal_offset_to_segment(points, seg_idx, position_m).unwrap_or(0.0);
    let length_m = calc_signed_arc_length(points, seg_idx, seg_idx + 1).unwrap_or(0.0);

    if length_m <= 0.0 {
        return 0.0;
    }

    util::maths::clamp(&(offset_m / length_m), &0.0, &1.0)
}

/// Interpolate every quantity of two points.
fn lerp_between(from: &TrajectoryPoint, to: &TrajectoryPoint, ratio: f64) -> TrajectoryPoint {
    let p_from = &from.pose.position_m;
    let p_to = &to.pose.position_m;

    TrajectoryPoint {
        pose: Pose {
            position_m: Vector3::new(
                lerp(p_from[0], p_to[0], ratio),
                lerp(p_from[1], p_to[1], ratio),
                lerp(p_from[2], p_to[2], ratio),
            ),
            orientation_q: lerp_orientation(
                &from.pose.orientation_q,
                &to.pose.orientation_q,
                ratio,
            ),
        },
        longitudinal_velocity_mps: lerp(
            from.longitudinal_velocity_mps,
            to.longitudinal_velocity_mps,
            ratio,
        ),
        lateral_velocity_mps: lerp(from.lateral_velocity_mps, to.lateral_velocity_mps, ratio),
        acceleration_mps2: lerp(from.acceleration_mps2, to.acceleration_mps2, ratio),
        heading_rate_rps: lerp(from.heading_rate_rps, to.heading_rate_rps, ratio),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traj::Trajectory;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn point(x: f64, y: f64, yaw: f64, vel: f64, lat: f64, acc: f64, rate: f64) -> TrajectoryPoint {
        TrajectoryPoint {
            pose: Pose::from_xy_yaw(x, y, yaw),
            longitudinal_velocity_mps: vel,
            lateral_velocity_mps: lat,
            acceleration_mps2: acc,
            heading_rate_rps: rate,
        }
    }

    fn test_traj() -> Vec<TrajectoryPoint> {
        vec![
            point(0.0, 0.0, 0.0, 1.0, 0.1, 0.5, 0.0),
            point(2.0, 0.0, 0.0, 3.0, 0.3, 0.7, 0.2),
            point(2.0, 2.0, FRAC_PI_2, 0.3, -0.1, -1.3, 0.9),
        ]
    }

    #[test]
    fn test_lerp_mid_segment() {
        let traj = test_traj();

        let p = lerp_trajectory_point(&traj, &Pose::from_xy_yaw(0.5, 0.4, 0.0), 10.0, PI);

        assert_relative_eq!(p.pose.position_m[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(p.pose.position_m[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.longitudinal_velocity_mps, 1.5, epsilon = 1e-12);
        assert_relative_eq!(p.lateral_velocity_mps, 0.15, epsilon = 1e-12);
        assert_relative_eq!(p.acceleration_mps2, 0.55, epsilon = 1e-12);
        assert_relative_eq!(p.heading_rate_rps, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_lerp_orientation_on_corner() {
        let traj = test_traj();

        // Halfway up the second segment
        let p = lerp_trajectory_point(&traj, &Pose::from_xy_yaw(2.1, 1.0, 1.0), 10.0, PI);

        assert_relative_eq!(p.pose.position_m[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.pose.position_m[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.pose.get_heading(), FRAC_PI_2 / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        let traj = test_traj();

        for seg in 0..2 {
            let (from, to) = (&traj[seg], &traj[seg + 1]);

            // Project a pose onto the start (ratio 0) and end (ratio 1) of the segment
            let start = lerp_between(from, to, 0.0);
            let end = lerp_between(from, to, 1.0);

            assert_eq!(start.longitudinal_velocity_mps, from.longitudinal_velocity_mps);
            assert_eq!(start.lateral_velocity_mps, from.lateral_velocity_mps);
            assert_eq!(start.acceleration_mps2, from.acceleration_mps2);
            assert_eq!(start.heading_rate_rps, from.heading_rate_rps);

            assert_eq!(end.longitudinal_velocity_mps, to.longitudinal_velocity_mps);
            assert_eq!(end.lateral_velocity_mps, to.lateral_velocity_mps);
            assert_eq!(end.acceleration_mps2, to.acceleration_mps2);
            assert_eq!(end.heading_rate_rps, to.heading_rate_rps);
        }

        // Poses exactly at the points take the same path
        let p = lerp_trajectory_point(&traj, &Pose::from_xy_yaw(0.0, 0.0, 0.0), 10.0, PI);
        assert_eq!(p.longitudinal_velocity_mps, traj[0].longitudinal_velocity_mps);
        assert_eq!(p.heading_rate_rps, traj[0].heading_rate_rps);

        let p = lerp_trajectory_point(&traj, &Pose::from_xy_yaw(2.0, 2.0, FRAC_PI_2), 10.0, PI);
        assert_eq!(p.longitudinal_velocity_mps, traj[2].longitudinal_velocity_mps);
        assert_eq!(p.acceleration_mps2, traj[2].acceleration_mps2);
    }

    #[test]
    fn test_lerp_clamped() {
        let traj = test_traj();

        // Behind the start
        let p = lerp_trajectory_point(&traj, &Pose::from_xy_yaw(-3.0, 0.0, 0.0), 10.0, PI);
        assert_eq!(p.pose.position_m[0], 0.0);
        assert_eq!(p.longitudinal_velocity_mps, 1.0);

        // Beyond the end
        let p = lerp_trajectory_point(&traj, &Pose::from_xy_yaw(2.0, 5.0, FRAC_PI_2), 10.0, PI);
        assert_eq!(p.pose.position_m[1], 2.0);
        assert_eq!(p.longitudinal_velocity_mps, 0.3);
    }

    #[test]
    fn test_lerp_zero_length_segment() {
        let traj = vec![
            point(1.0, 1.0, 0.0, 2.0, 0.0, 0.0, 0.0),
            point(1.0, 1.0, 0.0, 4.0, 0.0, 0.0, 0.0),
        ];

        let p = lerp_trajectory_point(&traj, &Pose::from_xy_yaw(1.5, 1.0, 0.0), 10.0, PI);

        assert_eq!(p.longitudinal_velocity_mps, 2.0);
        assert!(p.is_finite());
    }

    #[test]
    fn test_lerp_short_trajectories() {
        let single = vec![point(1.0, 2.0, 0.0, 5.0, 0.0, 0.0, 0.0)];
        let pose = Pose::from_xy_yaw(0.0, 0.0, 0.0);

        assert_eq!(lerp_trajectory_point(&single, &pose, 1.0, 1.0), single[0]);
        assert_eq!(
            lerp_trajectory_point(&Vec::<TrajectoryPoint>::new(), &pose, 1.0, 1.0),
            TrajectoryPoint::default()
        );
    }

    #[test]
    fn test_lerp_generic_containers() {
        let traj = test_traj();
        let pose = Pose::from_xy_yaw(1.0, 0.0, 0.0);

        let from_vec = lerp_trajectory_point(&traj, &pose, 10.0, PI);
        let from_slice = lerp_trajectory_point(&traj[..], &pose, 10.0, PI);
        let from_array = lerp_trajectory_point(&[traj[0].clone(), traj[1].clone()], &pose, 10.0, PI);
        let from_traj = lerp_trajectory_point(&Trajectory::new(traj.clone()), &pose, 10.0, PI);

        assert_eq!(from_vec, from_slice);
        assert_eq!(from_vec, from_array);
        assert_eq!(from_vec, from_traj);
        assert_relative_eq!(from_vec.longitudinal_velocity_mps, 2.0, epsilon = 1e-12);
    }
}
