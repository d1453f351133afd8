//! # Derived quantity calculations
//!
//! Distance to the next stop and delay compensation of the vehicle pose.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;
use nalgebra::Vector3;
use serde::Serialize;

use crate::loc::Pose;
use crate::traj::{
    calc_signed_arc_length_from_point, find_first_nearest_segment_index_with_soft_constraints,
    search_zero_velocity_index, TrajectoryPoint,
};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The distance from the vehicle to the point it has been commanded to stop at.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub enum StopDistance {
    /// A zero velocity point exists ahead, at `distance_m` along the trajectory. The distance is
    /// negative if the vehicle has overshot the point.
    Stop { distance_m: f64 },

    /// No point ahead has zero velocity. `remaining_m` is the distance to the end of the
    /// trajectory.
    NoStopAhead { remaining_m: f64 },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StopDistance {
    /// The distance the vehicle may travel before it must be stopped.
    ///
    /// With no stop ahead this is the distance to the end of the trajectory.
    pub fn distance_m(&self) -> f64 {
        match self {
            StopDistance::Stop { distance_m } => *distance_m,
            StopDistance::NoStopAhead { remaining_m } => *remaining_m,
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, StopDistance::Stop { .. })
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the distance along the trajectory from the vehicle to the first zero velocity point
/// ahead of it.
///
/// The vehicle is located on the trajectory with the soft `max_dist_m` and `max_yaw_rad`
/// constraints. The search for a zero velocity point starts at the first point of the segment the
/// vehicle is on, so a stop point the vehicle has just passed gives a negative distance.
pub fn calc_stop_distance(
    current_pose: &Pose,
    points: &[TrajectoryPoint],
    max_dist_m: f64,
    max_yaw_rad: f64,
) -> StopDistance {
    let seg_idx = match find_first_nearest_segment_index_with_soft_constraints(
        points,
        current_pose,
        max_dist_m,
        max_yaw_rad,
    ) {
        Some(i) => i,
        None => {
            // No segment to locate the vehicle on, a single point is either the stop or the end
            return match points.first() {
                Some(p) if p.longitudinal_velocity_mps == 0.0 => {
                    StopDistance::Stop { distance_m: 0.0 }
                }
                _ => StopDistance::NoStopAhead { remaining_m: 0.0 },
            };
        }
    };

    let stop_idx = search_zero_velocity_index(points, seg_idx);
    let end_idx = stop_idx.unwrap_or(points.len() - 1);

    // NaN only comes from a trajectory with non-finite points
    let length_m = calc_signed_arc_length_from_point(
        points,
        &current_pose.position_m,
        seg_idx,
        end_idx,
    )
    .filter(|l| !l.is_nan())
    .unwrap_or(0.0);

    trace!(
        "Stop search from segment {}: stop index {:?}, length {:.3} m",
        seg_idx,
        stop_idx,
        length_m
    );

    match stop_idx {
        Some(_) => StopDistance::Stop { distance_m: length_m },
        None => StopDistance::NoStopAhead { remaining_m: length_m },
    }
}

/// Predict the vehicle pose after `delay_time_s`, assuming it moves in a straight line along its
/// current heading at `current_vel_mps`.
///
/// A negative velocity moves the pose backwards. The orientation and height are unchanged.
pub fn calc_pose_after_time_delay(
    current_pose: &Pose,
    delay_time_s: f64,
    current_vel_mps: f64,
) -> Pose {
    let running_dist_m = delay_time_s * current_vel_mps;

    if running_dist_m == 0.0 {
        return *current_pose;
    }

    let yaw_rad = current_pose.get_heading();

    Pose {
        position_m: current_pose.position_m
            + Vector3::new(running_dist_m * yaw_rad.cos(), running_dist_m * yaw_rad.sin(), 0.0),
        orientation_q: current_pose.orientation_q,
    }
}
