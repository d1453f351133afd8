//! # Longitudinal control utilities
//!
//! The longitudinal controller needs a handful of scalar quantities each cycle
//! before its feedback law can run: how far the vehicle is from the next stop,
//! the road pitch, where the vehicle will be once the current command takes
//! effect, and the planned state at that position. This module computes them
//! from the planned trajectory and the vehicle pose.
//!
//! Every function here is pure. Nothing is retained between calls, the only
//! state carried across cycles (the previous command for the rate limiters) is
//! held by the caller. None of them allocate or fail: degenerate input such as
//! zero length segments or a missing stop point gives a documented fallback
//! value. The exception is [`LonCycleData::calculate`], which checks the
//! trajectory with [`is_valid_trajectory`] before using it. Callers of the
//! individual functions should do the same, as non-finite trajectories give
//! undefined (possibly NaN) results.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod calc;
pub mod filter;
pub mod geometry;
pub mod interp;
pub mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{trace, warn};
use serde::Serialize;

// Internal
pub use calc::*;
pub use filter::*;
pub use geometry::*;
pub use interp::*;
pub use params::Params;

use crate::loc::Pose;
use crate::traj::{
    find_first_nearest_index_with_soft_constraints, is_valid_trajectory, TrajectoryPoint,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The quantities the longitudinal controller consumes each cycle.
#[derive(Debug, Clone, Serialize)]
pub struct LonCycleData {
    /// Vehicle pose predicted over the delay compensation time
    pub delayed_pose: Pose,

    /// Trajectory point interpolated at the delayed pose
    pub target_point: TrajectoryPoint,

    /// Distance from the delayed pose to the next stop
    pub stop_distance: StopDistance,

    /// Pitch of the vehicle from its orientation
    pub pitch_by_pose_rad: f64,

    /// Pitch of the road from the trajectory
    pub pitch_by_traj_rad: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LonCtrlError {
    #[error("The trajectory is empty")]
    EmptyTrajectory,

    #[error("The trajectory contains NaN or infinite values")]
    InvalidTrajectory,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LonCycleData {
    /// Calculate the per-cycle quantities for the vehicle at `current_pose` moving at
    /// `current_vel_mps`.
    pub fn calculate(
        params: &Params,
        current_pose: &Pose,
        points: &[TrajectoryPoint],
        current_vel_mps: f64,
    ) -> Result<Self, LonCtrlError> {
        if points.is_empty() {
            warn!("Cannot calculate longitudinal quantities on an empty trajectory");
            return Err(LonCtrlError::EmptyTrajectory);
        }
        if !is_valid_trajectory(points) {
            warn!("Cannot calculate longitudinal quantities on a non-finite trajectory");
            return Err(LonCtrlError::InvalidTrajectory);
        }

        let delayed_pose = calc_pose_after_time_delay(
            current_pose,
            params.delay_compensation_time_s,
            current_vel_mps,
        );

        let target_point =
            lerp_trajectory_point(points, &delayed_pose, params.max_dist_m, params.max_yaw_rad);

        let stop_distance =
            calc_stop_distance(&delayed_pose, points, params.max_dist_m, params.max_yaw_rad);

        // Pitch is taken at the current pose, not the delayed one
        let closest_idx = find_first_nearest_index_with_soft_constraints(
            points,
            current_pose,
            params.max_dist_m,
            params.max_yaw_rad,
        )
        .unwrap_or(0);

        let data = Self {
            delayed_pose,
            target_point,
            stop_distance,
            pitch_by_pose_rad: get_pitch_by_pose(&current_pose.orientation_q),
            pitch_by_traj_rad: get_pitch_by_traj(points, closest_idx, params.wheel_base_m),
        };

        trace!(
            "Target vel {:.3} m/s, stop distance {:?}, pitch {:.4} rad",
            data.target_point.longitudinal_velocity_mps,
            data.stop_distance,
            data.pitch_by_pose_rad
        );

        Ok(data)
    }
}

/// Limit the rate of change of an acceleration command using the jerk limits in `params`.
pub fn limit_acc_rate(params: &Params, acc_cmd_mps2: f64, prev_acc_cmd_mps2: f64, dt_s: f64) -> f64 {
    apply_diff_limit_filter_asym(
        acc_cmd_mps2,
        prev_acc_cmd_mps2,
        dt_s,
        params.max_acc_rate_mps3,
        params.min_acc_rate_mps3,
    )
}
