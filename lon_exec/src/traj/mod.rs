//! # Trajectory module
//!
//! A trajectory is the planned path the vehicle should follow, sampled as an
//! ordered sequence of points at increasing arc length. The spacing between
//! points need not be uniform. Each point carries the pose and the kinematic
//! state (velocity, acceleration, heading rate) the planner wants at that
//! location.
//!
//! A segment is the line joining two consecutive points, and is identified by
//! the index of its first point. All distances along the trajectory are
//! measured on the XY plane.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod search;

pub use search::*;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::path::Path;

// Internal
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single sample of the planned trajectory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrajectoryPoint {
    pub pose: Pose,

    /// Commanded velocity along the vehicle's forward axis
    pub longitudinal_velocity_mps: f64,

    /// Commanded velocity along the vehicle's lateral axis
    pub lateral_velocity_mps: f64,

    /// Commanded longitudinal acceleration
    pub acceleration_mps2: f64,

    /// Commanded rate of change of heading
    pub heading_rate_rps: f64,
}

/// A planned trajectory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: Vec<TrajectoryPoint>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TrajError {
    #[error("Cannot read the trajectory file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot parse the trajectory file: {0}")]
    DeserialiseError(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajectoryPoint {
    /// Create a point on the XY plane with the given heading and longitudinal velocity. All other
    /// quantities are zero.
    pub fn from_xy_yaw_vel(x_m: f64, y_m: f64, yaw_rad: f64, vel_mps: f64) -> Self {
        Self {
            pose: Pose::from_xy_yaw(x_m, y_m, yaw_rad),
            longitudinal_velocity_mps: vel_mps,
            ..Default::default()
        }
    }

    /// Returns true if every component of the point is finite.
    pub fn is_finite(&self) -> bool {
        let p = &self.pose.position_m;
        let q = &self.pose.orientation_q;

        p.iter().all(|v| v.is_finite())
            && q.coords.iter().all(|v| v.is_finite())
            && self.longitudinal_velocity_mps.is_finite()
            && self.lateral_velocity_mps.is_finite()
            && self.acceleration_mps2.is_finite()
            && self.heading_rate_rps.is_finite()
    }
}

impl Trajectory {
    pub fn new(points: Vec<TrajectoryPoint>) -> Self {
        Self { points }
    }

    /// Load a trajectory from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TrajError> {
        let traj_str = std::fs::read_to_string(path).map_err(TrajError::FileLoadError)?;

        serde_json::from_str(&traj_str).map_err(TrajError::DeserialiseError)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl AsRef<[TrajectoryPoint]> for Trajectory {
    fn as_ref(&self) -> &[TrajectoryPoint] {
        &self.points
    }
}

impl From<Vec<TrajectoryPoint>> for Trajectory {
    fn from(points: Vec<TrajectoryPoint>) -> Self {
        Self::new(points)
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Check that no point of the trajectory contains a NaN or infinite value.
///
/// An empty trajectory is valid, callers check for emptiness themselves.
pub fn is_valid_trajectory(points: &[TrajectoryPoint]) -> bool {
    points.iter().all(TrajectoryPoint::is_finite)
}
