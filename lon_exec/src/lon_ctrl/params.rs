//! Longitudinal control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the longitudinal control utilities
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Params {

    /// Maximum distance from the vehicle at which a trajectory point is
    /// preferred when locating the vehicle on the trajectory.
    pub max_dist_m: f64,

    /// Maximum heading difference between the vehicle and a trajectory point
    /// for the point to be preferred when locating the vehicle.
    pub max_yaw_rad: f64,

    /// Distance between the front and rear axles
    pub wheel_base_m: f64,

    /// Actuation and measurement latency to compensate the vehicle pose for
    pub delay_compensation_time_s: f64,

    /// Maximum rate of increase of the acceleration command (jerk limit)
    pub max_acc_rate_mps3: f64,

    /// Minimum (most negative) rate of change of the acceleration command
    pub min_acc_rate_mps3: f64,
}
