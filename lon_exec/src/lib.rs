//! # Longitudinal control library.
//!
//! Pure geometric and signal-processing utilities used by the longitudinal
//! (speed and acceleration) half of a trajectory following controller.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Localisation types - the pose of the vehicle and of trajectory points
pub mod loc;

/// Trajectory types and the trajectory geometry functions (nearest segment search, arc length)
pub mod traj;

/// Longitudinal control utilities - stop distance, pitch, delay compensation and rate limiting
pub mod lon_ctrl;
