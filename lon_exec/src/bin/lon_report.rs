//! # Longitudinal control report
//!
//! Loads a trajectory and a vehicle state, calculates the per-cycle quantities
//! the longitudinal controller would consume, and logs and saves them.
//!
//! Usage: `lon_report <trajectory.json> <x_m> <y_m> <yaw_rad> <vel_mps>`

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::info;
use std::env;

use lon_lib::{
    loc::Pose,
    lon_ctrl::{LonCycleData, Params},
    traj::Trajectory,
};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    let session = Session::new("lon_report", "sessions").wrap_err("Failed to create the session")?;

    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    info!("Longitudinal Control Report\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- ARGUMENTS ----

    let args: Vec<String> = env::args().collect();
    let (traj_path, pose, current_vel_mps) = parse_args(&args)?;

    // ---- LOAD PARAMETERS AND TRAJECTORY ----

    let params: Params =
        util::params::load("lon_ctrl.toml").wrap_err("Could not load lon_ctrl params")?;
    info!("Parameters loaded: {:?}", params);

    let traj = Trajectory::load(traj_path).wrap_err("Could not load the trajectory")?;
    info!("Loaded trajectory of {} points from \"{}\"", traj.len(), traj_path);

    // ---- CALCULATE ----

    let data = LonCycleData::calculate(&params, &pose, traj.as_ref(), current_vel_mps)
        .wrap_err("Could not calculate the longitudinal quantities")?;

    info!(
        "Delayed position: ({:.3}, {:.3})",
        data.delayed_pose.position_m[0], data.delayed_pose.position_m[1]
    );
    info!(
        "Target velocity: {:.3} m/s, acceleration: {:.3} m/s^2",
        data.target_point.longitudinal_velocity_mps, data.target_point.acceleration_mps2
    );
    if data.stop_distance.is_stop() {
        info!("Stop distance: {:.3} m", data.stop_distance.distance_m());
    } else {
        info!(
            "No stop ahead, {:.3} m of trajectory remaining",
            data.stop_distance.distance_m()
        );
    }
    info!(
        "Pitch: {:.4} rad (pose), {:.4} rad (trajectory)",
        data.pitch_by_pose_rad, data.pitch_by_traj_rad
    );

    // ---- SAVE ----

    let data_json =
        serde_json::to_string_pretty(&data).wrap_err("Could not serialise the report")?;
    let report_path = session
        .write("lon_report.json", &data_json)
        .wrap_err("Could not save the report")?;

    info!("Report saved to {:?}", report_path);

    Ok(())
}

/// Split the command line into the trajectory path, the vehicle pose and the current velocity.
fn parse_args(args: &[String]) -> Result<(&str, Pose, f64), Report> {
    if args.len() != 6 {
        return Err(eyre!(
            "Expected 5 arguments (trajectory path, x, y, yaw, velocity), found {}",
            args.len().saturating_sub(1)
        ));
    }

    let parse = |i: usize, name: &str| -> Result<f64, Report> {
        args[i]
            .parse::<f64>()
            .wrap_err_with(|| format!("Could not parse {} from \"{}\"", name, args[i]))
    };

    let pose = Pose::from_xy_yaw(parse(2, "x")?, parse(3, "y")?, parse(4, "yaw")?);

    Ok((&args[1], pose, parse(5, "velocity")?))
}
