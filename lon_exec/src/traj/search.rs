//! # Trajectory search and arc length functions
//!
//! These functions locate the vehicle on the trajectory and measure distances
//! along it. None of them allocate, and all of them run in time linear in the
//! number of points.
//!
//! Functions return `None` rather than panicking when given indices outside
//! the trajectory, or a trajectory too short to contain a segment.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::Vector3;
use std::cmp::Ordering;

// Internal
use super::TrajectoryPoint;
use crate::loc::Pose;
use util::maths::get_ang_dist_2pi;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Signed heading difference from `base` to `target`, in the range [-pi, pi].
pub fn calc_yaw_deviation(base: &Pose, target: &Pose) -> f64 {
    get_ang_dist_2pi(base.get_heading(), target.get_heading())
}

/// Find the index of the point nearest to `position_m` on the XY plane.
///
/// If several points are equally near the first is returned.
pub fn find_nearest_index(points: &[TrajectoryPoint], position_m: &Vector3<f64>) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, squared_dist2(p, position_m)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .map(|(i, _)| i)
}

/// Find the index of the point nearest to `pose`, preferring points within `max_dist_m` of the
/// pose whose heading is within `max_yaw_rad` of the pose's heading.
///
/// The constraints are soft, and are relaxed in stages:
///
/// 1. Nearest point satisfying both the distance and yaw constraints.
/// 2. Nearest point satisfying the distance constraint only.
/// 3. Nearest point on the whole trajectory.
///
/// In stages 1 and 2 the search stops at the end of the first run of points which satisfy the
/// constraints, so a trajectory passing near the pose more than once resolves to the first pass.
pub fn find_first_nearest_index_with_soft_constraints(
    points: &[TrajectoryPoint],
    pose: &Pose,
    max_dist_m: f64,
    max_yaw_rad: f64,
) -> Option<usize> {
    if points.is_empty() {
        return None;
    }

    let max_sq_dist_m2 = max_dist_m * max_dist_m;

    if let Some(i) = find_first_nearest_index_within(points, &pose.position_m, |p, sq_dist_m2| {
        sq_dist_m2 <= max_sq_dist_m2 && calc_yaw_deviation(&p.pose, pose).abs() <= max_yaw_rad
    }) {
        return Some(i);
    }

    debug!(
        "No point within {:.3} m and {:.3} rad of the pose, relaxing the yaw constraint",
        max_dist_m, max_yaw_rad
    );

    if let Some(i) = find_first_nearest_index_within(points, &pose.position_m, |_, sq_dist_m2| {
        sq_dist_m2 <= max_sq_dist_m2
    }) {
        return Some(i);
    }

    debug!(
        "No point within {:.3} m of the pose, using the globally nearest point",
        max_dist_m
    );

    find_nearest_index(points, &pose.position_m)
}

/// Find the index of the segment nearest to `pose`, using the same soft constraints as
/// [`find_first_nearest_index_with_soft_constraints`].
///
/// The nearest point is mapped onto a segment: if the pose lies behind the nearest point the
/// segment ending at that point is chosen, otherwise the segment starting at it. The first and
/// last points always map onto the first and last segments.
///
/// Returns `None` if the trajectory has fewer than two points.
pub fn find_first_nearest_segment_index_with_soft_constraints(
    points: &[TrajectoryPoint],
    pose: &Pose,
    max_dist_m: f64,
    max_yaw_rad: f64,
) -> Option<usize> {
    if points.len() < 2 {
        return None;
    }

    let nearest_idx =
        find_first_nearest_index_with_soft_constraints(points, pose, max_dist_m, max_yaw_rad)?;

    if nearest_idx == 0 {
        return Some(0);
    }
    if nearest_idx == points.len() - 1 {
        return Some(points.len() - 2);
    }

    let offset_m = calc_longitudinal_offset_to_segment(points, nearest_idx, &pose.position_m)?;

    if offset_m <= 0.0 {
        Some(nearest_idx - 1)
    } else {
        Some(nearest_idx)
    }
}

/// Distance from the start of segment `seg_idx` to the projection of `position_m` onto the
/// segment's line, measured along the segment on the XY plane.
///
/// The projection is not limited to the segment, so the offset is negative behind the start and
/// greater than the segment length beyond the end. A zero-length segment gives 0.
pub fn calc_longitudinal_offset_to_segment(
    points: &[TrajectoryPoint],
    seg_idx: usize,
    position_m: &Vector3<f64>,
) -> Option<f64> {
    let front = points.get(seg_idx)?.pose.position2();
    let back = points.get(seg_idx.checked_add(1)?)?.pose.position2();

    let segment = back - front;
    let length_m = segment.norm();

    if length_m == 0.0 {
        return Some(0.0);
    }

    Some(segment.dot(&(position_m.xy() - front)) / length_m)
}

/// Length along the trajectory from point `src_idx` to point `dst_idx`.
///
/// The length is negative if `dst_idx` comes before `src_idx`.
pub fn calc_signed_arc_length(
    points: &[TrajectoryPoint],
    src_idx: usize,
    dst_idx: usize,
) -> Option<f64> {
    let (first, last, sign) = if src_idx > dst_idx {
        (dst_idx, src_idx, -1.0)
    } else {
        (src_idx, dst_idx, 1.0)
    };

    let length_m: f64 = points
        .get(first..=last)?
        .windows(2)
        .map(|w| (w[1].pose.position2() - w[0].pose.position2()).norm())
        .sum();

    Some(sign * length_m)
}

/// Length along the trajectory from the projection of `position_m` onto segment `src_seg_idx` to
/// point `dst_idx`.
pub fn calc_signed_arc_length_from_point(
    points: &[TrajectoryPoint],
    position_m: &Vector3<f64>,
    src_seg_idx: usize,
    dst_idx: usize,
) -> Option<f64> {
    let length_on_traj_m = calc_signed_arc_length(points, src_seg_idx, dst_idx)?;
    let src_offset_m = calc_longitudinal_offset_to_segment(points, src_seg_idx, position_m)?;

    Some(length_on_traj_m - src_offset_m)
}

/// Find the first point at or after `from_idx` whose longitudinal velocity is exactly zero.
pub fn search_zero_velocity_index(points: &[TrajectoryPoint], from_idx: usize) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .skip(from_idx)
        .find(|(_, p)| p.longitudinal_velocity_mps == 0.0)
        .map(|(i, _)| i)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Squared distance on the XY plane between the point and the position.
fn squared_dist2(point: &TrajectoryPoint, position_m: &Vector3<f64>) -> f64 {
    (point.pose.position2() - position_m.xy()).norm_squared()
}

/// Find the nearest point in the first run of points accepted by `within`.
///
/// `within` is given the point and its squared distance to `position_m`.
fn find_first_nearest_index_within<F>(
    points: &[TrajectoryPoint],
    position_m: &Vector3<f64>,
    within: F,
) -> Option<usize>
where
    F: Fn(&TrajectoryPoint, f64) -> bool,
{
    let mut nearest: Option<(usize, f64)> = None;

    for (i, point) in points.iter().enumerate() {
        let sq_dist_m2 = squared_dist2(point, position_m);

        if !within(point, sq_dist_m2) {
            // Left the first run of accepted points
            if nearest.is_some() {
                break;
            }
            continue;
        }

        match nearest {
            Some((_, min_sq_dist_m2)) if min_sq_dist_m2 <= sq_dist_m2 => (),
            _ => nearest = Some((i, sq_dist_m2)),
        }
    }

    nearest.map(|(i, _)| i)
}
