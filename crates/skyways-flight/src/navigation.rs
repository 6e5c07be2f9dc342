//! Guide navigation over the planet surface.
//!
//! Each tick a guide picks a phase from its geometry, aims at a
//! phase-dependent target, limits the climb or descent angle to the
//! phase's band, turns toward it at a bounded rate, and advances along the
//! sphere with its radius limited by the phase.

use glam::{Quat, Vec3};

use skyways_core::components::GuidePath;
use skyways_core::config::FlightParams;
use skyways_core::enums::FlightPhase;

use crate::geometry::{any_perpendicular, bounded_turn, clamp_to_band, look_rotation, rotate_about, EPSILON};

/// Allowed angle from local up (degrees) while climbing toward the cruise shell.
pub const CLIMB_BAND: (f32, f32) = (40.0, 85.0);
/// Allowed angle from local up while settling down onto the cruise shell.
pub const SETTLE_BAND: (f32, f32) = (95.0, 140.0);
pub const CRUISE_BAND: (f32, f32) = (88.0, 92.0);
pub const DESCENT_BAND: (f32, f32) = (90.0, 150.0);

/// Result of one navigation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavStep {
    pub position: Vec3,
    pub rotation: Quat,
    pub phase: FlightPhase,
}

/// Phase from height above the surface and distance to the end point.
///
/// Descent takes priority: once inside `target_altitude * descent_ratio`
/// of the end point a guide descends regardless of height.
pub fn determine_phase(
    height: f32,
    target_altitude: f32,
    dist_to_end: f32,
    params: &FlightParams,
) -> FlightPhase {
    if dist_to_end <= params.descent_threshold(target_altitude) {
        FlightPhase::Descending
    } else if (height - target_altitude).abs() <= params.cruise_tolerance {
        FlightPhase::Cruising
    } else {
        FlightPhase::Climbing
    }
}

/// Point the guide steers at. Descent aims at the runway itself; the
/// other phases aim at the point above it on the cruise shell.
pub fn target_point(phase: FlightPhase, end_point: Vec3, target_altitude: f32) -> Vec3 {
    match phase {
        FlightPhase::Descending => end_point,
        FlightPhase::Climbing | FlightPhase::Cruising => {
            end_point + end_point.normalize_or_zero() * target_altitude
        }
    }
}

/// Angle band from local up (degrees) for a phase.
pub fn phase_band(phase: FlightPhase, height: f32, target_altitude: f32) -> (f32, f32) {
    match phase {
        FlightPhase::Climbing if height > target_altitude => SETTLE_BAND,
        FlightPhase::Climbing => CLIMB_BAND,
        FlightPhase::Cruising => CRUISE_BAND,
        FlightPhase::Descending => DESCENT_BAND,
    }
}

/// Advance a guide by one tick.
///
/// `current_pos` and `path.end_point` are relative to the planet center.
pub fn calculate_next(
    current_pos: Vec3,
    current_rot: Quat,
    path: &GuidePath,
    speed: f32,
    planet_radius: f32,
    dt: f32,
    params: &FlightParams,
) -> NavStep {
    let forward = (current_rot * Vec3::Z).normalize_or(Vec3::Z);
    let up = current_pos.normalize_or((current_rot * Vec3::Y).normalize_or(Vec3::Y));
    let rho = current_pos.length();
    let height = rho - planet_radius;
    let altitude = path.target_altitude;
    let cruise_radius = planet_radius + altitude;

    let phase = determine_phase(height, altitude, current_pos.distance(path.end_point), params);
    let target = target_point(phase, path.end_point, altitude);
    let (band_min, band_max) = phase_band(phase, height, altitude);

    let desired = clamp_to_band(target - current_pos, up, forward, band_min, band_max);
    let turned = bounded_turn(forward, desired, up, params.max_turn_radians());

    // Split the step into an arc along the sphere and a radial change.
    let step = speed * dt;
    let radial = turned.dot(up);
    let tangent = turned - up * radial;
    let tangent_len = tangent.length();

    let (new_up, new_forward) = if tangent_len > EPSILON && rho > EPSILON {
        let axis = up.cross(tangent).normalize_or(any_perpendicular(up));
        let arc = step * tangent_len / rho;
        (rotate_about(up, axis, arc), rotate_about(turned, axis, arc))
    } else {
        (up, turned)
    };

    let mut new_radius = rho + step * radial;
    match phase {
        FlightPhase::Climbing if height < altitude => new_radius = new_radius.min(cruise_radius),
        FlightPhase::Climbing => new_radius = new_radius.max(cruise_radius),
        FlightPhase::Cruising => new_radius = cruise_radius,
        FlightPhase::Descending => {}
    }
    let new_radius = new_radius.max(planet_radius);

    let new_up = new_up.normalize_or(up);
    let new_forward = new_forward.normalize_or(forward);

    NavStep {
        position: new_up * new_radius,
        rotation: look_rotation(new_forward, new_up),
        phase,
    }
}
