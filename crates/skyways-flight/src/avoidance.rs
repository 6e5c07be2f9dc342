//! Evasive steering for guides carrying a proximity alert.

use glam::{Quat, Vec3};

use skyways_core::config::FlightParams;

use crate::geometry::{any_perpendicular, bounded_turn, look_rotation, rotate_about, tangent_component, EPSILON};

/// Result of one evasive tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvoidanceStep {
    pub position: Vec3,
    pub rotation: Quat,
    /// The threat is beyond the release distance after this step.
    pub clear_alert: bool,
}

/// Direction a guide wants to fly to get away from `threat_position`.
///
/// Head-on threats, and threats exactly abeam, are dodged by veering to
/// starboard instead of reversing.
pub fn ideal_evasion(position: Vec3, forward: Vec3, up: Vec3, threat_position: Vec3, params: &FlightParams) -> Vec3 {
    let to_threat = (threat_position - position).normalize_or_zero();
    let facing = to_threat.dot(forward);
    if facing > params.head_on_threshold || facing == 0.0 {
        rotate_about(forward, up, -params.evasive_turn_degrees.to_radians())
    } else {
        -to_threat
    }
}

/// Turn away from a threat and advance along the great circle at the
/// current radius.
///
/// `position` and `threat_position` are relative to the planet center.
pub fn evasive_step(
    position: Vec3,
    rotation: Quat,
    threat_position: Vec3,
    speed: f32,
    dt: f32,
    params: &FlightParams,
) -> AvoidanceStep {
    let forward = (rotation * Vec3::Z).normalize_or(Vec3::Z);
    let up = position.normalize_or((rotation * Vec3::Y).normalize_or(Vec3::Y));
    let radius = position.length();

    let ideal = ideal_evasion(position, forward, up, threat_position, params);
    let turned = bounded_turn(forward, ideal, up, params.max_turn_radians());

    let mut heading = tangent_component(turned, up);
    if heading.length() < EPSILON {
        heading = tangent_component(forward, up);
        if heading.length() < EPSILON {
            heading = any_perpendicular(up);
        }
    }
    let heading = heading.normalize();

    let (new_up, new_heading) = if radius > EPSILON {
        let axis = up.cross(heading).normalize_or(any_perpendicular(up));
        let arc = speed * dt / radius;
        (rotate_about(up, axis, arc), rotate_about(heading, axis, arc))
    } else {
        (up, heading)
    };
    let new_up = new_up.normalize_or(up);
    let new_position = new_up * radius;

    AvoidanceStep {
        position: new_position,
        rotation: look_rotation(new_heading, new_up),
        clear_alert: new_position.distance(threat_position) > params.alert_release_distance,
    }
}
