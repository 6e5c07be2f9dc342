//! PD orientation controller that keeps a plane aligned with its guide.

use glam::{Quat, Vec3};

use skyways_core::config::StabilizerGains;
use skyways_core::constants::STABILIZER_SETTLE_EPSILON;

/// Cross products shorter than this contribute no error term.
const ALIGN_EPSILON: f32 = 1.0e-4;

/// Rotation vector (axis * angle) that turns `from` onto `to`.
///
/// Anti-parallel input turns about `fallback_axis` by pi.
fn alignment_error(from: Vec3, to: Vec3, fallback_axis: Vec3) -> Vec3 {
    let cross = from.cross(to);
    let sin = cross.length();
    let cos = from.dot(to);
    if sin > ALIGN_EPSILON {
        cross / sin * sin.atan2(cos)
    } else if cos < 0.0 {
        fallback_axis * std::f32::consts::PI
    } else {
        Vec3::ZERO
    }
}

/// Weighted angular error between the current and target orientations.
///
/// The forward term aligns the nose. The up term aligns the roll, using
/// both up vectors projected perpendicular to the current forward.
pub fn angular_error(current: Quat, target: Quat, gains: &StabilizerGains) -> Vec3 {
    let current_forward = current * Vec3::Z;
    let current_up = current * Vec3::Y;
    let target_forward = target * Vec3::Z;
    let target_up = target * Vec3::Y;

    let mut error = alignment_error(current_forward, target_forward, current_up) * gains.forward_weight;

    let target_up_proj = target_up - current_forward * target_up.dot(current_forward);
    let current_up_proj = current_up - current_forward * current_up.dot(current_forward);
    if let (Some(t), Some(c)) = (
        target_up_proj.try_normalize(),
        current_up_proj.try_normalize(),
    ) {
        error += alignment_error(c, t, current_forward) * gains.up_weight;
    }

    error
}

/// New angular velocity for a plane after one controller tick.
///
/// Near alignment the velocity is only damped. Otherwise the PD command
/// `error * rotation_speed - omega * damping` is clamped to
/// `max_angular_speed` and blended in exponentially.
pub fn stabilize(
    current: Quat,
    target: Quat,
    angular_velocity: Vec3,
    gains: &StabilizerGains,
    dt: f32,
) -> Vec3 {
    let error = angular_error(current, target, gains);

    if error.length_squared() < STABILIZER_SETTLE_EPSILON {
        let k = (gains.damping * dt).clamp(0.0, 1.0);
        return angular_velocity * (1.0 - k);
    }

    let command = (error * gains.rotation_speed - angular_velocity * gains.damping)
        .clamp_length_max(gains.max_angular_speed);
    let blend = 1.0 - (-gains.response_speed * dt).exp();
    angular_velocity + (command - angular_velocity) * blend
}

/// Integrate an orientation by a world-space angular velocity.
pub fn integrate_rotation(rotation: Quat, angular_velocity: Vec3, dt: f32) -> Quat {
    (Quat::from_scaled_axis(angular_velocity * dt) * rotation).normalize()
}
