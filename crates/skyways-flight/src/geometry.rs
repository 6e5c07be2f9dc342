//! Vector helpers shared by navigation, avoidance and stabilization.
//!
//! Every helper resolves degenerate input with a fixed fallback axis so the
//! callers never see NaN.

use glam::{Mat3, Quat, Vec3};

/// Lengths below this are treated as zero.
pub const EPSILON: f32 = 1.0e-6;

/// Unit vector perpendicular to `v`. `v` need not be normalized.
pub fn any_perpendicular(v: Vec3) -> Vec3 {
    v.normalize_or(Vec3::Y).any_orthonormal_vector()
}

/// Rotate `v` about a unit `axis` by `angle` radians (right-hand rule).
pub fn rotate_about(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    Quat::from_axis_angle(axis, angle) * v
}

/// Component of `v` perpendicular to the unit vector `normal`.
pub fn tangent_component(v: Vec3, normal: Vec3) -> Vec3 {
    v - normal * v.dot(normal)
}

/// Angle between two vectors in radians, stable near 0 and pi.
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    a.cross(b).length().atan2(a.dot(b))
}

/// Rotation about the common normal that carries unit `from` onto unit `to`.
///
/// Stays accurate for arcs of a small fraction of a degree, which is what
/// one tick of travel sweeps on the sphere. Opposite vectors turn half a
/// revolution about an arbitrary perpendicular.
pub fn surface_transport(from: Vec3, to: Vec3) -> Quat {
    let axis = from.cross(to);
    let sin = axis.length();
    if sin < EPSILON {
        if from.dot(to) >= 0.0 {
            return Quat::IDENTITY;
        }
        return Quat::from_axis_angle(any_perpendicular(from), std::f32::consts::PI);
    }
    Quat::from_axis_angle(axis / sin, angle_between(from, to))
}

/// Rotation whose local +Z is `forward` and whose local +Y lies in the
/// plane of `forward` and `up`.
///
/// When `up` is parallel to `forward` an arbitrary perpendicular is used.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or(Vec3::Z);
    let mut side = up.cross(f);
    if side.length_squared() < EPSILON * EPSILON {
        side = any_perpendicular(f).cross(f);
    }
    let side = side.normalize();
    let true_up = f.cross(side);
    Quat::from_mat3(&Mat3::from_cols(side, true_up, f)).normalize()
}

/// Turn `forward` toward `desired` by at most `max_turn` radians.
///
/// Returns the unit direction after the turn. If the remaining angle is
/// within `max_turn` the result is `desired` itself. Anti-parallel input
/// turns to starboard about `up`, or about an arbitrary perpendicular when
/// `up` is parallel to `forward`.
pub fn bounded_turn(forward: Vec3, desired: Vec3, up: Vec3, max_turn: f32) -> Vec3 {
    let f = forward.normalize_or(Vec3::Z);
    let Some(d) = desired.try_normalize() else {
        return f;
    };

    let cross = f.cross(d);
    let sin = cross.length();
    let angle = sin.atan2(f.dot(d));
    if angle <= max_turn {
        return d;
    }

    if sin < EPSILON {
        // Exactly behind: no unique turn plane.
        let axis = if up.dot(f).abs() < 0.99 {
            up.normalize_or(any_perpendicular(f))
        } else {
            any_perpendicular(f)
        };
        return rotate_about(f, axis, -max_turn).normalize_or(f);
    }

    rotate_about(f, cross / sin, max_turn).normalize_or(f)
}

/// Clamp the angle between `direction` and `up` into `[min_deg, max_deg]`.
///
/// The horizontal heading and the magnitude of `direction` are kept. A
/// purely vertical `direction` borrows the heading of `forward`, or an
/// arbitrary one if `forward` is vertical too.
pub fn clamp_to_band(direction: Vec3, up: Vec3, forward: Vec3, min_deg: f32, max_deg: f32) -> Vec3 {
    let magnitude = direction.length();
    if magnitude < EPSILON {
        return forward;
    }

    let radial = direction.dot(up);
    let mut horizontal = direction - up * radial;
    let angle = horizontal.length().atan2(radial);

    if horizontal.length() < EPSILON {
        horizontal = tangent_component(forward, up);
        if horizontal.length() < EPSILON {
            horizontal = any_perpendicular(up);
        }
    }
    let heading = horizontal.normalize();

    let clamped = angle.clamp(min_deg.to_radians(), max_deg.to_radians());
    (up * clamped.cos() + heading * clamped.sin()) * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit(v: Vec3) {
        assert!(v.is_finite(), "vector should be finite: {v:?}");
        assert!((v.length() - 1.0).abs() < 1e-4, "vector should be unit: {v:?}");
    }

    #[test]
    fn test_look_rotation_axes() {
        let rot = look_rotation(Vec3::X, Vec3::Y);
        assert!((rot * Vec3::Z - Vec3::X).length() < 1e-5);
        assert!((rot * Vec3::Y - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_look_rotation_reorthogonalizes_up() {
        let forward = Vec3::new(0.0, 0.3, 1.0).normalize();
        let rot = look_rotation(forward, Vec3::Y);
        let up = rot * Vec3::Y;
        assert!(up.dot(forward).abs() < 1e-5, "up must be perpendicular to forward");
        assert!(up.y > 0.9, "up should stay close to the requested up: {up:?}");
    }

    #[test]
    fn test_look_rotation_parallel_up_is_finite() {
        let rot = look_rotation(Vec3::Y, Vec3::Y);
        assert!(rot.is_finite());
        assert!((rot * Vec3::Z - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_bounded_turn_caps_angle() {
        let cap = 0.5f32.to_radians();
        let out = bounded_turn(Vec3::Z, Vec3::X, Vec3::Y, cap);
        assert_unit(out);
        assert!((angle_between(Vec3::Z, out) - cap).abs() < 1e-5);
        assert!(out.x > 0.0, "turn should head toward the desired side");
    }

    #[test]
    fn test_bounded_turn_small_angle_snaps() {
        let desired = rotate_about(Vec3::Z, Vec3::Y, 0.001);
        let out = bounded_turn(Vec3::Z, desired, Vec3::Y, 0.01);
        assert!((out - desired).length() < 1e-6);
    }

    #[test]
    fn test_bounded_turn_anti_parallel_goes_starboard() {
        let cap = 0.5f32.to_radians();
        let out = bounded_turn(Vec3::Z, -Vec3::Z, Vec3::Y, cap);
        assert_unit(out);
        // Starboard is forward x up.
        let starboard = Vec3::Z.cross(Vec3::Y);
        assert!(out.dot(starboard) > 0.0, "expected starboard turn, got {out:?}");
        assert!((angle_between(Vec3::Z, out) - cap).abs() < 1e-5);
    }

    #[test]
    fn test_bounded_turn_anti_parallel_with_vertical_forward() {
        let out = bounded_turn(Vec3::Y, -Vec3::Y, Vec3::Y, 0.1);
        assert_unit(out);
        assert!((angle_between(Vec3::Y, out) - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_surface_transport_small_arc_is_exact() {
        let from = Vec3::new(0.0, 1.0, 0.0);
        // 0.05 degrees of travel, about one tick at cruise speed.
        let to = rotate_about(from, Vec3::X, 0.05f32.to_radians());
        let q = surface_transport(from, to);
        assert!((q * from - to).length() < 1e-6);

        // A tangent vector keeps its heading: no spurious twist about `to`.
        let carried = q * Vec3::X;
        assert!((carried - Vec3::X).length() < 1e-6, "twist introduced: {carried:?}");
        let back = surface_transport(to, from) * (q * Vec3::Z);
        assert!(
            angle_between(back, Vec3::Z).to_degrees() < 1e-3,
            "round trip should restore the heading"
        );
    }

    #[test]
    fn test_surface_transport_degenerate() {
        assert_eq!(surface_transport(Vec3::Y, Vec3::Y), Quat::IDENTITY);
        let q = surface_transport(Vec3::Y, -Vec3::Y);
        assert!((q * Vec3::Y + Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_clamp_to_band_keeps_heading_and_magnitude() {
        // 10 degrees above the horizon toward +X: angle from up is 80 degrees.
        let dir = Vec3::new(80f32.to_radians().sin(), 80f32.to_radians().cos(), 0.0) * 3.0;
        let out = clamp_to_band(dir, Vec3::Y, Vec3::Z, 88.0, 92.0);
        assert!((out.length() - 3.0).abs() < 1e-4);
        assert!(out.z.abs() < 1e-6, "heading must be kept");
        let angle = angle_between(Vec3::Y, out).to_degrees();
        assert!((angle - 88.0).abs() < 1e-3, "expected 88 degrees, got {angle}");
    }

    #[test]
    fn test_clamp_to_band_vertical_uses_forward_heading() {
        let out = clamp_to_band(Vec3::Y * 2.0, Vec3::Y, Vec3::Z, 40.0, 85.0);
        assert!(out.is_finite());
        assert!(out.z > 0.0, "vertical target should borrow forward heading: {out:?}");
        let angle = angle_between(Vec3::Y, out).to_degrees();
        assert!((angle - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_clamp_to_band_vertical_forward_and_target() {
        let out = clamp_to_band(-Vec3::Y, Vec3::Y, Vec3::Y, 90.0, 150.0);
        assert!(out.is_finite());
        let angle = angle_between(Vec3::Y, out).to_degrees();
        assert!((angle - 150.0).abs() < 1e-3);
    }
}
