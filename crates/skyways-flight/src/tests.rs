#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use skyways_core::components::GuidePath;
    use skyways_core::config::{FlightParams, StabilizerGains};

    use crate::geometry::{angle_between, look_rotation, surface_transport, tangent_component};
    use crate::navigation::calculate_next;
    use crate::sphere::fibonacci_sphere;
    use crate::stabilizer::{integrate_rotation, stabilize};

    const R: f32 = 100.0;
    const DT: f32 = 1.0 / 60.0;

    fn random_unit(rng: &mut ChaCha8Rng) -> Vec3 {
        loop {
            let v = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if let Some(n) = v.try_normalize() {
                return n;
            }
        }
    }

    /// Departure state the way the spawner builds it.
    fn departure(src: Vec3, dst: Vec3) -> (Vec3, Quat) {
        let up = src.normalize();
        let pos = up * (R + 1.0);
        let mut forward = tangent_component(dst * R - pos, up);
        if forward.length() < 1e-4 {
            forward = up.any_orthonormal_vector();
        }
        (pos, look_rotation(forward.normalize(), up))
    }

    #[test]
    fn test_navigation_never_nan_random_states() {
        let params = FlightParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..2000 {
            let pos = random_unit(&mut rng) * rng.gen_range(R..R + 8.0);
            let rot = look_rotation(random_unit(&mut rng), random_unit(&mut rng));
            let path = GuidePath {
                end_point: random_unit(&mut rng) * R,
                target_altitude: rng.gen_range(0.5..8.0),
            };

            let step = calculate_next(pos, rot, &path, 5.0, R, DT, &params);
            assert!(step.position.is_finite(), "position NaN from {pos:?}");
            assert!(step.rotation.is_finite(), "rotation NaN from {pos:?}");
            assert!(step.rotation.is_normalized());
            assert!(step.position.length() >= R - 1e-3, "guide went underground");
        }
    }

    #[test]
    fn test_navigation_target_parallel_and_antiparallel_to_up() {
        let params = FlightParams::default();
        let pos = Vec3::new(0.0, R + 4.0, 0.0);
        for forward in [Vec3::Z, Vec3::Y, -Vec3::Y] {
            let rot = look_rotation(forward, Vec3::X);
            for end in [Vec3::Y * R, -Vec3::Y * R] {
                let path = GuidePath {
                    end_point: end,
                    target_altitude: 4.0,
                };
                let step = calculate_next(pos, rot, &path, 5.0, R, DT, &params);
                assert!(step.position.is_finite() && step.rotation.is_finite());
                assert!(step.rotation.is_normalized());
            }
        }
    }

    #[test]
    fn test_heading_change_bounded_random_states() {
        let params = FlightParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..1000 {
            let pos = random_unit(&mut rng) * rng.gen_range(R + 0.5..R + 6.0);
            let up = pos.normalize();
            let rot = look_rotation(random_unit(&mut rng), up);
            let path = GuidePath {
                end_point: random_unit(&mut rng) * R,
                target_altitude: rng.gen_range(0.5..6.0),
            };

            let step = calculate_next(pos, rot, &path, 5.0, R, DT, &params);
            let transport_back = surface_transport(step.position.normalize(), up);
            let after = transport_back * (step.rotation * Vec3::Z);
            let turned = angle_between(rot * Vec3::Z, after).to_degrees();
            assert!(
                turned <= params.max_turn_degrees + 1e-2,
                "heading changed {turned} degrees in one tick"
            );
        }
    }

    #[test]
    fn test_flights_between_airports_land() {
        let params = FlightParams::default();
        let airports = fibonacci_sphere(25);
        let mut rng = ChaCha8Rng::seed_from_u64(72);

        for _ in 0..40 {
            let i = rng.gen_range(0..airports.len());
            let mut j = rng.gen_range(0..airports.len() - 1);
            if j >= i {
                j += 1;
            }
            let end_point = airports[j] * R;
            let dist = (airports[i] * R).distance(end_point);
            let path = GuidePath {
                end_point,
                target_altitude: rng.gen_range(0.01 * dist..=0.05 * dist),
            };

            let (mut pos, mut rot) = departure(airports[i], airports[j]);
            let mut landed = false;
            for _ in 0..20_000 {
                if pos.distance(end_point) <= params.landing_tolerance {
                    landed = true;
                    break;
                }
                let step = calculate_next(pos, rot, &path, params.speed, R, DT, &params);
                assert!(step.position.length() >= R - 1e-3);
                pos = step.position;
                rot = step.rotation;
            }
            assert!(landed, "flight {i} -> {j} never reached its end point");
        }
    }

    #[test]
    fn test_stabilizer_converges() {
        let gains = StabilizerGains::default();
        let target = Quat::IDENTITY;
        let mut current = look_rotation(
            Vec3::new(1.0, 0.0, 1.0).normalize(),
            Vec3::new(0.0, 1.0, 0.3).normalize(),
        );
        let mut omega = Vec3::ZERO;

        let error_deg = |q: Quat| angle_between(q * Vec3::Z, Vec3::Z).to_degrees();
        let initial = error_deg(current);
        let mut after_one_second = initial;

        for tick in 0..600 {
            omega = stabilize(current, target, omega, &gains, DT);
            current = integrate_rotation(current, omega, DT);
            if tick == 59 {
                after_one_second = error_deg(current);
            }
        }
        let final_error = error_deg(current);

        assert!(after_one_second < initial, "error should shrink within a second");
        assert!(final_error < after_one_second, "error should keep shrinking");
        assert!(final_error < 2.0, "expected near alignment, got {final_error} degrees");
        let up_error = angle_between(current * Vec3::Y, Vec3::Y).to_degrees();
        assert!(up_error < 5.0, "roll should settle too, got {up_error} degrees");
    }
}
