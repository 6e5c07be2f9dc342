//! Surface sampling.

use glam::Vec3;

/// `n` roughly equidistant unit vectors on the sphere (golden-angle spiral).
pub fn fibonacci_sphere(n: usize) -> Vec<Vec3> {
    let golden_ratio = (1.0 + 5f32.sqrt()) / 2.0;
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            let inclination = (1.0 - 2.0 * t).clamp(-1.0, 1.0).acos();
            let azimuth = std::f32::consts::TAU * golden_ratio * i as f32;
            Vec3::new(
                inclination.sin() * azimuth.cos(),
                inclination.sin() * azimuth.sin(),
                inclination.cos(),
            )
        })
        .collect()
}
