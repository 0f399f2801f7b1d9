//! Mollweide equal-area projection
//!
//! Maps longitude in [-π, π] and latitude in [-π/2, π/2] onto an ellipse
//! spanning x in [-2√2, 2√2] and y in [-√2, √2].

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};

/// Half-width of the projected ellipse
pub const X_EXTENT: f64 = 2.0 * SQRT_2;

/// Half-height of the projected ellipse
pub const Y_EXTENT: f64 = SQRT_2;

const MAX_ITERATIONS: usize = 50;
const TOLERANCE: f64 = 1e-10;

/// Solve 2θ + sin 2θ = π sin φ for the auxiliary angle θ
fn auxiliary_angle(latitude: f64) -> f64 {
    if (FRAC_PI_2 - latitude.abs()) < 1e-9 {
        return latitude.signum() * FRAC_PI_2;
    }

    let target = PI * latitude.sin();
    let mut doubled = 2.0 * latitude;
    for _ in 0..MAX_ITERATIONS {
        let step = (doubled + doubled.sin() - target) / (1.0 + doubled.cos());
        doubled -= step;
        if step.abs() < TOLERANCE {
            break;
        }
    }
    doubled / 2.0
}

/// Project (longitude, latitude) in radians to plane coordinates
pub fn mollweide(longitude: f64, latitude: f64) -> (f64, f64) {
    let theta = auxiliary_angle(latitude);
    let x = X_EXTENT / PI * longitude * theta.cos();
    let y = SQRT_2 * theta.sin();
    (x, y)
}

/// Projected line of constant longitude, pole to pole
pub fn meridian(longitude: f64, samples: usize) -> Vec<(f64, f64)> {
    (0..=samples)
        .map(|i| {
            let latitude = -FRAC_PI_2 + PI * i as f64 / samples as f64;
            mollweide(longitude, latitude)
        })
        .collect()
}

/// Projected line of constant latitude across the full longitude range
pub fn parallel(latitude: f64, samples: usize) -> Vec<(f64, f64)> {
    (0..=samples)
        .map(|i| {
            let longitude = -PI + 2.0 * PI * i as f64 / samples as f64;
            mollweide(longitude, latitude)
        })
        .collect()
}

/// Closed boundary of the projected sky
pub fn outline(samples: usize) -> Vec<(f64, f64)> {
    let mut points = meridian(PI, samples);
    let mut west = meridian(-PI, samples);
    west.reverse();
    points.extend(west);
    points
}
