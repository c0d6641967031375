//! Point sampling for the initial hole layout
//!
//! Two sources of points:
//! - [`sample_points`]: random points inside a sphere or a box, thinned so the
//!   draw count tracks a target density (a Poisson-like layout, not a true
//!   Poisson process)
//! - [`points_from_image`]: one point on the sphere per dark pixel of an image,
//!   through an equirectangular mapping

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::path::Path;

use rand::Rng;

use crate::error::{SimError, SimResult};
use crate::simulation::states::NVec3;

/// Brightness below which a pixel produces a point
pub const DEFAULT_BRIGHTNESS_THRESHOLD: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Sphere,
    Box,
}

impl Shape {
    /// Sampling extent for a container of `size` holding holes of `hole_radius`:
    /// the sphere radius, or the box half-edge
    pub fn inner_extent(self, size: f64, hole_radius: f64) -> f64 {
        let inner = size - 2.0 * hole_radius;
        match self {
            Shape::Sphere => inner,
            Shape::Box => inner / 2.0,
        }
    }

    pub fn volume(self, extent: f64) -> f64 {
        match self {
            Shape::Sphere => 4.0 / 3.0 * PI * extent.powi(3),
            Shape::Box => (2.0 * extent).powi(3),
        }
    }

    /// True if `p` lies inside the sampled volume (with a little slack for rounding)
    pub fn contains(self, p: &NVec3, extent: f64) -> bool {
        let slack = 1e-9 * extent.max(1.0);
        match self {
            Shape::Sphere => p.norm() <= extent + slack,
            Shape::Box => p.iter().all(|c| c.abs() <= extent + slack),
        }
    }
}

/// Sample up to `num_points` points inside `shape` of the given `extent`.
///
/// Every draw produces a point and advances the counter by one; with
/// probability `1 - lambda` (where `lambda = num_points / volume`) the counter
/// advances once more, skipping a slot. The result therefore never exceeds
/// `num_points` and never falls below half of it.
pub fn sample_points<R: Rng + ?Sized>(shape: Shape, num_points: usize, extent: f64, rng: &mut R) -> Vec<NVec3> {
    let volume = shape.volume(extent);
    let lambda = if volume > 0.0 { num_points as f64 / volume } else { f64::INFINITY };

    let mut points = Vec::with_capacity(num_points);
    let mut i = 0;
    while i < num_points {
        let p = match shape {
            Shape::Sphere => sphere_point(extent, rng),
            Shape::Box => box_point(extent, rng),
        };
        points.push(p);
        i += 1;
        if rng.gen::<f64>() > lambda {
            i += 1;
        }
    }
    points
}

fn sphere_point<R: Rng + ?Sized>(radius: f64, rng: &mut R) -> NVec3 {
    // cube root counters the r^2 growth of shell volume
    let r = rng.gen::<f64>().cbrt() * radius;
    let theta = rng.gen::<f64>() * TAU;
    let phi = rng.gen::<f64>() * PI - FRAC_PI_2;
    NVec3::new(
        r * phi.cos() * theta.cos(),
        r * phi.sin(),
        r * phi.cos() * theta.sin(),
    )
}

fn box_point<R: Rng + ?Sized>(half: f64, rng: &mut R) -> NVec3 {
    NVec3::new(
        (rng.gen::<f64>() * 2.0 - 1.0) * half,
        (rng.gen::<f64>() * 2.0 - 1.0) * half,
        (rng.gen::<f64>() * 2.0 - 1.0) * half,
    )
}

/// Map every pixel darker than `threshold` onto a sphere of `radius`.
///
/// `rgba` is a tightly packed `width * height * 4` buffer, row-major from the
/// top-left pixel. Pixel `(x, y)` maps to `theta = 2 pi x / width` and
/// `phi = acos(2 y / height - 1)`.
pub fn points_from_image(width: u32, height: u32, rgba: &[u8], radius: f64, threshold: u8) -> SimResult<Vec<NVec3>> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(SimError::ImageBuffer {
            width,
            height,
            expected,
            actual: rgba.len(),
        });
    }

    let mut points = Vec::new();
    for (i, px) in rgba.chunks_exact(4).enumerate() {
        let brightness = (px[0] as f64 + px[1] as f64 + px[2] as f64) / 3.0;
        if brightness >= threshold as f64 {
            continue;
        }
        let u = (i % width as usize) as f64 / width as f64;
        let v = (i / width as usize) as f64 / height as f64;

        let theta = TAU * u;
        let phi = (2.0 * v - 1.0).acos();

        points.push(NVec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        ));
    }
    Ok(points)
}

/// Decode an image file and run [`points_from_image`] on its pixels
pub fn load_image_points(path: &Path, radius: f64, threshold: u8) -> SimResult<Vec<NVec3>> {
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();
    points_from_image(width, height, img.as_raw(), radius, threshold)
}
