/// Near-plane clipping of view-space triangles
///
/// The camera looks down +z. Everything with `z >= z_near` is visible; a
/// triangle crossing the plane is cut down to the part in front of it, which
/// is either a triangle or a quadrilateral split into two triangles. Output
/// triangles keep the winding of the input.
use std::ops::Deref;

use crate::geometry::{Triangle, Vec3};

/// Default near-plane distance in view space
pub const NEAR_PLANE: f32 = 0.1;

/// Zero, one or two triangles produced by clipping a single triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedTriangles {
    buf: [Triangle; 2],
    len: usize,
}

impl ClippedTriangles {
    fn none() -> Self {
        let zero = Triangle::new(Vec3::zeros(), Vec3::zeros(), Vec3::zeros());
        Self {
            buf: [zero; 2],
            len: 0,
        }
    }

    fn one(t: Triangle) -> Self {
        let mut out = Self::none();
        out.buf[0] = t;
        out.len = 1;
        out
    }

    fn two(t0: Triangle, t1: Triangle) -> Self {
        Self {
            buf: [t0, t1],
            len: 2,
        }
    }
}

impl Deref for ClippedTriangles {
    type Target = [Triangle];

    fn deref(&self) -> &[Triangle] {
        &self.buf[..self.len]
    }
}

impl<'a> IntoIterator for &'a ClippedTriangles {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Point where the segment `inside -> outside` crosses `z = z_plane`.
///
/// Returns `None` when the segment has no usable z extent (equal or
/// non-finite depths), in which case there is no crossing to compute.
pub fn intersect_near(inside: Vec3, outside: Vec3, z_plane: f32) -> Option<Vec3> {
    let denom = outside.z - inside.z;
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }

    let t = ((z_plane - inside.z) / denom).clamp(0.0, 1.0);
    let mut p = inside.lerp(&outside, t);
    // Lands on the plane exactly, whatever rounding the lerp did
    p.z = z_plane;
    Some(p)
}

/// Clip `triangle` against the plane `z = z_near`, keeping `z >= z_near`
pub fn clip_against_near(triangle: &Triangle, z_near: f32) -> ClippedTriangles {
    let v = triangle.vertices;
    let inside = v.map(|p| p.z >= z_near);

    match inside.iter().filter(|&&i| i).count() {
        3 => ClippedTriangles::one(*triangle),
        1 => {
            let Some(k) = inside.iter().position(|&i| i) else {
                return ClippedTriangles::none();
            };
            // Outside vertices in cyclic order after the inside one
            let a = v[k];
            let b = v[(k + 1) % 3];
            let c = v[(k + 2) % 3];

            match (intersect_near(a, b, z_near), intersect_near(a, c, z_near)) {
                (Some(pb), Some(pc)) => ClippedTriangles::one(Triangle::new(a, pb, pc)),
                _ => ClippedTriangles::none(),
            }
        }
        2 => {
            let Some(k) = inside.iter().position(|&i| !i) else {
                return ClippedTriangles::none();
            };
            // Cyclic order is out -> after -> before; the kept quad is
            // after, before, p(before), p(after).
            let out = v[k];
            let after = v[(k + 1) % 3];
            let before = v[(k + 2) % 3];

            match (
                intersect_near(before, out, z_near),
                intersect_near(after, out, z_near),
            ) {
                (Some(p_before), Some(p_after)) => ClippedTriangles::two(
                    Triangle::new(before, p_before, after),
                    Triangle::new(p_before, p_after, after),
                ),
                _ => ClippedTriangles::none(),
            }
        }
        _ => ClippedTriangles::none(),
    }
}
