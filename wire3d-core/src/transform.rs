/// Rigid per-vertex transform into view space
use crate::geometry::Vec3;

/// Rotate `p` about the vertical axis by `angle` radians
pub fn rotate_around_y(p: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(p.x * cos - p.z * sin, p.y, p.x * sin + p.z * cos)
}

/// Per-frame transform parameters supplied by the application loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Rotation about the Y axis, in radians
    pub angle: f32,
    /// Translation applied after rotation
    pub offset: Vec3,
}

impl FrameParams {
    pub fn new(angle: f32, offset: Vec3) -> Self {
        Self { angle, offset }
    }

    /// Advance the rotation by `delta` radians
    pub fn rotate(&mut self, delta: f32) {
        self.angle += delta;
    }

    /// Move the translation by the given deltas
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.offset += Vec3::new(dx, dy, dz);
    }
}

impl Default for FrameParams {
    fn default() -> Self {
        Self::new(0.0, Vec3::zeros())
    }
}

/// Object space to view space: rotate around Y, then translate
pub fn to_view_space(p: Vec3, params: &FrameParams) -> Vec3 {
    rotate_around_y(p, params.angle) + params.offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn sample_points() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, -3.0),
            Vec3::new(-1.5, 0.25, 4.0),
            Vec3::new(10.0, -7.0, 0.5),
        ]
    }

    #[test]
    fn test_rotation_preserves_xz_length() {
        for p in sample_points() {
            for step in -8..=8 {
                let angle = step as f32 * 0.7;
                let r = rotate_around_y(p, angle);
                let before = p.x * p.x + p.z * p.z;
                let after = r.x * r.x + r.z * r.z;
                assert!((before - after).abs() < 1e-4 * before.max(1.0));
                assert_eq!(r.y, p.y);
            }
        }
    }

    #[test]
    fn test_zero_angle_is_identity() {
        for p in sample_points() {
            assert_eq!(rotate_around_y(p, 0.0), p);
        }
    }

    #[test]
    fn test_quarter_turn_direction() {
        // x' = x cos - z sin, z' = x sin + z cos
        let r = rotate_around_y(Vec3::new(1.0, 0.0, 0.0), FRAC_PI_2);
        assert!(r.x.abs() < 1e-6);
        assert!((r.z - 1.0).abs() < 1e-6);

        let r = rotate_around_y(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        assert!((r.x + 1.0).abs() < 1e-6);
        assert!(r.z.abs() < 1e-6);

        let r = rotate_around_y(Vec3::new(1.0, 0.0, 0.0), PI);
        assert!((r.x + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_space_rotates_then_translates() {
        let params = FrameParams::new(FRAC_PI_2, Vec3::new(0.0, -1.0, 15.0));
        let v = to_view_space(Vec3::new(1.0, 0.0, 0.0), &params);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y + 1.0).abs() < 1e-6);
        assert!((v.z - 16.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_params_accumulate() {
        let mut params = FrameParams::default();
        params.rotate(0.1);
        params.rotate(0.2);
        params.translate(1.0, 0.0, 0.0);
        params.translate(0.0, -1.0, 15.0);
        assert!((params.angle - 0.3).abs() < 1e-6);
        assert_eq!(params.offset, Vec3::new(1.0, -1.0, 15.0));
    }
}
