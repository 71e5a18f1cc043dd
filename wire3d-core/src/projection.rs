/// Perspective projection and device-to-pixel mapping
use crate::geometry::{Vec2, Vec3};

/// Divide by depth. A point on the eye plane (`z == 0`) maps to the origin;
/// that is a fallback, not a meaningful projection, so callers clip first.
pub fn project_perspective(p: Vec3) -> Vec2 {
    if p.z == 0.0 {
        return Vec2::zeros();
    }

    Vec2::new(p.x / p.z, p.y / p.z)
}

/// Map normalized device coordinates (`[-1, 1]` on both axes, Y up) to pixel
/// coordinates (origin top-left, Y down). Results are not clamped.
pub fn to_screen_space(p: Vec2, width: u32, height: u32) -> Vec2 {
    let nx = (p.x + 1.0) / 2.0;
    let ny = 1.0 - (p.y + 1.0) / 2.0;

    Vec2::new(nx * width as f32, ny * height as f32)
}

/// Project a view-space point straight to pixel coordinates
pub fn view_to_screen(p: Vec3, width: u32, height: u32) -> Vec2 {
    to_screen_space(project_perspective(p), width, height)
}

/// Truncate pixel coordinates to integers (`as` semantics: toward zero, saturating)
pub fn to_pixel(p: Vec2) -> (i32, i32) {
    (p.x as i32, p.y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_divides_by_depth() {
        let p = project_perspective(Vec3::new(2.0, -4.0, 4.0));
        assert_eq!(p, Vec2::new(0.5, -1.0));
    }

    #[test]
    fn test_project_eye_plane_fallback() {
        assert_eq!(project_perspective(Vec3::new(3.0, 5.0, 0.0)), Vec2::zeros());
        assert_eq!(project_perspective(Vec3::new(3.0, 5.0, -0.0)), Vec2::zeros());
    }

    #[test]
    fn test_screen_space_corners() {
        assert_eq!(to_screen_space(Vec2::new(-1.0, -1.0), 600, 600), Vec2::new(0.0, 600.0));
        assert_eq!(to_screen_space(Vec2::new(1.0, 1.0), 600, 600), Vec2::new(600.0, 0.0));
        assert_eq!(to_screen_space(Vec2::new(0.0, 0.0), 800, 400), Vec2::new(400.0, 200.0));
    }

    #[test]
    fn test_screen_space_is_unclamped() {
        let p = to_screen_space(Vec2::new(3.0, -3.0), 100, 100);
        assert_eq!(p, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_to_pixel_truncates() {
        assert_eq!(to_pixel(Vec2::new(2.9, 599.99)), (2, 599));
        assert_eq!(to_pixel(Vec2::new(-0.5, -1.5)), (0, -1));
    }
}
