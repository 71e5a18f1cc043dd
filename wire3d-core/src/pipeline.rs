/// Per-frame wireframe pipeline: transform, clip, project, rasterize
use log::trace;

use crate::clip::clip_against_near;
use crate::config::RenderConfig;
use crate::geometry::{Mesh, Triangle, Vec3};
use crate::projection::{to_pixel, view_to_screen};
use crate::raster::PixelBuffer;
use crate::transform::{to_view_space, FrameParams};

/// What one call to [`render_frame`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces: usize,
    /// Faces entirely behind the near plane
    pub faces_culled: usize,
    pub triangles_drawn: usize,
    pub points_drawn: usize,
}

/// View-space position of every mesh vertex, in mesh order
pub fn transform_vertices(mesh: &Mesh, params: &FrameParams) -> Vec<Vec3> {
    mesh.vertices()
        .iter()
        .map(|&v| to_view_space(v, params))
        .collect()
}

/// Draw one frame of `mesh` into `buffer`.
///
/// The buffer is cleared to the configured background first. Projection
/// maps onto the buffer's own width and height.
pub fn render_frame(
    mesh: &Mesh,
    params: &FrameParams,
    config: &RenderConfig,
    buffer: &mut PixelBuffer<'_>,
) -> FrameStats {
    let mut stats = FrameStats::default();
    let (width, height) = (buffer.width(), buffer.height());

    buffer.clear(config.background);

    let view = transform_vertices(mesh, params);

    for face in mesh.faces() {
        stats.faces += 1;

        let [a, b, c] = face.vertices;
        let triangle = Triangle::new(view[a], view[b], view[c]);
        let clipped = clip_against_near(&triangle, config.near_plane);
        if clipped.is_empty() {
            stats.faces_culled += 1;
            continue;
        }

        for piece in &clipped {
            let [p0, p1, p2] = piece
                .vertices
                .map(|v| to_pixel(view_to_screen(v, width, height)));
            buffer.draw_triangle_outline(p0, p1, p2, config.line_color);
            stats.triangles_drawn += 1;
        }
    }

    if config.draw_vertices {
        for &v in &view {
            let (x, y) = to_pixel(view_to_screen(v, width, height));
            buffer.draw_point(x, y, config.point_color, config.point_radius);
            stats.points_drawn += 1;
        }
    }

    trace!(
        "frame: {} faces, {} culled, {} triangles, {} points",
        stats.faces,
        stats.faces_culled,
        stats.triangles_drawn,
        stats.points_drawn
    );

    stats
}
