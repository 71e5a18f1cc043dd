/// wire3d core library - CPU wireframe rendering
///
/// Stateless geometry pipeline and rasterizer: rigid transform, perspective
/// projection, near-plane clipping, and point/line/triangle-outline scan
/// conversion into a caller-owned pixel buffer. Also carries the mesh model,
/// an OBJ loader that produces it, and the render configuration.

pub mod clip;
pub mod config;
pub mod geometry;
pub mod obj;
pub mod pipeline;
pub mod projection;
pub mod raster;
pub mod transform;

// Re-export commonly used types
pub use clip::{clip_against_near, ClippedTriangles, NEAR_PLANE};
pub use config::{ConfigError, RenderConfig};
pub use geometry::{Face, Mesh, MeshError, Triangle, Vec2, Vec3};
pub use obj::{load_obj, parse_obj, ObjError};
pub use pipeline::{render_frame, FrameStats};
pub use projection::{project_perspective, to_screen_space};
pub use raster::{BufferError, Color, PixelBuffer};
pub use transform::{rotate_around_y, FrameParams};
