/// Geometry primitives and the mesh data model
use nalgebra::{Vector2, Vector3};
use std::fmt;

/// Point or direction in object, world or view space
pub type Vec3 = Vector3<f32>;

/// Projected or screen-space coordinate
pub type Vec2 = Vector2<f32>;

/// An ordered triangle. Vertex order encodes winding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unnormalized face normal; its direction follows the winding, so it
    /// doubles as a front/back test for callers doing their own culling
    pub fn normal(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(&(v2 - v0))
    }
}

/// A triangulated face referencing mesh attributes by 0-based index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub vertices: [usize; 3],
    pub uvs: [Option<usize>; 3],
    pub normals: [Option<usize>; 3],
}

impl Face {
    /// Face with positions only
    pub fn new(v0: usize, v1: usize, v2: usize) -> Self {
        Self {
            vertices: [v0, v1, v2],
            uvs: [None; 3],
            normals: [None; 3],
        }
    }

    pub fn with_uvs(mut self, uvs: [Option<usize>; 3]) -> Self {
        self.uvs = uvs;
        self
    }

    pub fn with_normals(mut self, normals: [Option<usize>; 3]) -> Self {
        self.normals = normals;
        self
    }
}

/// Which attribute list a face index points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Vertex,
    Uv,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Vertex => f.write_str("vertex"),
            Attribute::Uv => f.write_str("uv"),
            Attribute::Normal => f.write_str("normal"),
        }
    }
}

/// Rejected mesh input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    IndexOutOfBounds {
        face: usize,
        attribute: Attribute,
        index: usize,
        len: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::IndexOutOfBounds {
                face,
                attribute,
                index,
                len,
            } => write!(
                f,
                "face {face}: {attribute} index {index} out of bounds (have {len})"
            ),
        }
    }
}

impl std::error::Error for MeshError {}

/// A triangulated mesh.
///
/// Every index held by a face is within bounds of the matching attribute
/// list; [`Mesh::new`] is the only way to build one from parts, so the render
/// path can index without checks. The mesh is read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(
        vertices: Vec<Vec3>,
        uvs: Vec<Vec2>,
        normals: Vec<Vec3>,
        faces: Vec<Face>,
    ) -> Result<Self, MeshError> {
        for (i, face) in faces.iter().enumerate() {
            check_indices(i, Attribute::Vertex, face.vertices.map(Some), vertices.len())?;
            check_indices(i, Attribute::Uv, face.uvs, uvs.len())?;
            check_indices(i, Attribute::Normal, face.normals, normals.len())?;
        }

        Ok(Self {
            vertices,
            uvs,
            normals,
            faces,
        })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Axis-aligned cube centered on the origin, each quad split into two faces
    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent;
        let vertices = vec![
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
        ];

        let quads: [[usize; 4]; 6] = [
            [0, 1, 2, 3], // front
            [5, 4, 7, 6], // back
            [4, 0, 3, 7], // right
            [1, 5, 6, 2], // left
            [4, 5, 1, 0], // top
            [3, 2, 6, 7], // bottom
        ];

        let faces = quads
            .iter()
            .flat_map(|q| fan_triangulate(q))
            .map(|[a, b, c]| Face::new(a, b, c))
            .collect();

        Self {
            vertices,
            uvs: Vec::new(),
            normals: Vec::new(),
            faces,
        }
    }
}

fn check_indices(
    face: usize,
    attribute: Attribute,
    indices: [Option<usize>; 3],
    len: usize,
) -> Result<(), MeshError> {
    match indices.into_iter().flatten().find(|&index| index >= len) {
        Some(index) => Err(MeshError::IndexOutOfBounds {
            face,
            attribute,
            index,
            len,
        }),
        None => Ok(()),
    }
}

/// Split a polygon into `n - 2` triangles sharing its first element
pub fn fan_triangulate<T: Copy>(polygon: &[T]) -> impl Iterator<Item = [T; 3]> + '_ {
    let first = polygon.first().copied();
    polygon
        .windows(2)
        .skip(1)
        .filter_map(move |pair| first.map(|a| [a, pair[0], pair[1]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_is_triangulated() {
        let cube = Mesh::cube(0.5);
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.faces().len(), 12);
        assert!(cube.uvs().is_empty());
        assert!(cube.normals().is_empty());
        // Front quad {0, 1, 2, 3} fans into {0, 1, 2} and {0, 2, 3}
        assert_eq!(cube.faces()[0].vertices, [0, 1, 2]);
        assert_eq!(cube.faces()[1].vertices, [0, 2, 3]);
    }

    #[test]
    fn test_fan_triangulate() {
        let tris: Vec<_> = fan_triangulate(&[0, 1, 2, 3, 4]).collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);

        assert_eq!(fan_triangulate(&[7, 8, 9]).count(), 1);
        assert_eq!(fan_triangulate(&[7, 8]).count(), 0);
        assert_eq!(fan_triangulate::<usize>(&[]).count(), 0);
    }

    #[test]
    fn test_mesh_rejects_out_of_bounds_vertex() {
        let vertices = vec![Vec3::zeros(); 3];
        let result = Mesh::new(vertices, Vec::new(), Vec::new(), vec![Face::new(0, 1, 3)]);
        assert_eq!(
            result.unwrap_err(),
            MeshError::IndexOutOfBounds {
                face: 0,
                attribute: Attribute::Vertex,
                index: 3,
                len: 3,
            }
        );
    }

    #[test]
    fn test_mesh_checks_optional_indices() {
        let vertices = vec![Vec3::zeros(); 3];
        let uvs = vec![Vec2::zeros(); 2];

        let ok = Face::new(0, 1, 2).with_uvs([Some(0), None, Some(1)]);
        assert!(Mesh::new(vertices.clone(), uvs.clone(), Vec::new(), vec![ok]).is_ok());

        let bad = Face::new(0, 1, 2).with_normals([None, Some(0), None]);
        let err = Mesh::new(vertices, uvs, Vec::new(), vec![ok, bad]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfBounds {
                face: 1,
                attribute: Attribute::Normal,
                ..
            }
        ));
        assert_eq!(err.to_string(), "face 1: normal index 0 out of bounds (have 0)");
    }

    #[test]
    fn test_triangle_normal_follows_winding() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 1.0, 0.0);
        assert!(Triangle::new(a, b, c).normal().z > 0.0);
        assert!(Triangle::new(a, c, b).normal().z < 0.0);
    }
}
