/// Wavefront OBJ loader producing a validated, triangulated [`Mesh`]
///
/// Supported statements: `v`, `vt`, `vn` and `f`. Face corners may be
/// written as `v`, `v/vt`, `v//vn` or `v/vt/vn`; indices are 1-based, and
/// negative indices count back from the end of the list read so far.
/// Polygons are fan-triangulated around their first corner. Anything else
/// (`o`, `g`, `s`, `usemtl`, ...) is skipped.
use log::{debug, trace};
use nom::{
    character::complete::{char, i64 as integer, space1},
    combinator::opt,
    multi::many1,
    number::complete::float,
    sequence::{preceded, tuple},
    IResult,
};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::geometry::{fan_triangulate, Face, Mesh, MeshError, Vec2, Vec3};

#[derive(Debug)]
pub enum ObjError {
    Io(io::Error),
    Syntax { line: usize, message: String },
    FaceTooSmall { line: usize, corners: usize },
    BadIndex { line: usize, index: i64 },
    Mesh(MeshError),
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjError::Io(e) => write!(f, "failed to read OBJ file: {e}"),
            ObjError::Syntax { line, message } => write!(f, "line {line}: {message}"),
            ObjError::FaceTooSmall { line, corners } => {
                write!(f, "line {line}: face has {corners} corners, at least 3 needed")
            }
            ObjError::BadIndex { line, index } => write!(f, "line {line}: invalid index {index}"),
            ObjError::Mesh(e) => write!(f, "invalid mesh: {e}"),
        }
    }
}

impl std::error::Error for ObjError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ObjError::Io(e) => Some(e),
            ObjError::Mesh(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ObjError {
    fn from(e: io::Error) -> Self {
        ObjError::Io(e)
    }
}

impl From<MeshError> for ObjError {
    fn from(e: MeshError) -> Self {
        ObjError::Mesh(e)
    }
}

/// One face corner as written in the file, before index correction
#[derive(Debug, Clone, Copy, PartialEq)]
struct Corner {
    v: i64,
    vt: Option<i64>,
    vn: Option<i64>,
}

fn vec3(input: &str) -> IResult<&str, Vec3> {
    let (input, (x, y, z)) = tuple((
        preceded(space1, float),
        preceded(space1, float),
        preceded(space1, float),
    ))(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

/// `v x y z [w]`; the weight is accepted and dropped
fn vertex(input: &str) -> IResult<&str, Vec3> {
    let (input, v) = vec3(input)?;
    let (input, _) = opt(preceded(space1, float))(input)?;
    Ok((input, v))
}

/// `vt u [v [w]]`
fn tex_coord(input: &str) -> IResult<&str, Vec2> {
    let (input, u) = preceded(space1, float)(input)?;
    let (input, v) = opt(preceded(space1, float))(input)?;
    let (input, _) = opt(preceded(space1, float))(input)?;
    Ok((input, Vec2::new(u, v.unwrap_or(0.0))))
}

fn corner(input: &str) -> IResult<&str, Corner> {
    let (input, v) = integer(input)?;
    let (input, vt) = opt(preceded(char('/'), opt(integer)))(input)?;
    let (input, vn) = opt(preceded(char('/'), integer))(input)?;
    Ok((
        input,
        Corner {
            v,
            vt: vt.flatten(),
            vn,
        },
    ))
}

fn face(input: &str) -> IResult<&str, Vec<Corner>> {
    many1(preceded(space1, corner))(input)
}

/// Run `parser` over the arguments of a statement, allowing only trailing
/// whitespace or a comment after it
fn statement<'a, T>(
    line: usize,
    keyword: &str,
    args: &'a str,
    mut parser: impl FnMut(&'a str) -> IResult<&'a str, T>,
) -> Result<T, ObjError> {
    let syntax = || ObjError::Syntax {
        line,
        message: format!("malformed `{keyword}` statement"),
    };

    let (rest, value) = parser(args).map_err(|_| syntax())?;
    let rest = rest.trim_start();
    if rest.is_empty() || rest.starts_with('#') {
        Ok(value)
    } else {
        Err(syntax())
    }
}

/// Turn a 1-based or negative (relative) OBJ index into a 0-based one
fn resolve(index: i64, len: usize, line: usize) -> Result<usize, ObjError> {
    let resolved = match index {
        i if i > 0 => i - 1,
        i if i < 0 => len as i64 + i,
        _ => -1,
    };
    usize::try_from(resolved).map_err(|_| ObjError::BadIndex { line, index })
}

/// Parse OBJ text into a mesh
pub fn parse_obj(text: &str) -> Result<Mesh, ObjError> {
    let mut vertices = Vec::new();
    let mut uvs = Vec::new();
    let mut normals = Vec::new();
    let mut faces = Vec::new();
    let mut skipped = 0usize;

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw.trim_start();
        let Some(keyword) = trimmed.split_whitespace().next() else {
            continue;
        };
        if keyword.starts_with('#') {
            continue;
        }
        let args = &trimmed[keyword.len()..];

        match keyword {
            "v" => vertices.push(statement(line, keyword, args, vertex)?),
            "vt" => uvs.push(statement(line, keyword, args, tex_coord)?),
            "vn" => normals.push(statement(line, keyword, args, vec3)?),
            "f" => {
                let corners = statement(line, keyword, args, face)?;
                if corners.len() < 3 {
                    return Err(ObjError::FaceTooSmall {
                        line,
                        corners: corners.len(),
                    });
                }

                let mut resolved = Vec::with_capacity(corners.len());
                for c in &corners {
                    let v = resolve(c.v, vertices.len(), line)?;
                    let vt = c.vt.map(|t| resolve(t, uvs.len(), line)).transpose()?;
                    let vn = c.vn.map(|n| resolve(n, normals.len(), line)).transpose()?;
                    resolved.push((v, vt, vn));
                }

                faces.extend(fan_triangulate(&resolved).map(|[a, b, c]| {
                    Face::new(a.0, b.0, c.0)
                        .with_uvs([a.1, b.1, c.1])
                        .with_normals([a.2, b.2, c.2])
                }));
            }
            other => {
                trace!("line {line}: skipping `{other}` statement");
                skipped += 1;
            }
        }
    }

    debug!(
        "parsed OBJ: {} vertices, {} uvs, {} normals, {} faces ({} statements skipped)",
        vertices.len(),
        uvs.len(),
        normals.len(),
        faces.len(),
        skipped
    );

    Ok(Mesh::new(vertices, uvs, normals, faces)?)
}

/// Read and parse an OBJ file
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, ObjError> {
    let path = path.as_ref();
    debug!("loading {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_obj(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Attribute;

    const TRIANGLE: &str = "\
# a single triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";

    #[test]
    fn test_parse_triangle() {
        let mesh = parse_obj(TRIANGLE).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.vertices()[1], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_corner_forms() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
f 1//1 2//1 3//1
f 1/1 2/2 3/3
";
        let mesh = parse_obj(text).unwrap();
        let faces = mesh.faces();
        assert_eq!(faces.len(), 3);

        assert_eq!(faces[0].vertices, [0, 1, 2]);
        assert_eq!(faces[0].uvs, [Some(0), Some(1), Some(2)]);
        assert_eq!(faces[0].normals, [Some(0); 3]);

        assert_eq!(faces[1].uvs, [None; 3]);
        assert_eq!(faces[1].normals, [Some(0); 3]);

        assert_eq!(faces[2].uvs, [Some(0), Some(1), Some(2)]);
        assert_eq!(faces[2].normals, [None; 3]);
    }

    #[test]
    fn test_quad_is_fan_triangulated() {
        let text = "\
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
v 0 2 0
f 1 2 3 4 5
";
        let mesh = parse_obj(text).unwrap();
        let faces: Vec<_> = mesh.faces().iter().map(|f| f.vertices).collect();
        assert_eq!(faces, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
f -3 -2 -1
v 5 5 5
f 1 -1 -2
";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.faces()[0].vertices, [0, 1, 2]);
        assert_eq!(mesh.faces()[1].vertices, [0, 3, 2]);
    }

    #[test]
    fn test_ignores_unknown_statements_and_comments() {
        let text = "\
mtllib scene.mtl
o Triangle
v 0 0 0 1.0
v 1 0 0   # trailing comment
v 0 1 0

usemtl red
s off
f 1 2 3
";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.faces().len(), 1);
    }

    #[test]
    fn test_scientific_and_signed_floats() {
        let mesh = parse_obj("v -1.5e2 +2 .25\n").unwrap();
        assert_eq!(mesh.vertices()[0], Vec3::new(-150.0, 2.0, 0.25));
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = parse_obj("v 0 0 0\nv 1 zero 0\n").unwrap_err();
        match err {
            ObjError::Syntax { line, ref message } => {
                assert_eq!(line, 2);
                assert!(message.contains("`v`"));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            parse_obj("v 0 0 0 0 9\n"),
            Err(ObjError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_degenerate_face_is_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, ObjError::FaceTooSmall { line: 3, corners: 2 }));
    }

    #[test]
    fn test_zero_index_is_rejected() {
        let err = parse_obj("v 0 0 0\nf 0 1 1\n").unwrap_err();
        assert!(matches!(err, ObjError::BadIndex { line: 2, index: 0 }));

        let err = parse_obj("v 0 0 0\nf -2 1 1\n").unwrap_err();
        assert!(matches!(err, ObjError::BadIndex { line: 2, index: -2 }));
    }

    #[test]
    fn test_out_of_bounds_index_is_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            ObjError::Mesh(MeshError::IndexOutOfBounds {
                face: 0,
                attribute: Attribute::Vertex,
                index: 2,
                len: 2,
            })
        ));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_obj("/nonexistent/wire3d/mesh.obj").unwrap_err();
        assert!(matches!(err, ObjError::Io(_)));
    }
}
