//! Wavefront OBJ loader for vertex positions and faces
use std::fs;
use std::path::Path;

use log::info;
use nalgebra::Vector3;
use nom::{
    bytes::complete::tag,
    character::complete::{char, i64 as index, space0, space1},
    combinator::opt,
    multi::many1,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::MeshError;
use crate::geometry::{Face, Mesh};

/// Read and parse an OBJ file.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let mesh = parse_obj(&text)?;
    info!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertices().len(),
        mesh.faces().len()
    );
    Ok(mesh)
}

/// Parse OBJ text.
///
/// Only `v` and `f` records are used; every other record is ignored. Face
/// corners may carry texture and normal references (`1/2/3`, `1//3`), which
/// are dropped. Negative indices count back from the latest vertex, and
/// polygons with more than three corners are split into a triangle fan.
pub fn parse_obj(input: &str) -> Result<Mesh, MeshError> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    for (line_index, raw) in input.lines().enumerate() {
        let line_number = line_index + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        let parse_error = |message: String| MeshError::Parse {
            line: line_number,
            message,
        };

        match line.split_whitespace().next() {
            Some("v") => {
                let (x, y, z) = finish(parse_vertex(line)).map_err(parse_error)?;
                vertices.push(Vector3::new(x, y, z));
            }
            Some("f") => {
                let corners = finish(parse_face(line)).map_err(parse_error)?;
                if corners.len() < 3 {
                    return Err(parse_error(format!(
                        "face needs at least 3 vertices, found {}",
                        corners.len()
                    )));
                }
                let resolved = corners
                    .iter()
                    .map(|&corner| resolve_index(corner, vertices.len()))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(parse_error)?;
                for i in 1..resolved.len() - 1 {
                    faces.push(Face::new(resolved[0], resolved[i], resolved[i + 1]));
                }
            }
            _ => {}
        }
    }

    Mesh::new(vertices, faces)
}

fn finish<T>(result: IResult<&str, T>) -> Result<T, String> {
    match result {
        Ok((remaining, value)) if remaining.trim().is_empty() => Ok(value),
        Ok((remaining, _)) => Err(format!("unexpected trailing input {:?}", remaining)),
        Err(e) => Err(format!("{:?}", e)),
    }
}

fn resolve_index(corner: i64, vertex_count: usize) -> Result<u32, String> {
    let resolved = if corner < 0 {
        vertex_count as i64 + corner + 1
    } else {
        corner
    };
    if resolved < 1 || resolved > u32::MAX as i64 {
        return Err(format!("invalid vertex index {}", corner));
    }
    Ok(resolved as u32)
}

fn parse_vertex(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = preceded(space1, float)(input)?;
    let (input, y) = preceded(space1, float)(input)?;
    let (input, z) = preceded(space1, float)(input)?;
    // optional homogeneous w, unused
    let (input, _) = opt(preceded(space1, float))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, (x, y, z)))
}

fn parse_face(input: &str) -> IResult<&str, Vec<i64>> {
    let (input, _) = tag("f")(input)?;
    let (input, corners) = many1(preceded(space1, parse_corner))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, corners))
}

fn parse_corner(input: &str) -> IResult<&str, i64> {
    let (input, position) = index(input)?;
    let (input, _) = opt(preceded(char('/'), opt(index)))(input)?;
    let (input, _) = opt(preceded(char('/'), opt(index)))(input)?;
    Ok((input, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
# a single triangle
o tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vn 0 0 1
f 1 2 3
";

    #[test]
    fn test_parse_plain_faces() {
        let mesh = parse_obj(TRIANGLE).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.faces(), &[Face::new(1, 2, 3)]);
        assert_eq!(mesh.vertices()[1], Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_parse_slashed_corners() {
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1/1/1 2/2/1 3/3/1\nf 2//1 4//1 3//1\nf 1/4 2/5 4/6\n";
        let mesh = parse_obj(input).unwrap();
        assert_eq!(
            mesh.faces(),
            &[Face::new(1, 2, 3), Face::new(2, 4, 3), Face::new(1, 2, 4)]
        );
    }

    #[test]
    fn test_quad_is_fanned() {
        let input = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = parse_obj(input).unwrap();
        assert_eq!(mesh.faces(), &[Face::new(1, 2, 3), Face::new(1, 3, 4)]);
    }

    #[test]
    fn test_negative_indices() {
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = parse_obj(input).unwrap();
        assert_eq!(mesh.faces(), &[Face::new(1, 2, 3)]);
    }

    #[test]
    fn test_vertex_with_w_and_comment() {
        let mesh = parse_obj("v 1 2 3 1.0 # weighted\n").unwrap();
        assert_eq!(mesh.vertices()[0], Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_out_of_range_face_is_rejected() {
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n";
        assert!(matches!(
            parse_obj(input),
            Err(MeshError::FaceIndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_malformed_vertex_reports_line() {
        let input = "v 0 0 0\nv 1 oops 0\n";
        assert!(matches!(
            parse_obj(input),
            Err(MeshError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_zero_index_is_rejected() {
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        assert!(matches!(parse_obj(input), Err(MeshError::Parse { line: 4, .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = load_obj("/nonexistent/wire3d/mesh.obj");
        assert!(matches!(result, Err(MeshError::Io(_))));
    }
}
