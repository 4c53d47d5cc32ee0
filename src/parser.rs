//! Line-oriented mesh parser.
//!
//! Reads the vertex (`v x y z`) and face (`f i j k ...`) records of a
//! Wavefront-style text file. Every other record type is ignored, as are blank
//! lines and `#` comments.
//!
//! Face tokens may carry `/`-separated texture and normal indices; only the
//! leading vertex index is kept. A face token whose leading integer does not
//! parse is dropped from its face without failing the load. Malformed vertex
//! coordinates do fail the load.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::math::Vec4;
use crate::model::{BoundingBox, Face, Model};

const VERTEX_KEYWORD: &str = "v";
const FACE_KEYWORD: &str = "f";

/// Why a mesh could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("mesh file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read mesh: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: invalid vertex coordinate {token:?}")]
    InvalidVertex { line: usize, token: String },

    #[error("line {line}: vertex record needs 3 coordinates, found {found}")]
    MissingComponent { line: usize, found: usize },
}

/// Loads a mesh file into a fully built [`Model`] named after the file stem.
pub fn parse_model(path: impl AsRef<Path>) -> Result<Model, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(e),
    })?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let model = parse_reader(name, BufReader::new(file))?;
    info!(
        "loaded {} ({} vertices, {} faces)",
        path.display(),
        model.source_vertices().len(),
        model.faces().len()
    );
    Ok(model)
}

/// Parses mesh text held in memory.
pub fn parse_str(name: impl Into<String>, text: &str) -> Result<Model, LoadError> {
    parse_reader(name, text.as_bytes())
}

/// Parses mesh text from any buffered reader.
pub fn parse_reader(name: impl Into<String>, reader: impl BufRead) -> Result<Model, LoadError> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    let mut bounds = BoundingBox::empty();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        match tokens.next() {
            Some(VERTEX_KEYWORD) => {
                let vertex = parse_vertex(tokens, line_number)?;
                bounds.include(vertex.to_vec3());
                vertices.push(vertex);
            }
            Some(FACE_KEYWORD) => faces.push(parse_face(tokens, line_number)),
            _ => {}
        }
    }

    Ok(Model::new(name, vertices, faces, bounds))
}

fn parse_vertex<'a>(
    tokens: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec4, LoadError> {
    let mut coords = [0.0f32; 3];
    let mut found = 0;
    for token in tokens.take(3) {
        coords[found] = token.parse().map_err(|_| LoadError::InvalidVertex {
            line,
            token: token.to_string(),
        })?;
        found += 1;
    }
    if found < 3 {
        return Err(LoadError::MissingComponent { line, found });
    }

    let [x, y, z] = coords;
    Ok(Vec4::point(x, y, z))
}

fn parse_face<'a>(tokens: impl Iterator<Item = &'a str>, line: usize) -> Face {
    let vertices = tokens
        .filter_map(|token| {
            let leading = token.split('/').next().unwrap_or_default();
            let index = leading.parse::<i32>().ok();
            if index.is_none() {
                debug!("line {line}: dropping face token {token:?}");
            }
            index
        })
        .collect();
    Face::new(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn parses_single_triangle() {
        let model = parse_str("tri", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(model.source_vertices().len(), 3);
        assert_eq!(model.faces().len(), 1);
        assert_eq!(model.faces()[0].vertices, vec![1, 2, 3]);
        assert_eq!(model.bounding_min(), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(model.bounding_max(), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(model.scale(), 2.0);
        assert_eq!(model.transformed_vertices().len(), 3);
    }

    #[test]
    fn single_point_mesh_guards_zero_extent() {
        let model = parse_str("point", "v 5 5 5\n").unwrap();
        assert_eq!(model.scale(), 2.0);
        assert!(model.scale().is_finite());
    }

    #[test]
    fn vertices_are_homogeneous_points() {
        let model = parse_str("p", "v 1.5 -2 3e1 0.5\n").unwrap();
        assert_eq!(model.source_vertices()[0], Vec4::new(1.5, -2.0, 30.0, 1.0));
    }

    #[test]
    fn skips_comments_blank_lines_and_unknown_records() {
        let text = "# header\n\n   \nvn 0 0 1\nvt 0.5 0.5\no cube\n  v 1 2 3  \ns off\n";
        let model = parse_str("m", text).unwrap();
        assert_eq!(model.source_vertices().len(), 1);
        assert!(model.faces().is_empty());
    }

    #[test]
    fn face_tokens_keep_leading_index_only() {
        let model = parse_str("m", "f 1/2/3 4//5 6/7 8\n").unwrap();
        assert_eq!(model.faces()[0].vertices, vec![1, 4, 6, 8]);
    }

    #[test]
    fn unparsable_face_tokens_are_dropped() {
        let model = parse_str("m", "f 1 x/2 /3 2 3\nf\n").unwrap();
        assert_eq!(model.faces()[0].vertices, vec![1, 2, 3]);
        assert!(model.faces()[1].is_empty());
    }

    #[test]
    fn out_of_range_face_index_is_kept_for_draw_time() {
        let model = parse_str("m", "v 0 0 0\nv 1 0 0\nf 1 2 3\nf 1 2\n").unwrap();
        assert_eq!(model.faces().len(), 2);
        assert_eq!(model.faces()[0].resolve(2, 2), None);
        assert_eq!(model.faces()[1].resolve(1, 2), Some(1));
    }

    #[test]
    fn malformed_vertex_is_an_error() {
        let err = parse_str("m", "v 0 0 0\nv 1 abc 0\n").unwrap_err();
        match err {
            LoadError::InvalidVertex { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn comma_decimal_separator_is_rejected() {
        assert!(matches!(
            parse_str("m", "v 0,5 0 0\n"),
            Err(LoadError::InvalidVertex { .. })
        ));
    }

    #[test]
    fn short_vertex_record_is_an_error() {
        assert!(matches!(
            parse_str("m", "v 1 2\n"),
            Err(LoadError::MissingComponent { line: 1, found: 2 })
        ));
    }

    #[test]
    fn missing_file_reports_not_found() {
        let path = std::env::temp_dir().join("rasterkit-definitely-missing.obj");
        assert!(matches!(parse_model(&path), Err(LoadError::NotFound(p)) if p == path));
    }

    #[test]
    fn parse_model_names_model_after_file_stem() {
        let path = std::env::temp_dir().join(format!("rasterkit-stem-{}.obj", std::process::id()));
        std::fs::write(&path, "v 0 0 0\nv 2 0 0\n").unwrap();
        let model = parse_model(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(model.name(), format!("rasterkit-stem-{}", std::process::id()));
        assert_eq!(model.scale(), 1.0);
    }
}
