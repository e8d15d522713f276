//! Mesh file reader.
//!
//! A mesh file lists vertices, then faces, one record per line:
//!
//! ```text
//! v <x> <y> <z>
//! f <i> <j> <k>
//! ```
//!
//! Face indices are 1-based and may only refer to vertices already read.

use std::path::Path;

use whitted_math::HomogeneousVector;

use super::tokens::Tokens;
use super::{read_file, LoadError, LoadResult};
use crate::mesh::Mesh;

/// Read and parse a mesh file. Any failure is reported with the file's path.
pub fn load_mesh(path: impl AsRef<Path>) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let content = read_file(path)?;
    let mesh = parse_mesh(&content).map_err(|source| LoadError::Mesh {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    log::info!(
        "Loaded mesh {}: {} vertices, {} faces",
        path.display(),
        mesh.vertices().len(),
        mesh.faces().len()
    );
    Ok(mesh)
}

/// Parse mesh file contents.
pub fn parse_mesh(content: &str) -> LoadResult<Mesh> {
    let mut tokens = Tokens::new(content);
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    while let Some(tag) = tokens.peek() {
        match tag {
            "v" if faces.is_empty() => {
                tokens.expect_tag("v")?;
                let [x, y, z] = tokens.next_triple("vertex coordinate")?;
                vertices.push(HomogeneousVector::point(x, y, z));
            }
            "f" => {
                tokens.expect_tag("f")?;
                let line = tokens.line();
                let mut face = [0; 3];
                for slot in &mut face {
                    let index: usize = tokens.next_value("face index")?;
                    if index == 0 || index > vertices.len() {
                        return Err(LoadError::FaceIndexOutOfRange {
                            line,
                            index,
                            vertex_count: vertices.len(),
                        });
                    }
                    *slot = index - 1;
                }
                faces.push(face);
            }
            _ => {
                let expected = if faces.is_empty() { "v or f" } else { "f" };
                let (line, found) = tokens.next_token(expected)?;
                return Err(LoadError::UnexpectedTag {
                    line,
                    found: found.to_string(),
                    expected,
                });
            }
        }
    }

    Ok(Mesh::new(vertices, faces)?)
}
