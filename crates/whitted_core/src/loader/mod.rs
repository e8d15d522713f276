//! Scene and mesh file loading.
//!
//! Both formats are whitespace-separated token streams; see [`scene_file`]
//! and [`mesh_file`] for the record layouts. Every parse error carries the
//! line it was found on.
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::loader::load_scene;
//!
//! let scene = load_scene("scenes/spheres.txt")?;
//! println!("{} surfaces", scene.num_surfaces());
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::mesh::MeshError;

pub mod mesh_file;
pub mod scene_file;
mod tokens;

pub use mesh_file::{load_mesh, parse_mesh};
pub use scene_file::{load_scene, parse_scene};

/// Errors that can occur while loading scene or mesh files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: unexpected end of file, expected {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },

    #[error("line {line}: invalid {expected} {token:?}")]
    InvalidNumber {
        line: usize,
        token: String,
        expected: &'static str,
    },

    #[error("line {line}: expected record {expected}, found {found:?}")]
    UnexpectedTag {
        line: usize,
        found: String,
        expected: &'static str,
    },

    #[error("line {line}: unknown light type {kind} (0 = directional, 1 = point)")]
    UnknownLightType { line: usize, kind: i64 },

    #[error("line {line}: scale must be finite and non-zero, got {scale}")]
    DegenerateScale { line: usize, scale: f64 },

    #[error("line {line}: face index {index} out of range (1..={vertex_count})")]
    FaceIndexOutOfRange {
        line: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),

    #[error("in mesh {}: {source}", .path.display())]
    Mesh {
        path: PathBuf,
        #[source]
        source: Box<LoadError>,
    },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

fn read_file(path: &Path) -> LoadResult<String> {
    log::debug!("Reading {}", path.display());
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
