//! Whitted Core - Scene model and recursive ray tracing.
//!
//! This crate provides:
//!
//! - **Scene model**: [`Node`], [`Surface`] (sphere or triangle mesh), [`Light`], [`Scene`]
//! - **Intersection**: Möller-Trumbore triangle test, bounding boxes, unit spheres
//! - **Shading**: [`Scene::ray_trace`] with ambient, Phong, reflection and refraction
//! - **Loading**: scene and mesh text files
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::{load_scene, HomogeneousVector};
//!
//! let scene = load_scene("scenes/spheres.txt")?;
//! let color = scene.ray_trace(
//!     HomogeneousVector::point(0.0, 0.0, 8.0),
//!     HomogeneousVector::vector(0.0, 0.0, -1.0),
//!     1.0,
//!     4,
//! );
//! ```

pub mod bbox;
pub mod integrator;
pub mod intersect;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod node;
pub mod scene;
pub mod sphere;
pub mod surface;

// Re-export commonly used types
pub use bbox::BoundingBox;
pub use integrator::{reflect, refract};
pub use intersect::{triangle_intersect, Facet, SurfaceHit, TriangleHit};
pub use loader::{load_mesh, load_scene, LoadError, LoadResult};
pub use material::{palette, Color, Light, Material};
pub use mesh::{Mesh, MeshError};
pub use node::{Line, LineSink, Node, Transformable};
pub use scene::Scene;
pub use sphere::Sphere;
pub use surface::{Shape, Surface};
pub use whitted_math::HomogeneousVector;
