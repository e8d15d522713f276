//! Object-space bounding box used as a cheap reject for meshes.

use whitted_math::{DVec3, HomogeneousVector, RigidTransform};

use crate::intersect::{triangle_intersect, Facet};
use crate::material::{palette, Color};
use crate::node::{emit_line, LineSink};

/// The six faces as `(v0, v1, v2)` corner indices, each a parallelogram.
const FACES: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 1, 4],
    [0, 2, 4],
    [7, 5, 3],
    [7, 6, 3],
    [7, 6, 5],
];

/// Axis-aligned box stored as its eight corners.
///
/// Corner `i` takes the maximum x when bit 1 is set, the maximum y for bit 2
/// and the maximum z for bit 4.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    corners: [HomogeneousVector; 8],
    /// Wireframe color
    pub color: Color,
}

impl BoundingBox {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        let corners = std::array::from_fn(|i| {
            HomogeneousVector::point(
                if i & 1 != 0 { max.x } else { min.x },
                if i & 2 != 0 { max.y } else { min.y },
                if i & 4 != 0 { max.z } else { min.z },
            )
        });
        Self {
            corners,
            color: palette::BLUE,
        }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a HomogeneousVector>) -> Option<Self> {
        let mut points = points.into_iter().map(HomogeneousVector::cartesian);
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self::new(min, max))
    }

    pub fn corners(&self) -> &[HomogeneousVector; 8] {
        &self.corners
    }

    pub fn min(&self) -> DVec3 {
        self.corners[0].cartesian()
    }

    pub fn max(&self) -> DVec3 {
        self.corners[7].cartesian()
    }

    /// Nearest non-negative ray parameter at which the ray crosses a face.
    pub fn intersect(&self, orig: HomogeneousVector, dir: HomogeneousVector) -> Option<f64> {
        FACES
            .iter()
            .filter_map(|&[a, b, c]| {
                triangle_intersect(
                    orig,
                    dir,
                    self.corners[a],
                    self.corners[b],
                    self.corners[c],
                    Facet::Parallelogram,
                )
            })
            .map(|hit| hit.t)
            .filter(|&t| t >= 0.0)
            .min_by(f64::total_cmp)
    }

    /// Emit the twelve edges.
    pub fn render(&self, transform: &RigidTransform, sink: &mut dyn LineSink) {
        for i in 0..8 {
            for bit in [1, 2, 4] {
                // each edge once, from the corner with the bit clear
                if i & bit == 0 {
                    emit_line(sink, transform, self.corners[i], self.corners[i | bit], self.color);
                }
            }
        }
    }
}
