//! Exact boundaries for the parametric shapes.
//!
//! All vertices are in object-local coordinates: the object's center is the
//! origin, so placing an object only ever moves its center.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::{DVec2, DVec3};

use super::symbols::ShapeKind;
use crate::types::Geometry;

/// Ratio of a five-point star's inner radius to its outer radius.
pub const STAR_INNER_RATIO: f64 = 0.382;
const STAR_POINTS: usize = 5;

pub const DEFAULT_SIZE: f64 = 1.0;

pub struct GeometryBuilder;

impl GeometryBuilder {
    /// Build the geometry for `kind` at `size`. Negative or non-finite sizes
    /// degenerate to zero.
    pub fn shape(kind: ShapeKind, size: f64) -> Geometry {
        let size = if size.is_finite() { size.max(0.0) } else { 0.0 };
        match kind {
            ShapeKind::Circle => Geometry::Circle { radius: size },
            ShapeKind::Square => Geometry::Square { side_length: size },
            ShapeKind::Rectangle => Geometry::Rectangle {
                width: size * 2.0,
                height: size,
            },
            ShapeKind::Triangle => Geometry::Polygon {
                vertices: Self::triangle(size),
            },
            ShapeKind::Star => Geometry::Polygon {
                vertices: Self::star(size),
            },
        }
    }

    pub fn text(content: &str, scale: f64) -> Geometry {
        Geometry::Text {
            content: content.to_string(),
            scale,
        }
    }

    /// Equilateral triangle with circumradius `size`, apex up.
    ///
    /// Vertices are placed around the circumcenter, which is the point that
    /// scaling and placement act on. A bounding-box anchored layout would use
    /// `(0, 0.25 * size)` instead, so the same position token places this
    /// triangle a quarter size higher than a bounding-box placement would.
    pub fn triangle(size: f64) -> Vec<DVec3> {
        (0..3)
            .map(|i| {
                let angle = FRAC_PI_2 + i as f64 * TAU / 3.0;
                DVec3::new(size * angle.cos(), size * angle.sin(), 0.0)
            })
            .collect()
    }

    /// Ten-vertex five-point star.
    ///
    /// Angles are spaced evenly over a full turn starting at 0, radii alternate
    /// outer (`size`) and inner (`size * 0.382`), each angle is offset by −π/2,
    /// and the finished polygon is turned by π/5 about its center.
    ///
    /// The center is the construction origin, not the bounding-box center
    /// (which sits `0.0955 * size` below it before the turn), so every vertex
    /// stays at exactly `size` or `size * 0.382` from the placed position.
    pub fn star(size: f64) -> Vec<DVec3> {
        let outer = size;
        let inner = size * STAR_INNER_RATIO;
        let count = STAR_POINTS * 2;
        let correction = DVec2::from_angle(PI / 5.0);

        (0..count)
            .map(|i| {
                let angle = TAU * i as f64 / count as f64;
                let radius = if i % 2 == 0 { outer } else { inner };
                let raw = DVec2::new(
                    radius * (angle - FRAC_PI_2).cos(),
                    radius * (angle - FRAC_PI_2).sin(),
                );
                correction.rotate(raw).extend(0.0)
            })
            .collect()
    }

    /// Width and height of the geometry's bounding box. Text has no natural
    /// size until a renderer lays it out.
    pub fn extent(geometry: &Geometry) -> Option<DVec2> {
        match geometry {
            Geometry::Circle { radius } => Some(DVec2::splat(radius * 2.0)),
            Geometry::Square { side_length } => Some(DVec2::splat(*side_length)),
            Geometry::Rectangle { width, height } => Some(DVec2::new(*width, *height)),
            Geometry::Polygon { vertices } => {
                let (min, max) = vertices.iter().fold(
                    (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
                    |(min, max), v| (min.min(v.truncate()), max.max(v.truncate())),
                );
                if vertices.is_empty() {
                    Some(DVec2::ZERO)
                } else {
                    Some(max - min)
                }
            }
            Geometry::Text { .. } => None,
        }
    }
}
