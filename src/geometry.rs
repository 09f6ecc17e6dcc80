#![warn(missing_docs)]
//! Geometry kernel of the ray diagram.
//!
//! World coordinates use the optical axis as x axis (light travels towards +x) and the transverse
//! height as y axis. The thin lens sits in the plane x = 0 with its optical centre at the origin.
//! One world unit corresponds to one millimeter.
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

use crate::utils::uom_macros::world_units;

/// Height of the object arrow in world units.
pub const OBJECT_HEIGHT: f64 = 120.0;
/// Abscissa up to which rays are drawn on the transmission side.
pub const FAR_BOUNDARY: f64 = 430.0;
/// Abscissa up to which backward extensions are drawn on the incidence side.
pub const NEAR_BOUNDARY: f64 = -430.0;

/// A drawable straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// start point
    pub a: Point2<f64>,
    /// end point
    pub b: Point2<f64>,
}
impl Segment {
    /// Creates a new [`Segment`] from `a` to `b`.
    #[must_use]
    pub const fn new(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self { a, b }
    }
    /// Slope dy/dx of the segment. Vertical segments yield an infinite slope.
    #[must_use]
    pub fn slope(&self) -> f64 {
        (self.b.y - self.a.y) / (self.b.x - self.a.x)
    }
    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.b - self.a).norm()
    }
}

/// Affine mapping between world coordinates and display (canvas) coordinates.
///
/// The world origin is mapped onto the display midpoint and the y axis is flipped, since display
/// coordinates grow downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f64,
    height: f64,
    scale: f64,
}
impl Viewport {
    /// Creates a new [`Viewport`] of the given display size and scale (display pixels per world unit).
    #[must_use]
    pub const fn new(width: f64, height: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }
    /// Display width.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }
    /// Display height.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
    /// Maps a point in world coordinates onto the display.
    #[must_use]
    pub fn world_to_display(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(
            self.scale.mul_add(p.x, self.width / 2.0),
            self.scale.mul_add(-p.y, self.height / 2.0),
        )
    }
    /// Maps a display point back into world coordinates.
    #[must_use]
    pub fn display_to_world(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(
            (p.x - self.width / 2.0) / self.scale,
            (self.height / 2.0 - p.y) / self.scale,
        )
    }
    /// Returns `true` if the given display point lies on the display.
    #[must_use]
    pub fn contains(&self, p: Point2<f64>) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}
impl Default for Viewport {
    fn default() -> Self {
        Self::new(860.0, 500.0, 1.0)
    }
}

/// Tip of the object arrow for an object placed `distance_factor` focal lengths in front of the lens.
#[must_use]
pub fn object_tip(distance_factor: f64, focal_length: Length) -> Point2<f64> {
    Point2::new(-distance_factor * world_units(focal_length), OBJECT_HEIGHT)
}
/// Optical centre of the lens.
#[must_use]
pub fn optical_center() -> Point2<f64> {
    Point2::origin()
}
/// Point on the lens plane at the height of `p`.
///
/// This is the point where a ray starting at `p` parallel to the optical axis hits the lens.
#[must_use]
pub fn lens_point(p: Point2<f64>) -> Point2<f64> {
    Point2::new(0.0, p.y)
}
/// The two focal points `(+f, 0)` (transmission side) and `(-f, 0)` (incidence side).
#[must_use]
pub fn focal_points(focal_length: Length) -> (Point2<f64>, Point2<f64>) {
    let f = world_units(focal_length).abs();
    (Point2::new(f, 0.0), Point2::new(-f, 0.0))
}
/// Evaluates the straight line through `p` and `q` at abscissa `x`.
///
/// `p` and `q` must not lie on a common vertical line.
#[must_use]
pub fn line_y_at(p: Point2<f64>, q: Point2<f64>, x: f64) -> f64 {
    let dir: Vector2<f64> = q - p;
    (dir.y / dir.x).mul_add(x - p.x, p.y)
}
