#![warn(missing_docs)]
//! Snap targets
//!
//! A snap target is one of the discrete points a learner may pick as the second point of a ray. The set
//! contains the two true focal points, the optical centre and eight distractors.
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

use crate::{geometry::OBJECT_HEIGHT, utils::uom_macros::world_units};

/// Name of the snap target located in the optical centre.
pub const OPTICAL_CENTRE: &str = "Optical centre";

/// Category of a [`SnapTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapKind {
    /// a true focal point
    True,
    /// a point close to, but not at, a focal point
    Distractor,
    /// the optical centre
    Center,
}

/// A candidate target point for the second click of a ray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapTarget {
    /// name of the target, e.g. `+F` or `-1.3F`
    pub name: String,
    /// abscissa in world units
    pub x: f64,
    /// height in world units
    pub y: f64,
    /// category of the target
    pub kind: SnapKind,
}
impl SnapTarget {
    /// Creates a new [`SnapTarget`].
    #[must_use]
    pub fn new(name: &str, x: f64, y: f64, kind: SnapKind) -> Self {
        Self {
            name: name.to_owned(),
            x,
            y,
            kind,
        }
    }
    /// Position of the target in world coordinates.
    #[must_use]
    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// Generate the complete set of snap targets for the given focal length.
///
/// The result always contains 11 targets in a fixed order. All positions scale linearly with the focal
/// length. A new focal length requires a completely new set.
#[must_use]
pub fn generate_snap_targets(focal_length: Length) -> Vec<SnapTarget> {
    let f = world_units(focal_length).abs();
    let h = 0.3 * OBJECT_HEIGHT;
    vec![
        SnapTarget::new("+F", f, 0.0, SnapKind::True),
        SnapTarget::new("-F", -f, 0.0, SnapKind::True),
        SnapTarget::new("+0.7F", 0.7 * f, 0.0, SnapKind::Distractor),
        SnapTarget::new("-0.7F", -0.7 * f, 0.0, SnapKind::Distractor),
        SnapTarget::new("+1.3F", 1.3 * f, 0.0, SnapKind::Distractor),
        SnapTarget::new("-1.3F", -1.3 * f, 0.0, SnapKind::Distractor),
        SnapTarget::new("+F,+0.3h", f, h, SnapKind::Distractor),
        SnapTarget::new("+F,-0.3h", f, -h, SnapKind::Distractor),
        SnapTarget::new("-F,+0.3h", -f, h, SnapKind::Distractor),
        SnapTarget::new("-F,-0.3h", -f, -h, SnapKind::Distractor),
        SnapTarget::new(OPTICAL_CENTRE, 0.0, 0.0, SnapKind::Center),
    ]
}

/// Find the snap target closest to the given world point.
///
/// Returns `None` if no target lies closer than `radius`.
#[must_use]
pub fn closest_snap<'a>(
    point: Point2<f64>,
    targets: &'a [SnapTarget],
    radius: f64,
) -> Option<&'a SnapTarget> {
    targets
        .iter()
        .map(|t| (t, nalgebra::distance(&point, &t.position())))
        .filter(|(_, d)| *d < radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(t, _)| t)
}
