#![warn(missing_docs)]
//! Vocabulary labelling
//!
//! The learner drags three terms onto three drop zones of the diagram. Each zone is keyed by the term
//! that belongs there, so a placement is correct if the placed term equals the zone key.
use std::collections::BTreeMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator};
use uom::si::f64::Length;

use crate::utils::uom_macros::world_units;

/// The three vocabulary terms. Each of them also names its drop zone.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
)]
pub enum VocabularyTerm {
    /// the optical axis
    #[strum(serialize = "Principal axis")]
    #[serde(rename = "Principal axis")]
    PrincipalAxis,
    /// the focal point on the transmission side
    #[strum(serialize = "Focal point")]
    #[serde(rename = "Focal point")]
    FocalPoint,
    /// distance between lens and focal point
    #[strum(serialize = "Focal length")]
    #[serde(rename = "Focal length")]
    FocalLength,
}
impl VocabularyTerm {
    /// The term as shown to the learner.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrincipalAxis => "Principal axis",
            Self::FocalPoint => "Focal point",
            Self::FocalLength => "Focal length",
        }
    }
}
impl std::fmt::Display for VocabularyTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A drop zone on the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropZone {
    /// the term belonging into this zone
    pub key: VocabularyTerm,
    /// hint shown inside the zone
    pub hint: &'static str,
    /// world position the zone is attached to
    pub anchor: Point2<f64>,
}

/// The drop zones for the given focal length.
#[must_use]
pub fn drop_zones(focal_length: Length) -> Vec<DropZone> {
    let f = world_units(focal_length).abs();
    VocabularyTerm::iter()
        .map(|key| {
            let (hint, anchor) = match key {
                VocabularyTerm::PrincipalAxis => (
                    "Drop label near principal axis marker",
                    Point2::new(-220.0, 20.0),
                ),
                VocabularyTerm::FocalPoint => (
                    "Drop label near right focal point marker",
                    Point2::new(f, 20.0),
                ),
                VocabularyTerm::FocalLength => (
                    "Drop label on distance between lens and F",
                    Point2::new(f / 2.0, -30.0),
                ),
            };
            DropZone { key, hint, anchor }
        })
        .collect()
}

/// Terms placed into the drop zones by the learner.
///
/// The placed term is kept as the raw string delivered by the drag & drop source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placements(BTreeMap<VocabularyTerm, String>);

impl Placements {
    /// Place `term` into `zone`, replacing a previous placement.
    pub fn place(&mut self, zone: VocabularyTerm, term: &str) {
        self.0.insert(zone, term.to_owned());
    }
    /// The term placed into `zone`, if any.
    #[must_use]
    pub fn get(&self, zone: VocabularyTerm) -> Option<&str> {
        self.0.get(&zone).map(String::as_str)
    }
    /// Returns `true` if every zone holds its matching term.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        VocabularyTerm::iter().all(|zone| self.get(zone) == Some(zone.as_str()))
    }
    /// Remove all placements.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}
