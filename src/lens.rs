#![warn(missing_docs)]
//! Thin lens types
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use uom::si::f64::Length;

/// Type of a thin lens.
///
/// A convex lens has a positive signed focal length and focusses parallel light into the focal point
/// on the transmission side. A concave lens has a negative signed focal length: parallel light leaves
/// the lens as if it diverged from the focal point on the incidence side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum LensKind {
    /// focussing lens
    #[strum(serialize = "convex")]
    Convex,
    /// defocussing lens
    #[strum(serialize = "concave")]
    Concave,
}

impl LensKind {
    /// Returns the signed focal length for the given (unsigned) focal length.
    ///
    /// The sign is positive for [`LensKind::Convex`] and negative for [`LensKind::Concave`].
    #[must_use]
    pub fn signed_focal_length(self, focal_length: Length) -> Length {
        match self {
            Self::Convex => focal_length.abs(),
            Self::Concave => -focal_length.abs(),
        }
    }
    /// Returns `true` if an object at `distance_factor` × focal length in front of this lens forms a
    /// virtual image.
    ///
    /// This is always the case for a concave lens and for a convex lens with the object inside the
    /// focal length.
    #[must_use]
    pub fn forms_virtual_image(self, distance_factor: f64) -> bool {
        match self {
            Self::Concave => true,
            Self::Convex => distance_factor < 1.0,
        }
    }
}

impl std::fmt::Display for LensKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::Convex => "convex",
            Self::Concave => "concave",
        };
        write!(f, "{msg}")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::millimeter;
    use std::str::FromStr;
    #[test]
    fn signed_focal_length() {
        assert_eq!(
            LensKind::Convex.signed_focal_length(millimeter!(100.0)),
            millimeter!(100.0)
        );
        assert_eq!(
            LensKind::Concave.signed_focal_length(millimeter!(100.0)),
            millimeter!(-100.0)
        );
    }
    #[test]
    fn forms_virtual_image() {
        assert!(LensKind::Concave.forms_virtual_image(2.0));
        assert!(LensKind::Concave.forms_virtual_image(0.5));
        assert!(LensKind::Convex.forms_virtual_image(0.7));
        assert!(!LensKind::Convex.forms_virtual_image(1.5));
        assert!(!LensKind::Convex.forms_virtual_image(1.0));
    }
    #[test]
    fn display() {
        assert_eq!(format!("{}", LensKind::Convex), "convex");
        assert_eq!(format!("{}", LensKind::Concave), "concave");
    }
    #[test]
    fn from_str() {
        assert_eq!(LensKind::from_str("convex").unwrap(), LensKind::Convex);
        assert_eq!(LensKind::from_str("Concave").unwrap(), LensKind::Concave);
        assert!(LensKind::from_str("mirror").is_err());
    }
    #[test]
    fn serde() {
        let json = serde_json::to_string(&LensKind::Concave).unwrap();
        assert_eq!(json, "\"concave\"");
        let kind: LensKind = serde_json::from_str("\"convex\"").unwrap();
        assert_eq!(kind, LensKind::Convex);
    }
}
