#![warn(missing_docs)]
//! Thin lens image solver
//!
//! The solver applies the thin lens equation `1/v = 1/f - 1/u` with the object distance `u` measured
//! as a positive magnitude in front of the lens and the image distance `v` being positive for a real
//! image on the transmission side. The magnification is `m = v/u` and the image height follows as
//! `-m * h` for an object of height `h`.
use approx::relative_eq;
use log::warn;
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

use crate::{
    error::{TutorError, TutorResult},
    geometry::OBJECT_HEIGHT,
    lens::LensKind,
    millimeter,
    utils::uom_macros::world_units,
};

/// Image formed by a thin lens.
///
/// The solution is only valid for the lens parameters it was derived from. It has to be recomputed
/// after any change of the focal length or the level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSolution {
    /// abscissa of the image in world units (equals the image distance)
    pub x: f64,
    /// height of the image tip in world units
    pub y: f64,
    /// magnification `v/u`
    pub magnification: f64,
    /// signed image distance `v`
    pub image_distance: Length,
    /// object distance `u` (positive)
    pub object_distance: Length,
    /// signed focal length the solution was derived for
    pub focal_length: Length,
}
impl ImageSolution {
    /// Returns `true` for a virtual image (located on the incidence side).
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.image_distance.is_sign_negative()
    }
    /// Returns `true` if the image is upright (same orientation as the object).
    #[must_use]
    pub fn is_upright(&self) -> bool {
        self.y > 0.0
    }
    /// Returns `true` if the image is larger than the object.
    #[must_use]
    pub fn is_magnified(&self) -> bool {
        self.y.abs() > OBJECT_HEIGHT
    }
    /// Canonical classification string of this image, e.g. `Real, inverted, diminished`.
    #[must_use]
    pub fn classification(&self) -> String {
        let nature = if self.is_virtual() { "Virtual" } else { "Real" };
        let orientation = if self.is_upright() {
            "upright"
        } else {
            "inverted"
        };
        let size = if self.is_magnified() {
            "magnified"
        } else {
            "diminished"
        };
        format!("{nature}, {orientation}, {size}")
    }
}

/// Checks that the given focal length is positive and finite.
///
/// # Errors
///
/// This function returns [`TutorError::InvalidParameter`] if the focal length is zero, negative or not finite.
pub fn validate_focal_length(focal_length: Length) -> TutorResult<()> {
    if !focal_length.is_normal() || focal_length.is_sign_negative() {
        return Err(TutorError::InvalidParameter(
            "focal length must be > 0.0 and finite".into(),
        ));
    }
    Ok(())
}
/// Checks that the given object distance factor is positive and finite.
///
/// # Errors
///
/// This function returns [`TutorError::InvalidParameter`] if the factor is zero, negative or not finite.
pub fn validate_distance_factor(distance_factor: f64) -> TutorResult<()> {
    if !distance_factor.is_normal() || distance_factor.is_sign_negative() {
        return Err(TutorError::InvalidParameter(
            "object distance factor must be > 0.0 and finite".into(),
        ));
    }
    Ok(())
}

/// Image distance following from the thin lens equation, `None` if the object sits in the focal plane.
fn image_distance(signed_focal_length: f64, object_distance: f64) -> Option<f64> {
    if relative_eq!(object_distance, signed_focal_length) {
        return None;
    }
    Some(1.0 / (1.0 / signed_focal_length - 1.0 / object_distance))
}

/// Recomputes the image distance of a solution from its object distance and focal length.
///
/// Returns `None` for a degenerate configuration.
#[must_use]
pub fn thin_lens_image_distance(solution: &ImageSolution) -> Option<Length> {
    image_distance(
        world_units(solution.focal_length),
        world_units(solution.object_distance),
    )
    .map(|v| millimeter!(v))
}

/// Solve the thin lens imaging problem for an object placed `distance_factor` focal lengths in front
/// of a lens of the given kind.
///
/// # Errors
///
/// This function will return an error if
///   - the focal length or the distance factor are not positive and finite ([`TutorError::InvalidParameter`]).
///   - the object is located in the focal plane such that the image is at infinity
///     ([`TutorError::DegenerateConfiguration`]).
pub fn solve(
    lens: LensKind,
    focal_length: Length,
    distance_factor: f64,
) -> TutorResult<ImageSolution> {
    validate_focal_length(focal_length)?;
    validate_distance_factor(distance_factor)?;
    let f = world_units(lens.signed_focal_length(focal_length));
    let u = distance_factor * world_units(focal_length);
    let Some(v) = image_distance(f, u) else {
        warn!("object at u = {u:.1} is located in the focal plane, image is at infinity");
        return Err(TutorError::DegenerateConfiguration(
            "object distance equals focal length, image at infinity".into(),
        ));
    };
    let m = v / u;
    Ok(ImageSolution {
        x: v,
        y: -m * OBJECT_HEIGHT,
        magnification: m,
        image_distance: millimeter!(v),
        object_distance: millimeter!(u),
        focal_length: millimeter!(f),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::test_helper::test_helper::check_warnings;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    #[test]
    fn convex_beyond_2f() {
        let s = solve(LensKind::Convex, millimeter!(150.0), 2.8).unwrap();
        assert_relative_eq!(world_units(s.object_distance), 420.0, max_relative = 1e-12);
        assert_relative_eq!(s.x, 1.0 / (1.0 / 150.0 - 1.0 / 420.0), max_relative = 1e-12);
        assert_relative_eq!(world_units(s.image_distance), s.x, max_relative = 1e-12);
        assert!(!s.is_virtual());
        assert!(!s.is_upright());
        assert!(!s.is_magnified());
        assert_eq!(s.classification(), "Real, inverted, diminished");
    }
    #[test]
    fn convex_between_f_and_2f() {
        let s = solve(LensKind::Convex, millimeter!(150.0), 1.5).unwrap();
        assert_relative_eq!(s.x, 450.0, max_relative = 1e-9);
        assert_relative_eq!(s.magnification, 2.0, max_relative = 1e-9);
        assert_relative_eq!(s.y, -240.0, max_relative = 1e-9);
        assert_eq!(s.classification(), "Real, inverted, magnified");
    }
    #[test]
    fn convex_inside_f() {
        let s = solve(LensKind::Convex, millimeter!(150.0), 0.7).unwrap();
        assert_relative_eq!(s.x, -350.0, max_relative = 1e-9);
        assert!(s.is_virtual());
        assert!(s.is_upright());
        assert!(s.is_magnified());
        assert_eq!(s.classification(), "Virtual, upright, magnified");
    }
    #[test]
    fn concave() {
        let s = solve(LensKind::Concave, millimeter!(150.0), 2.0).unwrap();
        assert_relative_eq!(s.x, -100.0, max_relative = 1e-9);
        assert_relative_eq!(s.y, 40.0, max_relative = 1e-9);
        assert_relative_eq!(world_units(s.focal_length), -150.0, max_relative = 1e-12);
        assert_eq!(s.classification(), "Virtual, upright, diminished");
    }
    #[test]
    fn convex_inside_focal_length_is_virtual_upright_magnified() {
        for k in [0.1, 0.3, 0.5, 0.7, 0.95] {
            for f in [50.0, 150.0, 300.0] {
                let s = solve(LensKind::Convex, millimeter!(f), k).unwrap();
                assert!(s.x < 0.0, "k={k} f={f}");
                assert!(s.y > 0.0, "k={k} f={f}");
                assert!(s.y.abs() > OBJECT_HEIGHT, "k={k} f={f}");
            }
        }
    }
    #[test]
    fn convex_outside_focal_length_is_real_inverted() {
        for k in [1.05, 1.5, 2.0, 2.8, 10.0] {
            for f in [50.0, 150.0, 300.0] {
                let s = solve(LensKind::Convex, millimeter!(f), k).unwrap();
                assert!(s.x > 0.0, "k={k} f={f}");
                assert!(s.y < 0.0, "k={k} f={f}");
            }
        }
    }
    #[test]
    fn concave_is_always_virtual_and_diminished() {
        for k in [0.1, 0.7, 1.0, 2.0, 10.0] {
            for f in [50.0, 150.0, 300.0] {
                let s = solve(LensKind::Concave, millimeter!(f), k).unwrap();
                assert!(s.x < 0.0, "k={k} f={f}");
                assert!(s.y.abs() < OBJECT_HEIGHT, "k={k} f={f}");
            }
        }
    }
    #[test]
    fn degenerate() {
        testing_logger::setup();
        assert_matches!(
            solve(LensKind::Convex, millimeter!(150.0), 1.0),
            Err(TutorError::DegenerateConfiguration(_))
        );
        check_warnings(&[
            "object at u = 150.0 is located in the focal plane, image is at infinity",
        ]);
        // a concave lens never images to infinity
        assert!(solve(LensKind::Concave, millimeter!(150.0), 1.0).is_ok());
    }
    #[test]
    fn invalid_parameters() {
        assert_matches!(
            solve(LensKind::Convex, millimeter!(0.0), 2.0),
            Err(TutorError::InvalidParameter(_))
        );
        assert_matches!(
            solve(LensKind::Convex, millimeter!(-10.0), 2.0),
            Err(TutorError::InvalidParameter(_))
        );
        assert!(solve(LensKind::Convex, millimeter!(f64::NAN), 2.0).is_err());
        assert!(solve(LensKind::Convex, millimeter!(f64::INFINITY), 2.0).is_err());
        assert!(solve(LensKind::Convex, millimeter!(100.0), 0.0).is_err());
        assert!(solve(LensKind::Convex, millimeter!(100.0), -1.0).is_err());
        assert!(solve(LensKind::Convex, millimeter!(100.0), f64::NAN).is_err());
    }
    #[test]
    fn recompute_image_distance() {
        let s = solve(LensKind::Concave, millimeter!(80.0), 1.5).unwrap();
        let v = thin_lens_image_distance(&s).unwrap();
        assert_relative_eq!(world_units(v), s.x, max_relative = 1e-12);
    }
}
