#![warn(missing_docs)]
//! Module for constructing the two characteristic rays of a thin lens ray diagram
//!
//! Both rays start at the tip of the object arrow:
//!   - the *parallel* ray travels parallel to the optical axis up to the lens plane and is then refracted
//!     through (convex) or away from (concave) a focal point.
//!   - the *central* ray passes the optical centre undeviated.
//!
//! The geometry of a constructed [`Ray`] is always the physically correct one. The target chosen by the
//! learner is only stored alongside for a later comparison with the correct target.
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

use crate::{
    error::TutorResult,
    geometry::{
        focal_points, lens_point, line_y_at, object_tip, optical_center, Segment, FAR_BOUNDARY,
        NEAR_BOUNDARY,
    },
    lens::LensKind,
    snap::{SnapKind, SnapTarget, OPTICAL_CENTRE},
    solver::{validate_distance_factor, validate_focal_length},
};

/// Type of a characteristic ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RayKind {
    /// ray travelling parallel to the optical axis before the lens
    Parallel,
    /// ray through the optical centre
    Central,
}
impl RayKind {
    /// Kind of the ray completed as number `index` (zero based) of an attempt.
    ///
    /// The first ray of an attempt is always the parallel ray, the second one the central ray. There is
    /// no third ray.
    #[must_use]
    pub const fn from_position(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Parallel),
            1 => Some(Self::Central),
            _ => None,
        }
    }
}
impl std::fmt::Display for RayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::Parallel => "parallel",
            Self::Central => "central",
        };
        write!(f, "{msg}")
    }
}

///Struct that contains all information about a constructed ray
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    kind: RayKind,
    chosen_target: SnapTarget,
    correct_target_name: String,
    ///drawn with solid lines
    segments: Vec<Segment>,
    ///drawn dashed, they illustrate the origin of a virtual image
    back_extensions: Vec<Segment>,
}
impl Ray {
    /// Creates a new [`Ray`] from its parts.
    ///
    /// Usually, rays are created by [`construct_ray`]. This function is mostly useful for checking
    /// hand-made (possibly incomplete) constructions.
    #[must_use]
    pub fn new(
        kind: RayKind,
        chosen_target: SnapTarget,
        correct_target_name: String,
        segments: Vec<Segment>,
        back_extensions: Vec<Segment>,
    ) -> Self {
        Self {
            kind,
            chosen_target,
            correct_target_name,
            segments,
            back_extensions,
        }
    }
    /// Returns the kind of this [`Ray`].
    #[must_use]
    pub const fn kind(&self) -> RayKind {
        self.kind
    }
    /// Returns the target chosen by the learner.
    #[must_use]
    pub const fn chosen_target(&self) -> &SnapTarget {
        &self.chosen_target
    }
    /// Returns the name of the target the learner should have chosen.
    #[must_use]
    pub fn correct_target_name(&self) -> &str {
        &self.correct_target_name
    }
    /// Returns the forward segments of this [`Ray`].
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
    /// Returns the backward (virtual) extensions of this [`Ray`].
    #[must_use]
    pub fn back_extensions(&self) -> &[Segment] {
        &self.back_extensions
    }
    /// Returns `true` if the learner picked the correct target for this ray.
    #[must_use]
    pub fn has_correct_target(&self) -> bool {
        self.chosen_target.name == self.correct_target_name
    }
}

/// The snap target a ray of the given kind has to pass through.
#[must_use]
pub fn correct_target(kind: RayKind, lens: LensKind, focal_length: Length) -> SnapTarget {
    let (front, back) = focal_points(focal_length);
    match (kind, lens) {
        (RayKind::Parallel, LensKind::Convex) => {
            SnapTarget::new("+F", front.x, front.y, SnapKind::True)
        }
        (RayKind::Parallel, LensKind::Concave) => {
            SnapTarget::new("-F", back.x, back.y, SnapKind::True)
        }
        (RayKind::Central, _) => SnapTarget::new(OPTICAL_CENTRE, 0.0, 0.0, SnapKind::Center),
    }
}

fn parallel_ray(
    lens: LensKind,
    focal_length: Length,
    tip: Point2<f64>,
    virtual_image: bool,
    chosen_target: SnapTarget,
) -> Ray {
    let on_lens = lens_point(tip);
    let (front, back) = focal_points(focal_length);
    let correct = correct_target(RayKind::Parallel, lens, focal_length);
    match lens {
        LensKind::Convex => {
            let far = Point2::new(FAR_BOUNDARY, line_y_at(on_lens, front, FAR_BOUNDARY));
            // object inside the focal length: the refracted rays diverge and only meet backwards
            let back_extensions = if virtual_image {
                let near = Point2::new(NEAR_BOUNDARY, line_y_at(on_lens, front, NEAR_BOUNDARY));
                vec![Segment::new(on_lens, near)]
            } else {
                vec![]
            };
            Ray::new(
                RayKind::Parallel,
                chosen_target,
                correct.name,
                vec![Segment::new(tip, on_lens), Segment::new(on_lens, far)],
                back_extensions,
            )
        }
        LensKind::Concave => {
            // the refracted ray continues the line from the virtual origin through the lens point
            let far = Point2::new(FAR_BOUNDARY, line_y_at(back, on_lens, FAR_BOUNDARY));
            let near = Point2::new(NEAR_BOUNDARY, line_y_at(back, on_lens, NEAR_BOUNDARY));
            Ray::new(
                RayKind::Parallel,
                chosen_target,
                correct.name,
                vec![Segment::new(tip, on_lens), Segment::new(on_lens, far)],
                vec![Segment::new(on_lens, near)],
            )
        }
    }
}

fn central_ray(tip: Point2<f64>, virtual_image: bool, chosen_target: SnapTarget) -> Ray {
    let centre = optical_center();
    let far = Point2::new(FAR_BOUNDARY, line_y_at(tip, centre, FAR_BOUNDARY));
    let back_extensions = if virtual_image {
        let near = Point2::new(NEAR_BOUNDARY, line_y_at(tip, centre, NEAR_BOUNDARY));
        vec![Segment::new(tip, near)]
    } else {
        vec![]
    };
    Ray::new(
        RayKind::Central,
        chosen_target,
        OPTICAL_CENTRE.into(),
        vec![Segment::new(tip, far)],
        back_extensions,
    )
}

/// Construct a characteristic ray for an object placed `distance_factor` focal lengths in front of a
/// lens.
///
/// The geometry of the returned [`Ray`] does not depend on `chosen_target`.
///
/// # Errors
///
/// This function will return an error if the focal length or the distance factor are not positive and
/// finite.
pub fn construct_ray(
    kind: RayKind,
    lens: LensKind,
    focal_length: Length,
    distance_factor: f64,
    chosen_target: SnapTarget,
) -> TutorResult<Ray> {
    validate_focal_length(focal_length)?;
    validate_distance_factor(distance_factor)?;
    let tip = object_tip(distance_factor, focal_length);
    debug!(
        "constructing {kind} ray for {lens} lens, chosen target {}",
        chosen_target.name
    );
    let virtual_image = lens.forms_virtual_image(distance_factor);
    let ray = match kind {
        RayKind::Parallel => parallel_ray(lens, focal_length, tip, virtual_image, chosen_target),
        RayKind::Central => central_ray(tip, virtual_image, chosen_target),
    };
    Ok(ray)
}

/// Construct both characteristic rays with their correct targets.
///
/// This is the ideal solution shown to the learner after submitting an attempt.
///
/// # Errors
///
/// This function will return an error if the focal length or the distance factor are not positive and
/// finite.
pub fn ideal_rays(
    lens: LensKind,
    focal_length: Length,
    distance_factor: f64,
) -> TutorResult<[Ray; 2]> {
    validate_focal_length(focal_length)?;
    validate_distance_factor(distance_factor)?;
    let tip = object_tip(distance_factor, focal_length);
    let virtual_image = lens.forms_virtual_image(distance_factor);
    let parallel = parallel_ray(
        lens,
        focal_length,
        tip,
        virtual_image,
        correct_target(RayKind::Parallel, lens, focal_length),
    );
    let central = central_ray(
        tip,
        virtual_image,
        correct_target(RayKind::Central, lens, focal_length),
    );
    Ok([parallel, central])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{geometry::OBJECT_HEIGHT, millimeter, snap::generate_snap_targets};
    use approx::assert_abs_diff_eq;

    fn targets() -> Vec<SnapTarget> {
        generate_snap_targets(millimeter!(150.0))
    }
    #[test]
    fn position_kinds() {
        assert_eq!(RayKind::from_position(0), Some(RayKind::Parallel));
        assert_eq!(RayKind::from_position(1), Some(RayKind::Central));
        assert_eq!(RayKind::from_position(2), None);
    }
    #[test]
    fn display() {
        assert_eq!(format!("{}", RayKind::Parallel), "parallel");
        assert_eq!(format!("{}", RayKind::Central), "central");
    }
    #[test]
    fn convex_parallel_independent_of_target() {
        let reference = construct_ray(
            RayKind::Parallel,
            LensKind::Convex,
            millimeter!(150.0),
            2.8,
            targets()[0].clone(),
        )
        .unwrap();
        for target in targets() {
            let ray = construct_ray(
                RayKind::Parallel,
                LensKind::Convex,
                millimeter!(150.0),
                2.8,
                target.clone(),
            )
            .unwrap();
            assert_eq!(ray.correct_target_name(), "+F");
            assert!(ray.back_extensions().is_empty());
            assert_eq!(ray.segments(), reference.segments());
            assert_eq!(ray.chosen_target(), &target);
        }
    }
    #[test]
    fn convex_parallel_geometry() {
        let ray = construct_ray(
            RayKind::Parallel,
            LensKind::Convex,
            millimeter!(150.0),
            2.8,
            targets()[0].clone(),
        )
        .unwrap();
        let segments = ray.segments();
        assert_eq!(segments.len(), 2);
        assert_abs_diff_eq!(segments[0].a.x, -420.0, epsilon = 1e-9);
        assert_eq!(segments[0].a.y, OBJECT_HEIGHT);
        assert_eq!(segments[0].b, Point2::new(0.0, OBJECT_HEIGHT));
        assert_eq!(segments[1].a, segments[0].b);
        assert_eq!(segments[1].b.x, FAR_BOUNDARY);
        // passes through +F
        assert_abs_diff_eq!(
            line_y_at(segments[1].a, segments[1].b, 150.0),
            0.0,
            epsilon = 1e-9
        );
        assert!(ray.has_correct_target());
    }
    #[test]
    fn convex_parallel_inside_focal_length() {
        let ray = construct_ray(
            RayKind::Parallel,
            LensKind::Convex,
            millimeter!(150.0),
            0.7,
            targets()[0].clone(),
        )
        .unwrap();
        assert_eq!(ray.correct_target_name(), "+F");
        assert_eq!(ray.back_extensions().len(), 1);
        let back = ray.back_extensions()[0];
        assert_eq!(back.b.x, NEAR_BOUNDARY);
        // the extension passes the virtual image tip at v = -350, y = 400
        assert_abs_diff_eq!(line_y_at(back.a, back.b, -350.0), 400.0, epsilon = 1e-9);
    }
    #[test]
    fn concave_parallel() {
        for target in targets() {
            let ray = construct_ray(
                RayKind::Parallel,
                LensKind::Concave,
                millimeter!(150.0),
                2.0,
                target,
            )
            .unwrap();
            assert_eq!(ray.correct_target_name(), "-F");
            assert_eq!(ray.back_extensions().len(), 1);
            let forward = ray.segments()[1];
            // bends away from the axis
            assert!(forward.b.y > OBJECT_HEIGHT);
            let back = ray.back_extensions()[0];
            assert_eq!(back.a, Point2::new(0.0, OBJECT_HEIGHT));
            assert_eq!(back.b.x, NEAR_BOUNDARY);
            // dashed extension passes through -F
            assert_abs_diff_eq!(line_y_at(back.a, back.b, -150.0), 0.0, epsilon = 1e-9);
            // forward and backward part are collinear
            assert_abs_diff_eq!(forward.slope(), back.slope(), epsilon = 1e-12);
        }
    }
    #[test]
    fn central_ray_real_image() {
        let ray = construct_ray(
            RayKind::Central,
            LensKind::Convex,
            millimeter!(150.0),
            1.5,
            targets()[10].clone(),
        )
        .unwrap();
        assert_eq!(ray.correct_target_name(), OPTICAL_CENTRE);
        assert!(ray.has_correct_target());
        assert!(ray.back_extensions().is_empty());
        let s = ray.segments()[0];
        assert_abs_diff_eq!(line_y_at(s.a, s.b, 0.0), 0.0, epsilon = 1e-9);
        assert_eq!(s.b.x, FAR_BOUNDARY);
    }
    #[test]
    fn central_ray_virtual_image() {
        let convex_inside = construct_ray(
            RayKind::Central,
            LensKind::Convex,
            millimeter!(150.0),
            0.7,
            targets()[0].clone(),
        )
        .unwrap();
        assert_eq!(convex_inside.back_extensions().len(), 1);
        assert!(!convex_inside.has_correct_target());
        let concave = construct_ray(
            RayKind::Central,
            LensKind::Concave,
            millimeter!(150.0),
            2.0,
            targets()[10].clone(),
        )
        .unwrap();
        let back = concave.back_extensions()[0];
        assert_eq!(back.b.x, NEAR_BOUNDARY);
        assert_abs_diff_eq!(line_y_at(back.a, back.b, 0.0), 0.0, epsilon = 1e-9);
    }
    #[test]
    fn invalid_parameters() {
        assert!(construct_ray(
            RayKind::Central,
            LensKind::Convex,
            millimeter!(0.0),
            2.0,
            targets()[10].clone()
        )
        .is_err());
        assert!(construct_ray(
            RayKind::Central,
            LensKind::Convex,
            millimeter!(100.0),
            -2.0,
            targets()[10].clone()
        )
        .is_err());
        assert!(ideal_rays(LensKind::Convex, millimeter!(-5.0), 2.0).is_err());
    }
    #[test]
    fn ideal() {
        let [parallel, central] = ideal_rays(LensKind::Concave, millimeter!(150.0), 2.0).unwrap();
        assert_eq!(parallel.kind(), RayKind::Parallel);
        assert!(parallel.has_correct_target());
        assert_eq!(central.kind(), RayKind::Central);
        assert!(central.has_correct_target());
        assert_eq!(central.back_extensions().len(), 1);
    }
    #[test]
    fn correct_targets_exist_in_snap_set() {
        let set = targets();
        for lens in [LensKind::Convex, LensKind::Concave] {
            for kind in [RayKind::Parallel, RayKind::Central] {
                let target = correct_target(kind, lens, millimeter!(150.0));
                let found = set.iter().find(|t| t.name == target.name).unwrap();
                assert_abs_diff_eq!(found.x, target.x, epsilon = 1e-9);
                assert_eq!(found.kind, target.kind);
            }
        }
    }
}
