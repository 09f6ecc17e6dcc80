#![warn(missing_docs)]
//! Misconception evaluator
//!
//! The evaluator compares a learner's attempt with the physically correct solution. Every rule is checked
//! independently and all violated rules are reported, so that the learner gets the complete feedback for
//! an attempt at once.
use log::{info, warn};
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use uom::si::f64::Length;

use crate::{
    explanation,
    geometry::OBJECT_HEIGHT,
    lens::LensKind,
    level::LevelConfig,
    ray::{Ray, RayKind},
    snap::OPTICAL_CENTRE,
    solver::{solve, thin_lens_image_distance, ImageSolution},
    utils::uom_macros::world_units,
    vocabulary::Placements,
};

/// Relative tolerance of the thin lens consistency check.
pub const LENS_EQUATION_TOLERANCE: f64 = 0.12;

/// A violated rule of the ray diagram construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "kebab-case")]
pub enum Misconception {
    /// not exactly one parallel and one central ray
    IncompleteConstruction,
    /// the parallel ray was not directed to the correct focal point
    WrongFocalSnap,
    /// the central ray was not directed through the optical centre
    WrongCenterSnap,
    /// a concave lens predicted to form a real image
    ImpossibleRealImage,
    /// a concave lens predicted to form an image not smaller than the object
    ExpectedDiminishedViolated,
    /// a virtual image without backward extension of the parallel ray
    MissingVirtualConstruction,
    /// the selected classification differs from the expected one
    WrongClassification,
    /// the image orientation contradicts the expected classification
    WrongOrientation,
    /// a real image selected for a concave lens
    ConcaveCannotBeReal,
    /// a magnified image selected for a concave lens
    ConcaveCannotMagnify,
    /// the image position does not satisfy the thin lens equation
    LensEquationViolated,
    /// vocabulary terms not placed into their matching zones
    WrongVocabulary,
    /// explanation too short or lacking the required terminology
    InsufficientExplanation,
    /// no classification selected
    MissingClassification,
    /// the lens configuration has no finite image and cannot be scored
    UnsolvableConfiguration,
}
impl Misconception {
    /// Stable identifier of the rule.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::IncompleteConstruction => "incomplete-construction",
            Self::WrongFocalSnap => "wrong-focal-snap",
            Self::WrongCenterSnap => "wrong-center-snap",
            Self::ImpossibleRealImage => "impossible-real-image",
            Self::ExpectedDiminishedViolated => "expected-diminished-violated",
            Self::MissingVirtualConstruction => "missing-virtual-construction",
            Self::WrongClassification => "wrong-classification",
            Self::WrongOrientation => "wrong-orientation",
            Self::ConcaveCannotBeReal => "concave-cannot-be-real",
            Self::ConcaveCannotMagnify => "concave-cannot-magnify",
            Self::LensEquationViolated => "lens-equation-violated",
            Self::WrongVocabulary => "wrong-vocabulary",
            Self::InsufficientExplanation => "insufficient-explanation",
            Self::MissingClassification => "missing-classification",
            Self::UnsolvableConfiguration => "unsolvable-configuration",
        }
    }
}
impl std::fmt::Display for Misconception {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::IncompleteConstruction => {
                "You must construct both the parallel ray and central ray."
            }
            Self::WrongFocalSnap => {
                "Parallel ray misconception: you did not choose the correct focal point snap target."
            }
            Self::WrongCenterSnap => {
                "Central ray misconception: central ray should pass through optical centre undeviated."
            }
            Self::ImpossibleRealImage => {
                "Concave lens cannot produce a real image on the opposite side."
            }
            Self::ExpectedDiminishedViolated => "Concave lens image should be diminished.",
            Self::MissingVirtualConstruction => {
                "Virtual image construction needs backward ray extensions."
            }
            Self::WrongClassification => {
                "Image classification is incorrect for this object position."
            }
            Self::WrongOrientation => "Incorrect image orientation detected.",
            Self::ConcaveCannotBeReal => "Concave lens producing real image is a misconception.",
            Self::ConcaveCannotMagnify => "Concave lens image larger than object is incorrect.",
            Self::LensEquationViolated => {
                "Image position does not satisfy thin lens equation within tolerance."
            }
            Self::WrongVocabulary => {
                "Vocabulary placement incorrect: principal axis/focal point/focal length labels mismatch."
            }
            Self::InsufficientExplanation => {
                "Explanation is insufficient. Include required terminology and minimum detail."
            }
            Self::MissingClassification => "Select an image classification.",
            Self::UnsolvableConfiguration => {
                "The object is located in the focal plane. No image can be constructed."
            }
        };
        write!(f, "{msg}")
    }
}

fn thin_lens_consistent(solution: &ImageSolution) -> bool {
    thin_lens_image_distance(solution).is_some_and(|v_theo| {
        let v_theo = world_units(v_theo);
        let v = world_units(solution.image_distance);
        (v - v_theo).abs() <= LENS_EQUATION_TOLERANCE * v_theo.abs()
    })
}

/// Evaluate the constructed rays and the selected classification against the solution of a level.
///
/// This function checks the diagram related rules only. Vocabulary, explanation and the presence of a
/// classification are checked by [`assess`]. An empty `classification` means that nothing was
/// selected yet.
///
/// The returned list is complete and in a fixed rule order. The function never fails.
#[must_use]
pub fn evaluate(
    rays: &[Ray],
    level: &LevelConfig,
    classification: &str,
    solution: &ImageSolution,
) -> Vec<Misconception> {
    let mut violations = Vec::new();
    let concave = level.lens() == LensKind::Concave;
    let parallel = rays.iter().find(|r| r.kind() == RayKind::Parallel);
    let central = rays.iter().find(|r| r.kind() == RayKind::Central);

    let count = |kind: RayKind| rays.iter().filter(|r| r.kind() == kind).count();
    if count(RayKind::Parallel) != 1 || count(RayKind::Central) != 1 {
        violations.push(Misconception::IncompleteConstruction);
    }
    if parallel.is_some_and(|r| !r.has_correct_target()) {
        violations.push(Misconception::WrongFocalSnap);
    }
    if central.is_some_and(|r| r.chosen_target().name != OPTICAL_CENTRE) {
        violations.push(Misconception::WrongCenterSnap);
    }
    if concave && solution.x > 0.0 {
        violations.push(Misconception::ImpossibleRealImage);
    }
    if concave && solution.y.abs() >= OBJECT_HEIGHT {
        violations.push(Misconception::ExpectedDiminishedViolated);
    }
    if level.requires_virtual_construction()
        && !parallel.is_some_and(|r| !r.back_extensions().is_empty())
    {
        violations.push(Misconception::MissingVirtualConstruction);
    }
    if !classification.is_empty() && classification != level.expected_classification() {
        violations.push(Misconception::WrongClassification);
    }
    let upright = solution.is_upright();
    let declared_mismatch =
        !classification.is_empty() && classification.contains("upright") != upright;
    if level.expects_upright_image() != upright || declared_mismatch {
        violations.push(Misconception::WrongOrientation);
    }
    if concave && classification.contains("Real") {
        violations.push(Misconception::ConcaveCannotBeReal);
    }
    if concave && classification.contains("magnified") {
        violations.push(Misconception::ConcaveCannotMagnify);
    }
    if !thin_lens_consistent(solution) {
        warn!("image solution violates the thin lens equation");
        violations.push(Misconception::LensEquationViolated);
    }
    violations
}

/// Everything the learner submits for one attempt.
#[derive(Debug, Clone, Copy)]
pub struct Attempt<'a> {
    /// the constructed rays
    pub rays: &'a [Ray],
    /// the selected classification (empty if none)
    pub classification: &'a str,
    /// vocabulary placements
    pub placements: &'a Placements,
    /// the written justification
    pub explanation: &'a str,
}

/// Result of the assessment of an [`Attempt`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    violations: Vec<Misconception>,
    solution: Option<ImageSolution>,
}
impl Assessment {
    /// Returns `true` if no rule was violated.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
    /// Returns all violated rules.
    #[must_use]
    pub fn violations(&self) -> &[Misconception] {
        &self.violations
    }
    /// Returns `true` if the given rule was violated.
    #[must_use]
    pub fn contains(&self, misconception: Misconception) -> bool {
        self.violations.contains(&misconception)
    }
    /// The image solution the attempt was scored against. `None` for an unsolvable configuration.
    #[must_use]
    pub const fn solution(&self) -> Option<&ImageSolution> {
        self.solution.as_ref()
    }
    /// Learner facing feedback, one line per violated rule.
    #[must_use]
    pub fn feedback(&self) -> String {
        self.violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Assess a complete attempt for a level.
///
/// In addition to [`evaluate`] this checks the vocabulary placements, the explanation and whether a
/// classification was selected at all. The ground truth is solved for the given focal length at the time
/// of the call. An unsolvable configuration yields [`Misconception::UnsolvableConfiguration`] only.
#[must_use]
pub fn assess(attempt: &Attempt<'_>, level: &LevelConfig, focal_length: Length) -> Assessment {
    let solution = match solve(level.lens(), focal_length, level.distance_factor()) {
        Ok(solution) => solution,
        Err(e) => {
            warn!("level {} cannot be scored: {e}", level.id());
            return Assessment {
                violations: vec![Misconception::UnsolvableConfiguration],
                solution: None,
            };
        }
    };
    let mut violations = evaluate(attempt.rays, level, attempt.classification, &solution);
    if !attempt.placements.is_correct() {
        violations.push(Misconception::WrongVocabulary);
    }
    if !explanation::is_adequate(attempt.explanation, level.requires_virtual_construction()) {
        violations.push(Misconception::InsufficientExplanation);
    }
    if attempt.classification.is_empty() {
        violations.push(Misconception::MissingClassification);
    }
    info!(
        "level {}: attempt assessed with {} violated rule(s)",
        level.id(),
        violations.len()
    );
    Assessment {
        violations,
        solution: Some(solution),
    }
}
