#![warn(missing_docs)]
//! Level catalog
//!
//! The levels of the tutor only differ in their parameters. They are therefore plain data records
//! ([`LevelConfig`]) collected in a fixed [`LevelCatalog`].
use serde::{Deserialize, Serialize};

use crate::{
    error::{TutorError, TutorResult},
    lens::LensKind,
    solver::validate_distance_factor,
};

/// Configuration of a single level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    id: usize,
    name: String,
    lens: LensKind,
    distance_factor: f64,
    guided_steps: Vec<String>,
    expected_classification: String,
}
impl LevelConfig {
    /// Creates a new [`LevelConfig`].
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - `id` is zero.
    ///   - the `distance_factor` is not positive and finite.
    ///   - no guided step is given.
    pub fn new(
        id: usize,
        name: &str,
        lens: LensKind,
        distance_factor: f64,
        guided_steps: &[&str],
        expected_classification: &str,
    ) -> TutorResult<Self> {
        let level = Self {
            id,
            name: name.to_owned(),
            lens,
            distance_factor,
            guided_steps: guided_steps.iter().map(|s| (*s).to_owned()).collect(),
            expected_classification: expected_classification.to_owned(),
        };
        level.validate()?;
        Ok(level)
    }
    fn validate(&self) -> TutorResult<()> {
        if self.id == 0 {
            return Err(TutorError::Level("level ids start at 1".into()));
        }
        validate_distance_factor(self.distance_factor)?;
        if self.guided_steps.is_empty() {
            return Err(TutorError::Level(format!(
                "level {} has no guided steps",
                self.id
            )));
        }
        Ok(())
    }
    /// Returns the id of this level.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }
    /// Returns the display name of this level.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Returns the lens kind of this level.
    #[must_use]
    pub const fn lens(&self) -> LensKind {
        self.lens
    }
    /// Returns the object distance in units of the focal length.
    #[must_use]
    pub const fn distance_factor(&self) -> f64 {
        self.distance_factor
    }
    /// Returns the guided step descriptions.
    #[must_use]
    pub fn guided_steps(&self) -> &[String] {
        &self.guided_steps
    }
    /// Returns the classification the learner is expected to select.
    #[must_use]
    pub fn expected_classification(&self) -> &str {
        &self.expected_classification
    }
    /// Returns `true` if the image of this level is virtual and has to be located by backward
    /// extensions of the rays.
    #[must_use]
    pub fn requires_virtual_construction(&self) -> bool {
        self.lens.forms_virtual_image(self.distance_factor)
    }
    /// Returns `true` if the expected image is upright.
    #[must_use]
    pub fn expects_upright_image(&self) -> bool {
        self.expected_classification.contains("upright")
    }
}

/// The fixed, ordered set of levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<LevelConfig>,
}
impl LevelCatalog {
    /// Creates a new [`LevelCatalog`] from the given levels.
    ///
    /// # Errors
    ///
    /// This function will return an error if the catalog is empty, a level is invalid or the level ids
    /// are not numbered consecutively starting at 1.
    pub fn new(levels: Vec<LevelConfig>) -> TutorResult<Self> {
        if levels.is_empty() {
            return Err(TutorError::Level("level catalog must not be empty".into()));
        }
        for (idx, level) in levels.iter().enumerate() {
            level.validate()?;
            if level.id != idx + 1 {
                return Err(TutorError::Level(format!(
                    "level ids must be consecutive, found {} at position {}",
                    level.id,
                    idx + 1
                )));
            }
        }
        Ok(Self { levels })
    }
    /// Read a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// This function will return an error if the document cannot be parsed or describes an invalid catalog.
    pub fn from_yaml(yaml: &str) -> TutorResult<Self> {
        let catalog: Self = serde_yaml::from_str(yaml)
            .map_err(|e| TutorError::Config(format!("parsing of level catalog failed: {e}")))?;
        Self::new(catalog.levels)
    }
    /// Returns the level with the given id.
    ///
    /// # Errors
    ///
    /// This function will return an error if no level with this id exists.
    pub fn get(&self, id: usize) -> TutorResult<&LevelConfig> {
        self.levels
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| TutorError::Level(format!("unknown level {id}")))
    }
    /// Returns the number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }
    /// Returns `true` if the catalog contains no levels. A validated catalog is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
    /// Iterate over all levels in order.
    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}
impl Default for LevelCatalog {
    /// The four levels of the lens tutor.
    fn default() -> Self {
        let levels = vec![
            LevelConfig {
                id: 1,
                name: "Level 1: Convex beyond 2F".into(),
                lens: LensKind::Convex,
                distance_factor: 2.8,
                guided_steps: steps(&[
                    "Draw a ray parallel to the principal axis.",
                    "Draw the central ray through optical centre.",
                    "Locate the real image where refracted rays intersect.",
                    "Classify image and complete vocabulary.",
                ]),
                expected_classification: "Real, inverted, diminished".into(),
            },
            LevelConfig {
                id: 2,
                name: "Level 2: Convex between F and 2F".into(),
                lens: LensKind::Convex,
                distance_factor: 1.5,
                guided_steps: steps(&[
                    "Draw a parallel ray that refracts through focal point.",
                    "Draw a central ray undeviated.",
                    "Find image intersection beyond 2F.",
                    "Classify image and justify with focal terms.",
                ]),
                expected_classification: "Real, inverted, magnified".into(),
            },
            LevelConfig {
                id: 3,
                name: "Level 3: Convex inside F".into(),
                lens: LensKind::Convex,
                distance_factor: 0.7,
                guided_steps: steps(&[
                    "Draw one parallel ray and refract it through focal point.",
                    "Draw central ray undeviated.",
                    "Extend refracted rays backward to locate virtual image.",
                    "Classify as virtual image and explain why it cannot be projected.",
                ]),
                expected_classification: "Virtual, upright, magnified".into(),
            },
            LevelConfig {
                id: 4,
                name: "Level 4: Concave".into(),
                lens: LensKind::Concave,
                distance_factor: 2.0,
                guided_steps: steps(&[
                    "Draw a ray parallel to axis, refracted to diverge as if from focal point.",
                    "Draw undeviated central ray.",
                    "Extend rays backward to find virtual image.",
                    "Classify image and explain diminished upright virtual image.",
                ]),
                expected_classification: "Virtual, upright, diminished".into(),
            },
        ];
        Self { levels }
    }
}
fn steps(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| (*s).to_owned()).collect()
}
