#![warn(missing_docs)]
//! Configuration of the tutor
//!
//! The configuration holds the parameters of the interaction with the diagram. It can be read from a
//! YAML document, missing entries take their default values.
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

use crate::{
    error::{TutorError, TutorResult},
    geometry::Viewport,
    millimeter,
};

/// Default key of the persisted progress.
pub const DEFAULT_STORAGE_KEY: &str = "lens-tutor-progress-v1";

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Configuration data of the tutor.
///
/// The config contains the following info
///   - size and scale of the drawing surface
///   - pick radius of snap targets and of the object tip
///   - focal length (in world units) the tutor starts with
///   - key under which the progress is persisted
pub struct TutorConfig {
    canvas_width: f64,
    canvas_height: f64,
    scale: f64,
    snap_radius: f64,
    object_pick_radius: f64,
    default_focal_length: f64,
    storage_key: String,
}
impl Default for TutorConfig {
    /// Create a default config with the following parameters:
    ///   - canvas: `860 x 500` at scale `1.0`
    ///   - snap radius: `28`
    ///   - object tip pick radius: `25`
    ///   - focal length: `150`
    ///   - storage key: [`DEFAULT_STORAGE_KEY`]
    fn default() -> Self {
        Self {
            canvas_width: 860.0,
            canvas_height: 500.0,
            scale: 1.0,
            snap_radius: 28.0,
            object_pick_radius: 25.0,
            default_focal_length: 150.0,
            storage_key: DEFAULT_STORAGE_KEY.into(),
        }
    }
}
impl TutorConfig {
    /// Read a config from a YAML document.
    ///
    /// # Errors
    ///
    /// This function will return an error if the document cannot be parsed or contains invalid values.
    pub fn from_yaml(yaml: &str) -> TutorResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| TutorError::Config(format!("parsing of config failed: {e}")))?;
        config.validate()?;
        Ok(config)
    }
    /// Write this config as YAML document.
    ///
    /// # Errors
    ///
    /// This function will return an error if the serialization fails.
    pub fn to_yaml(&self) -> TutorResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| TutorError::Config(format!("serialization of config failed: {e}")))
    }
    /// Check all values of this config.
    ///
    /// # Errors
    ///
    /// This function will return an error if a size, the scale, a radius or the focal length is not
    /// positive and finite or the storage key is empty.
    pub fn validate(&self) -> TutorResult<()> {
        let values = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("scale", self.scale),
            ("snap_radius", self.snap_radius),
            ("object_pick_radius", self.object_pick_radius),
            ("default_focal_length", self.default_focal_length),
        ];
        for (name, value) in values {
            if !value.is_normal() || value.is_sign_negative() {
                return Err(TutorError::Config(format!(
                    "{name} must be > 0.0 and finite"
                )));
            }
        }
        if self.storage_key.trim().is_empty() {
            return Err(TutorError::Config("storage key must not be empty".into()));
        }
        Ok(())
    }
    /// Returns the viewport of the drawing surface.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas_width, self.canvas_height, self.scale)
    }
    /// Returns the radius (in world units) within which a click snaps to a target.
    #[must_use]
    pub const fn snap_radius(&self) -> f64 {
        self.snap_radius
    }
    /// Returns the radius (in world units) within which a click selects the object tip.
    #[must_use]
    pub const fn object_pick_radius(&self) -> f64 {
        self.object_pick_radius
    }
    /// Returns the focal length the tutor starts with.
    #[must_use]
    pub fn default_focal_length(&self) -> Length {
        millimeter!(self.default_focal_length)
    }
    /// Returns the key under which the progress is persisted.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}
