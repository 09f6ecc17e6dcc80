#![warn(missing_docs)]
//! Session state and state transitions of the tutor
//!
//! A [`SessionState`] holds everything a learner has done on the current level. It is only changed by
//! the `apply_*` / `set_*` functions of a [`Tutor`], each of which consumes the old state and returns
//! the new one together with a list of [`TutorEvent`]s. The events tell the surrounding shell what to
//! show (feedback lines, the assessment) and what to persist (unlocked levels).
use log::{debug, info};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumIter, EnumString};
use uom::si::f64::Length;

use crate::{
    config::TutorConfig,
    error::{TutorError, TutorResult},
    evaluator::{assess, Assessment, Attempt},
    geometry::object_tip,
    level::{LevelCatalog, LevelConfig},
    progress::Progress,
    ray::{construct_ray, ideal_rays, Ray, RayKind},
    snap::{closest_snap, generate_snap_targets, SnapTarget},
    solver::{solve, validate_focal_length, ImageSolution},
    vocabulary::{drop_zones, DropZone, Placements, VocabularyTerm},
};

/// Interaction mode of the tutor.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum TutorMode {
    /// step by step instructions are shown
    #[default]
    Guided,
    /// no instructions
    Free,
}
impl std::fmt::Display for TutorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::Guided => "guided",
            Self::Free => "free",
        };
        write!(f, "{msg}")
    }
}

/// Progress of the two-click ray construction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickStage {
    /// the next click has to hit the object tip
    #[default]
    AwaitingOrigin,
    /// the next click has to hit a snap target
    AwaitingTarget,
}
impl ClickStage {
    /// Numeric stage (`0` or `1`).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::AwaitingOrigin => 0,
            Self::AwaitingTarget => 1,
        }
    }
}

/// Severity of a [`Feedback`] line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// neutral hint
    Info,
    /// the last action was rejected or the attempt failed
    Error,
    /// the attempt passed
    Success,
}

/// A feedback line for the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// severity
    pub kind: FeedbackKind,
    /// learner facing text
    pub message: String,
}
impl Feedback {
    fn info(message: &str) -> TutorEvent {
        TutorEvent::Feedback(Self {
            kind: FeedbackKind::Info,
            message: message.to_owned(),
        })
    }
    fn error(message: &str) -> TutorEvent {
        TutorEvent::Feedback(Self {
            kind: FeedbackKind::Error,
            message: message.to_owned(),
        })
    }
    fn success(message: &str) -> TutorEvent {
        TutorEvent::Feedback(Self {
            kind: FeedbackKind::Success,
            message: message.to_owned(),
        })
    }
}

/// Notification emitted by a state transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TutorEvent {
    /// a feedback line to be shown
    Feedback(Feedback),
    /// a ray of the given kind was added to the diagram
    RayCompleted(RayKind),
    /// the guided mode moved on to the step with the given (zero based) index
    GuidedStepAdvanced(usize),
    /// an attempt was submitted and scored
    Assessed(Assessment),
    /// the level with the given id was unlocked. The shell should persist the progress.
    LevelUnlocked(usize),
    /// the attempt was cleared
    SceneReset,
}

/// State of a tutor session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    unlocked_level: usize,
    current_level: usize,
    guided_step: usize,
    mode: TutorMode,
    focal_length: Length,
    snap_targets: Vec<SnapTarget>,
    rays: Vec<Ray>,
    click_stage: ClickStage,
    pending_origin: Option<Point2<f64>>,
    show_solution: bool,
    placements: Placements,
    classification: String,
    explanation: String,
}
impl SessionState {
    /// Returns the highest level the learner may select.
    #[must_use]
    pub const fn unlocked_level(&self) -> usize {
        self.unlocked_level
    }
    /// Returns the id of the active level.
    #[must_use]
    pub const fn current_level(&self) -> usize {
        self.current_level
    }
    /// Returns the index of the active guided step.
    #[must_use]
    pub const fn guided_step(&self) -> usize {
        self.guided_step
    }
    /// Returns the interaction mode.
    #[must_use]
    pub const fn mode(&self) -> TutorMode {
        self.mode
    }
    /// Returns the active (unsigned) focal length.
    #[must_use]
    pub const fn focal_length(&self) -> Length {
        self.focal_length
    }
    /// Returns the snap targets for the active focal length.
    #[must_use]
    pub fn snap_targets(&self) -> &[SnapTarget] {
        &self.snap_targets
    }
    /// Returns the rays completed so far.
    #[must_use]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }
    /// Returns the stage of the current ray construction.
    #[must_use]
    pub const fn click_stage(&self) -> ClickStage {
        self.click_stage
    }
    /// Returns the accepted start point of the ray under construction.
    #[must_use]
    pub const fn pending_origin(&self) -> Option<Point2<f64>> {
        self.pending_origin
    }
    /// Returns `true` if the ideal solution should be overlaid.
    #[must_use]
    pub const fn show_solution(&self) -> bool {
        self.show_solution
    }
    /// Returns the vocabulary placements.
    #[must_use]
    pub const fn placements(&self) -> &Placements {
        &self.placements
    }
    /// Returns the selected classification (empty if none).
    #[must_use]
    pub fn classification(&self) -> &str {
        &self.classification
    }
    /// Returns the written explanation.
    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
    fn reset_attempt(&mut self) {
        self.rays.clear();
        self.guided_step = 0;
        self.click_stage = ClickStage::AwaitingOrigin;
        self.pending_origin = None;
        self.show_solution = false;
        self.placements.clear();
        self.classification.clear();
        self.explanation.clear();
    }
}

/// The tutor: a level catalog together with the interaction parameters.
#[derive(Debug, Clone, Default)]
pub struct Tutor {
    catalog: LevelCatalog,
    config: TutorConfig,
}
impl Tutor {
    /// Creates a new [`Tutor`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the config is invalid or the catalog is empty.
    pub fn new(catalog: LevelCatalog, config: TutorConfig) -> TutorResult<Self> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(TutorError::Level("level catalog is empty".into()));
        }
        Ok(Self { catalog, config })
    }
    /// Returns the level catalog.
    #[must_use]
    pub const fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }
    /// Returns the config.
    #[must_use]
    pub const fn config(&self) -> &TutorConfig {
        &self.config
    }
    /// Start a session from a persisted [`Progress`].
    ///
    /// The session opens the highest unlocked level in guided mode with the default focal length.
    #[must_use]
    pub fn start(&self, progress: Progress) -> SessionState {
        let unlocked_level = progress.clamped(self.catalog.len()).unlocked_level;
        let focal_length = self.config.default_focal_length();
        info!("starting session at level {unlocked_level}");
        SessionState {
            unlocked_level,
            current_level: unlocked_level,
            guided_step: 0,
            mode: TutorMode::default(),
            focal_length,
            snap_targets: generate_snap_targets(focal_length),
            rays: Vec::new(),
            click_stage: ClickStage::default(),
            pending_origin: None,
            show_solution: false,
            placements: Placements::default(),
            classification: String::new(),
            explanation: String::new(),
        }
    }
    /// Returns the active level of a session.
    ///
    /// # Errors
    ///
    /// This function will return an error if the state refers to a level not in the catalog.
    pub fn level(&self, state: &SessionState) -> TutorResult<&LevelConfig> {
        self.catalog.get(state.current_level)
    }
    /// Returns the [`Progress`] to persist for a session.
    #[must_use]
    pub const fn progress(state: &SessionState) -> Progress {
        Progress {
            unlocked_level: state.unlocked_level,
        }
    }
    /// Returns the text of the active guided step.
    #[must_use]
    pub fn guided_instruction<'a>(&'a self, state: &SessionState) -> Option<&'a str> {
        self.level(state)
            .ok()
            .and_then(|level| level.guided_steps().get(state.guided_step))
            .map(String::as_str)
    }
    /// Returns the world position of the object tip of the active level.
    ///
    /// # Errors
    ///
    /// This function will return an error if the active level is unknown.
    pub fn object_tip(&self, state: &SessionState) -> TutorResult<Point2<f64>> {
        let level = self.level(state)?;
        Ok(object_tip(level.distance_factor(), state.focal_length))
    }
    /// Returns the image solution of the active level.
    ///
    /// # Errors
    ///
    /// This function will return an error if the active level is unknown or has no finite image.
    pub fn solution(&self, state: &SessionState) -> TutorResult<ImageSolution> {
        let level = self.level(state)?;
        solve(level.lens(), state.focal_length, level.distance_factor())
    }
    /// Returns the ideal rays of the active level, `None` as long as the solution is hidden.
    ///
    /// # Errors
    ///
    /// This function will return an error if the active level is unknown.
    pub fn solution_overlay(&self, state: &SessionState) -> TutorResult<Option<[Ray; 2]>> {
        if !state.show_solution {
            return Ok(None);
        }
        let level = self.level(state)?;
        ideal_rays(level.lens(), state.focal_length, level.distance_factor()).map(Some)
    }
    /// Returns the vocabulary drop zones for the active focal length.
    #[must_use]
    pub fn drop_zones(state: &SessionState) -> Vec<DropZone> {
        drop_zones(state.focal_length)
    }

    /// Handle a click on the drawing surface at `display_point` (display coordinates).
    ///
    /// A ray is built from two clicks. The first click has to hit the object tip, the second one a snap
    /// target. Rejected clicks leave the construction untouched and only emit an error feedback.
    #[must_use]
    pub fn apply_click(
        &self,
        mut state: SessionState,
        display_point: Point2<f64>,
    ) -> (SessionState, Vec<TutorEvent>) {
        let mut events = Vec::new();
        let level = match self.level(&state) {
            Ok(level) => level,
            Err(e) => {
                events.push(Feedback::error(&e.to_string()));
                return (state, events);
            }
        };
        let point = self.config.viewport().display_to_world(display_point);
        match state.click_stage {
            ClickStage::AwaitingOrigin => {
                if RayKind::from_position(state.rays.len()).is_none() {
                    events.push(Feedback::error(
                        "Both rays are already constructed. Reset to start over.",
                    ));
                    return (state, events);
                }
                let tip = object_tip(level.distance_factor(), state.focal_length);
                if nalgebra::distance(&point, &tip) < self.config.object_pick_radius() {
                    state.pending_origin = Some(tip);
                    state.click_stage = ClickStage::AwaitingTarget;
                    events.push(Feedback::info(
                        "Start accepted. Now click a snap point target.",
                    ));
                } else {
                    events.push(Feedback::error("First click must be on object tip."));
                }
            }
            ClickStage::AwaitingTarget => {
                let Some(target) =
                    closest_snap(point, &state.snap_targets, self.config.snap_radius()).cloned()
                else {
                    events.push(Feedback::error("Second click must be on a snap point."));
                    return (state, events);
                };
                let Some(kind) = RayKind::from_position(state.rays.len()) else {
                    events.push(Feedback::error(
                        "Both rays are already constructed. Reset to start over.",
                    ));
                    return (state, events);
                };
                debug!("click snapped to {}", target.name);
                match construct_ray(
                    kind,
                    level.lens(),
                    state.focal_length,
                    level.distance_factor(),
                    target,
                ) {
                    Ok(ray) => {
                        state.rays.push(ray);
                        state.click_stage = ClickStage::AwaitingOrigin;
                        state.pending_origin = None;
                        events.push(TutorEvent::RayCompleted(kind));
                        if state.mode == TutorMode::Guided {
                            let last = level.guided_steps().len().saturating_sub(1);
                            state.guided_step = (state.guided_step + 1).min(last);
                            events.push(TutorEvent::GuidedStepAdvanced(state.guided_step));
                        }
                    }
                    Err(e) => events.push(Feedback::error(&e.to_string())),
                }
            }
        }
        (state, events)
    }
    /// Submit the current attempt for assessment.
    ///
    /// Submitting reveals the ideal solution. A passed attempt on the highest unlocked level unlocks the
    /// next level, if there is one.
    #[must_use]
    pub fn apply_submit(&self, mut state: SessionState) -> (SessionState, Vec<TutorEvent>) {
        let mut events = Vec::new();
        let level = match self.level(&state) {
            Ok(level) => level,
            Err(e) => {
                events.push(Feedback::error(&e.to_string()));
                return (state, events);
            }
        };
        state.show_solution = true;
        let attempt = Attempt {
            rays: &state.rays,
            classification: &state.classification,
            placements: &state.placements,
            explanation: &state.explanation,
        };
        let assessment = assess(&attempt, level, state.focal_length);
        if assessment.passed() {
            events.push(Feedback::success(
                "Excellent. Diagram geometry, terminology, and explanation are correct. Next level unlocked (if available).",
            ));
            if state.current_level == state.unlocked_level
                && state.unlocked_level < self.catalog.len()
            {
                state.unlocked_level += 1;
                info!("level {} unlocked", state.unlocked_level);
                events.push(TutorEvent::LevelUnlocked(state.unlocked_level));
            }
        } else {
            events.push(Feedback::error(&assessment.feedback()));
        }
        events.push(TutorEvent::Assessed(assessment));
        (state, events)
    }
    /// Switch to the level `level_id`. The attempt is reset.
    ///
    /// # Errors
    ///
    /// This function will return an error if the level is unknown or still locked.
    pub fn apply_level_change(
        &self,
        mut state: SessionState,
        level_id: usize,
    ) -> TutorResult<(SessionState, Vec<TutorEvent>)> {
        let level = self.catalog.get(level_id)?;
        if level_id > state.unlocked_level {
            return Err(TutorError::Level(format!("level {level_id} is locked")));
        }
        info!("switching to {}", level.name());
        state.current_level = level_id;
        state.snap_targets = generate_snap_targets(state.focal_length);
        state.reset_attempt();
        Ok((state, vec![TutorEvent::SceneReset]))
    }
    /// Change the focal length. Snap targets are regenerated and the attempt is reset.
    ///
    /// # Errors
    ///
    /// This function will return an error if the focal length is not positive and finite.
    pub fn apply_focal_length_change(
        &self,
        mut state: SessionState,
        focal_length: Length,
    ) -> TutorResult<(SessionState, Vec<TutorEvent>)> {
        validate_focal_length(focal_length)?;
        state.focal_length = focal_length;
        state.snap_targets = generate_snap_targets(focal_length);
        state.reset_attempt();
        Ok((state, vec![TutorEvent::SceneReset]))
    }
    /// Clear the current attempt.
    #[must_use]
    pub fn apply_reset(&self, mut state: SessionState) -> (SessionState, Vec<TutorEvent>) {
        state.reset_attempt();
        (state, vec![TutorEvent::SceneReset])
    }
    /// Switch between guided and free mode. The attempt is kept.
    #[must_use]
    pub fn apply_mode_change(
        &self,
        mut state: SessionState,
        mode: TutorMode,
    ) -> (SessionState, Vec<TutorEvent>) {
        state.mode = mode;
        let events = match mode {
            TutorMode::Guided => vec![Feedback::info("Guided mode: follow the steps.")],
            TutorMode::Free => vec![Feedback::info(
                "Free mode: construct the diagram on your own.",
            )],
        };
        (state, events)
    }
    /// Place the vocabulary `term` into the drop zone named `zone`.
    ///
    /// # Errors
    ///
    /// This function will return an error if `zone` does not name a drop zone.
    pub fn apply_placement(
        &self,
        mut state: SessionState,
        zone: &str,
        term: &str,
    ) -> TutorResult<(SessionState, Vec<TutorEvent>)> {
        let zone = VocabularyTerm::from_str(zone)
            .map_err(|_| TutorError::InvalidParameter(format!("unknown drop zone '{zone}'")))?;
        state.placements.place(zone, term);
        Ok((state, Vec::new()))
    }
    /// Select an image classification.
    #[must_use]
    pub fn set_classification(mut state: SessionState, classification: &str) -> SessionState {
        state.classification = classification.to_owned();
        state
    }
    /// Replace the written explanation.
    #[must_use]
    pub fn set_explanation(mut state: SessionState, explanation: &str) -> SessionState {
        state.explanation = explanation.to_owned();
        state
    }
}
