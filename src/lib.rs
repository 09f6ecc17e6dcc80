#![warn(missing_docs)]
//! This is the documentation for the **lens-tutor** package, the core engine of an interactive tutor
//! teaching the construction of ray diagrams for single thin lenses.
//!
//! The learner constructs the two characteristic rays (parallel and central) of an object in front of a
//! convex or concave lens, classifies the resulting image, labels the diagram and writes a short
//! justification. The engine derives the physically correct solution from the thin lens equation and
//! reports every misconception found in an attempt.
//!
//! The crate contains no rendering or input handling. A shell drives a [`session::Tutor`] with
//! display-space clicks and forwards the emitted [`session::TutorEvent`]s to its user interface.
pub mod config;
pub mod error;
pub mod evaluator;
pub mod explanation;
pub mod geometry;
pub mod lens;
pub mod level;
pub mod progress;
pub mod ray;
pub mod session;
pub mod snap;
pub mod solver;
pub mod utils;
pub mod vocabulary;

pub use session::{SessionState, Tutor, TutorEvent};
