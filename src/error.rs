#![warn(missing_docs)]
//! Tutor specific error structures
use std::{error::Error, fmt::Display};

/// Tutor application specific Result type
pub type TutorResult<T> = std::result::Result<T, TutorError>;

/// Errors that can be returned by the tutor core.
///
/// Learner mistakes are never reported through this type. They are collected as
/// [`Misconception`](crate::evaluator::Misconception)s instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TutorError {
    /// a lens parameter (focal length, distance factor, ...) is out of its valid range
    InvalidParameter(String),
    /// the object sits exactly in the focal plane, the image is at infinity
    DegenerateConfiguration(String),
    /// unknown or locked level
    Level(String),
    /// errors while reading or validating a configuration
    Config(String),
    /// errors of the progress store
    Progress(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for TutorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter(m) => {
                write!(f, "InvalidParameter:{m}")
            }
            Self::DegenerateConfiguration(m) => {
                write!(f, "DegenerateConfiguration:{m}")
            }
            Self::Level(m) => {
                write!(f, "Level:{m}")
            }
            Self::Config(m) => {
                write!(f, "Config:{m}")
            }
            Self::Progress(m) => {
                write!(f, "Progress:{m}")
            }
            Self::Other(m) => write!(f, "Tutor Error:Other:{m}"),
        }
    }
}
impl Error for TutorError {}

impl std::convert::From<String> for TutorError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn from() {
        let error = TutorError::from("test".to_string());
        assert_eq!(error, TutorError::Other("test".to_string()));
    }
    #[test]
    fn display() {
        assert_eq!(
            format!("{}", TutorError::InvalidParameter("test".to_string())),
            "InvalidParameter:test"
        );
        assert_eq!(
            format!("{}", TutorError::DegenerateConfiguration("test".to_string())),
            "DegenerateConfiguration:test"
        );
        assert_eq!(
            format!("{}", TutorError::Level("test".to_string())),
            "Level:test"
        );
        assert_eq!(
            format!("{}", TutorError::Config("test".to_string())),
            "Config:test"
        );
        assert_eq!(
            format!("{}", TutorError::Progress("test".to_string())),
            "Progress:test"
        );
        assert_eq!(
            format!("{}", TutorError::Other("test".to_string())),
            "Tutor Error:Other:test"
        );
    }
    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", TutorError::Level("test".to_string())),
            "Level(\"test\")"
        );
    }
}
