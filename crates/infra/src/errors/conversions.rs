//! Conversions from external infrastructure errors into domain errors.

use std::io::ErrorKind;

use streakline_domain::StreaklineError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub StreaklineError);

impl From<InfraError> for StreaklineError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<StreaklineError> for InfraError {
    fn from(value: StreaklineError) -> Self {
        InfraError(value)
    }
}

trait IntoStreaklineError {
    fn into_streakline(self) -> StreaklineError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → StreaklineError */
/* -------------------------------------------------------------------------- */

impl IntoStreaklineError for std::io::Error {
    fn into_streakline(self) -> StreaklineError {
        match self.kind() {
            ErrorKind::NotFound => StreaklineError::NotFound(self.to_string()),
            ErrorKind::PermissionDenied => {
                StreaklineError::Io(format!("permission denied: {self}"))
            }
            ErrorKind::InvalidData | ErrorKind::UnexpectedEof => {
                StreaklineError::InvalidInput(format!("malformed file: {self}"))
            }
            _ => StreaklineError::Io(self.to_string()),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_streakline())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → StreaklineError */
/* -------------------------------------------------------------------------- */

impl IntoStreaklineError for serde_json::Error {
    fn into_streakline(self) -> StreaklineError {
        use serde_json::error::Category;

        match self.classify() {
            Category::Io => StreaklineError::Io(self.to_string()),
            Category::Syntax | Category::Eof => {
                StreaklineError::InvalidInput(format!("invalid JSON at line {}: {self}", self.line()))
            }
            Category::Data => StreaklineError::InvalidInput(format!("unexpected JSON shape: {self}")),
        }
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_streakline())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → StreaklineError */
/* -------------------------------------------------------------------------- */

impl IntoStreaklineError for toml::de::Error {
    fn into_streakline(self) -> StreaklineError {
        StreaklineError::Config(format!("invalid TOML: {}", self.message()))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(value.into_streakline())
    }
}
