/// Convenience result type used across the crate.
pub type TimestepResult<T> = Result<T, TimestepError>;

/// Error taxonomy for stepper construction and timeline derivation.
///
/// Every variant is raised while building steppers or deriving the animation range,
/// never during frame stepping itself.
#[derive(thiserror::Error, Debug)]
pub enum TimestepError {
    /// A list-based stepper was built from zero instants.
    #[error("list stepper error: need at least one instant")]
    EmptyListStepper,

    /// A raw time extent (or one of its instants or periods) could not be parsed.
    #[error("malformed time extent: {0}")]
    MalformedTimeExtent(String),

    /// Neither the animation nor any layer declares a resolution.
    #[error("derivation error: animation resolution time missing")]
    MissingResolution,

    /// Neither a begin delta nor any layer begin time is available.
    #[error("derivation error: animation begin time missing")]
    MissingBeginDate,

    /// Neither an end delta nor any layer end time is available.
    #[error("derivation error: animation end time missing")]
    MissingEndDate,

    /// Capability time data was required (`join`, `auto`) but is not available.
    #[error("capability time missing: {0}")]
    MissingCapabilityTime(String),

    /// Invalid user-provided configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TimestepError {
    /// Build a [`TimestepError::MalformedTimeExtent`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedTimeExtent(msg.into())
    }

    /// Build a [`TimestepError::MissingCapabilityTime`] value.
    pub fn missing_capability(msg: impl Into<String>) -> Self {
        Self::MissingCapabilityTime(msg.into())
    }

    /// Build a [`TimestepError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TimestepError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
