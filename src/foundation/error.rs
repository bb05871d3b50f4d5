/// Convenience result type used across glyphfx.
pub type GlyphfxResult<T> = Result<T, GlyphfxError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is raised while an effect is being built. Per-tick stepping is total once
/// construction succeeds.
#[derive(thiserror::Error, Debug)]
pub enum GlyphfxError {
    /// Malformed hex string or out-of-range palette index.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A path id was queried or activated without being registered.
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// A scene id was queried or activated without being registered.
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// Frame duration below one tick.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    /// Path speed that is not a positive finite number.
    #[error("invalid speed: {0}")]
    InvalidSpeed(String),

    /// Invalid user-provided or effect wiring data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphfxError {
    /// Build a [`GlyphfxError::InvalidColor`] value.
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    /// Build a [`GlyphfxError::PathNotFound`] value.
    pub fn path_not_found(id: impl Into<String>) -> Self {
        Self::PathNotFound(id.into())
    }

    /// Build a [`GlyphfxError::SceneNotFound`] value.
    pub fn scene_not_found(id: impl Into<String>) -> Self {
        Self::SceneNotFound(id.into())
    }

    /// Build a [`GlyphfxError::InvalidDuration`] value.
    pub fn invalid_duration(msg: impl Into<String>) -> Self {
        Self::InvalidDuration(msg.into())
    }

    /// Build a [`GlyphfxError::InvalidSpeed`] value.
    pub fn invalid_speed(msg: impl Into<String>) -> Self {
        Self::InvalidSpeed(msg.into())
    }

    /// Build a [`GlyphfxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphfxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GlyphfxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
