//! Geometry parameter validation errors.

/// Errors produced when a generator is given malformed parameters.
///
/// Generation fails for that call only; the caller is expected to keep
/// rendering other bodies and retry on the next frame with corrected
/// parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A ring needs at least 3 segments to enclose any area.
    #[error("width segments must be at least 3, got {0}")]
    TooFewSegments(u32),

    /// A sphere needs at least one latitude band between its poles.
    #[error("height segments must be at least 1, got {0}")]
    NoLatitudeBands(u32),

    /// Radius must be strictly positive.
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f32),
}
