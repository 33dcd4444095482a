/// Convenience result type used across cascade.
pub type CascadeResult<T> = Result<T, CascadeError>;

/// Top-level error taxonomy used by build APIs.
#[derive(thiserror::Error, Debug)]
pub enum CascadeError {
    /// Invalid configuration or unusable input values.
    #[error("validation error: {0}")]
    Validation(String),

    /// A placement collided with an interval already recorded on its track.
    ///
    /// The allocator only hands out free tracks, so this is a planning bug and
    /// the build must stop.
    #[error(
        "placement invariant violated: segment '{segment}' overlaps on track {track} at [{start}, {end})"
    )]
    Overlap {
        /// Name of the segment being placed.
        segment: String,
        /// Zero-based track index.
        track: usize,
        /// Requested start in seconds.
        start: f64,
        /// Requested end in seconds.
        end: f64,
    },

    /// A crossfade group whose slices would be zero frames long.
    #[error(
        "degenerate crossfade: {segments} segment(s) {names:?} cannot share window [{start}, {end}) frames"
    )]
    DegenerateCrossfade {
        /// Window start frame.
        start: u64,
        /// Window end frame (exclusive).
        end: u64,
        /// Number of segments in the group.
        segments: usize,
        /// Names of the grouped segments, when known.
        names: Vec<String>,
    },

    /// There was nothing to composite.
    #[error("empty graph: no segments to composite, output node would have no input")]
    EmptyGraph,

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CascadeError {
    /// Build a [`CascadeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CascadeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`CascadeError::Overlap`] value.
    pub fn overlap(segment: impl Into<String>, track: usize, start: f64, end: f64) -> Self {
        Self::Overlap {
            segment: segment.into(),
            track,
            start,
            end,
        }
    }

    /// True for errors that indicate a bug in planning rather than bad input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::Overlap { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
