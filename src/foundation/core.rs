use crate::foundation::error::{CascadeError, CascadeResult};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> CascadeResult<Self> {
        if start.0 > end.0 {
            return Err(CascadeError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> CascadeResult<Self> {
        if den == 0 {
            return Err(CascadeError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(CascadeError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn validate(self) -> CascadeResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Nearest-frame conversion; negative inputs clamp to frame 0.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }

    /// Fractional frame value, as interchange formats carry it.
    pub fn secs_to_frames_exact(self, secs: f64) -> f64 {
        secs * self.as_f64()
    }
}

/// Half-open overlap test shared by the ledger and the track splicer.
pub fn intervals_overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> bool {
    a_start < b_end && a_end > b_start
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
