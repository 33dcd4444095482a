use crate::{
    foundation::core::FrameRange,
    foundation::error::{CascadeError, CascadeResult},
};

/// Piecewise-linear blend weight over `[fade_in, fade_out]`, in frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlendEnvelope {
    pub fade_in: u64,
    pub fade_out: u64,
}

impl BlendEnvelope {
    pub fn ramp_frames(self) -> u64 {
        self.fade_out.saturating_sub(self.fade_in)
    }

    /// 0 before `fade_in`, linear across the ramp, 1 after `fade_out`.
    pub fn weight(self, t: f64) -> f64 {
        let fade_in = self.fade_in as f64;
        let fade_out = self.fade_out as f64;
        if t < fade_in {
            return 0.0;
        }
        if t >= fade_out {
            return 1.0;
        }
        (t - fade_in) / (fade_out - fade_in)
    }
}

/// Splits `window` into `count` slices, one envelope per stacked segment.
///
/// Every slice is `span / count` frames (floor). Frames left over past the
/// last ramp are held at full weight by the last segment. A zero-frame slice
/// cannot be ramped and is rejected.
pub fn crossfade_envelopes(window: FrameRange, count: usize) -> CascadeResult<Vec<BlendEnvelope>> {
    let degenerate = || CascadeError::DegenerateCrossfade {
        start: window.start.0,
        end: window.end.0,
        segments: count,
        names: Vec::new(),
    };
    if count == 0 {
        return Err(degenerate());
    }
    let slice = window.len_frames() / count as u64;
    if slice == 0 {
        return Err(degenerate());
    }

    let envelopes = (0..count as u64)
        .map(|i| {
            let fade_in = window.start.0 + i * slice;
            BlendEnvelope {
                fade_in,
                fade_out: fade_in + slice,
            }
        })
        .collect();
    Ok(envelopes)
}

#[cfg(test)]
#[path = "../../tests/unit/graph/envelope.rs"]
mod tests;
