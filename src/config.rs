//! Build-time constants for one layout + compositing run.
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! base_duration_secs = 20.0
//! group_scope = "all_tracks"
//!
//! [comp_fps]
//! num = 25
//! den = 1
//! ```
use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::Fps,
    foundation::error::{CascadeError, CascadeResult},
    graph::group::GroupScope,
};

/// Rate the timeline interchange output is expressed in.
pub const DEFAULT_TIMELINE_FPS: Fps = Fps { num: 24, den: 1 };
/// Rate the compositing graph is expressed in (23.976).
pub const DEFAULT_COMP_FPS: Fps = Fps {
    num: 24000,
    den: 1001,
};
/// Output duration a normalized domain window is relative to.
pub const DEFAULT_BASE_DURATION_SECS: f64 = 10.0;
/// Duration given to storyboard steps that declare none.
pub const DEFAULT_STORYBOARD_CLIP_SECS: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub timeline_fps: Fps,
    pub comp_fps: Fps,
    pub base_duration_secs: f64,
    pub storyboard_clip_duration_secs: f64,
    pub timeline_name: String,
    pub storyboard_name: String,
    pub group_scope: GroupScope,
    /// Id of the node the first crossfade group blends over.
    pub initial_background: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            timeline_fps: DEFAULT_TIMELINE_FPS,
            comp_fps: DEFAULT_COMP_FPS,
            base_duration_secs: DEFAULT_BASE_DURATION_SECS,
            storyboard_clip_duration_secs: DEFAULT_STORYBOARD_CLIP_SECS,
            timeline_name: "Cascade Timeline".to_string(),
            storyboard_name: "Storyboard Unwrapped".to_string(),
            group_scope: GroupScope::PrimaryTrack,
            initial_background: "media_in".to_string(),
        }
    }
}

impl BuildConfig {
    pub fn from_path(path: impl AsRef<Path>) -> CascadeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_toml_str(&text).map_err(|e| match e {
            CascadeError::Serde(msg) => {
                CascadeError::serde(format!("config '{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn from_toml_str(text: &str) -> CascadeResult<Self> {
        let cfg: Self = toml::from_str(text).map_err(|e| CascadeError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CascadeResult<()> {
        self.timeline_fps.validate()?;
        self.comp_fps.validate()?;
        if !self.base_duration_secs.is_finite() || self.base_duration_secs <= 0.0 {
            return Err(CascadeError::validation(
                "base_duration_secs must be finite and > 0",
            ));
        }
        if !self.storyboard_clip_duration_secs.is_finite()
            || self.storyboard_clip_duration_secs <= 0.0
        {
            return Err(CascadeError::validation(
                "storyboard_clip_duration_secs must be finite and > 0",
            ));
        }
        if self.initial_background.trim().is_empty() {
            return Err(CascadeError::validation(
                "initial_background must be non-empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
