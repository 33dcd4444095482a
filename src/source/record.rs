/// Normalized `[clip_section_start, clip_section_end)` span of the output a
/// generation is meant to occupy. Either bound may be missing in the wild.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DomainWindow {
    #[serde(default)]
    pub clip_section_start: Option<f64>,
    #[serde(default)]
    pub clip_section_end: Option<f64>,
}

impl DomainWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            clip_section_start: Some(start),
            clip_section_end: Some(end),
        }
    }

    /// Both bounds, or `None` when the window is incomplete.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((self.clip_section_start?, self.clip_section_end?))
    }
}

/// One generation's JSON description.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GenerationRecord {
    pub generation_id: String,
    #[serde(default)]
    pub duration: Option<f64>,
    /// Absent means direct timed placement at `start_time`.
    #[serde(default)]
    pub inputs: Option<Vec<DomainWindow>>,
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub source_media_url: Option<String>,
    #[serde(default)]
    pub source_media_uuid: Option<String>,
}

impl GenerationRecord {
    pub fn new(generation_id: impl Into<String>, duration: f64) -> Self {
        Self {
            generation_id: generation_id.into(),
            duration: Some(duration),
            inputs: None,
            start_time: None,
            media_type: None,
            source_media_url: None,
            source_media_uuid: None,
        }
    }

    pub fn with_window(mut self, window: DomainWindow) -> Self {
        self.inputs.get_or_insert_with(Vec::new).push(window);
        self
    }

    pub fn with_start_time(mut self, start_time: f64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn locator(&self) -> String {
        self.source_media_url
            .clone()
            .unwrap_or_else(|| format!("file://{}.mp4", self.generation_id))
    }
}

/// A storyboard generation: an ordered list of timed steps.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoryboardRecord {
    #[serde(default)]
    pub generation_id: Option<String>,
    #[serde(default)]
    pub clips: Vec<StoryboardClip>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoryboardClip {
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub source_media_url: Option<String>,
    #[serde(default)]
    pub source_media_uuid: Option<String>,
}

impl StoryboardClip {
    /// `clip_{n}_{media_type}` with a 1-based step number.
    pub fn name(&self, index: usize) -> String {
        let media_type = self.media_type.as_deref().unwrap_or("unknown");
        format!("clip_{}_{media_type}", index + 1)
    }

    pub fn locator(&self, name: &str) -> String {
        if let Some(url) = &self.source_media_url {
            return url.clone();
        }
        let stem = self.source_media_uuid.as_deref().unwrap_or(name);
        format!("file://{stem}.mp4")
    }
}
