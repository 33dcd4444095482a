use crate::{
    config::BuildConfig,
    foundation::error::{CascadeError, CascadeResult},
    layout::{
        ledger::OccupancyLedger,
        track::{Segment, Timeline, Track},
    },
    source::record::{DomainWindow, GenerationRecord, StoryboardRecord},
};

/// Outcome of laying out one domain window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowPlacement {
    /// The whole segment fit inside the window.
    Whole { track: usize },
    /// Overflow: head fills the window, tail ripples to the window's end.
    Split { head_track: usize, tail_track: usize },
}

/// Ledger and tracks for a single build. Nothing here outlives the build.
#[derive(Debug, Default)]
pub struct BuildContext {
    ledger: OccupancyLedger,
    tracks: Vec<Track>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &OccupancyLedger {
        &self.ledger
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn allocate(&mut self, start: f64, end: f64) -> usize {
        self.ledger.allocate(start, end)
    }

    /// Appends a segment to `track_index` at absolute time `start`.
    ///
    /// The span must be free on that track; anything else means the caller
    /// skipped allocation and is reported as [`CascadeError::Overlap`].
    pub fn place(
        &mut self,
        track_index: usize,
        name: &str,
        start: f64,
        duration: f64,
        locator: &str,
    ) -> CascadeResult<()> {
        if !start.is_finite() || start < 0.0 {
            return Err(CascadeError::validation(format!(
                "segment '{name}' has invalid start {start}"
            )));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(CascadeError::validation(format!(
                "segment '{name}' has invalid duration {duration}"
            )));
        }
        let end = start + duration;
        if !self.ledger.is_free(track_index, start, end) {
            return Err(CascadeError::overlap(name, track_index, start, end));
        }

        while self.tracks.len() <= track_index {
            self.tracks.push(Track::for_index(self.tracks.len()));
        }
        let segment = Segment {
            name: name.to_string(),
            start,
            duration,
            locator: locator.to_string(),
        };
        let interval = segment.interval();
        self.tracks[track_index]
            .insert(segment)
            .map_err(|_| CascadeError::overlap(name, track_index, start, end))?;
        self.ledger.record(track_index, interval);

        tracing::debug!(track = track_index, name, start, end, "placed segment");
        Ok(())
    }

    /// Allocate, then place.
    pub fn place_on_free_track(
        &mut self,
        name: &str,
        start: f64,
        duration: f64,
        locator: &str,
    ) -> CascadeResult<usize> {
        let track = self.allocate(start, start + duration);
        self.place(track, name, start, duration, locator)?;
        Ok(track)
    }

    /// Lays out `duration` seconds of `id` against one normalized window.
    ///
    /// Returns `Ok(None)` when the window is incomplete or unusable; those are
    /// skipped rather than failing the batch.
    pub fn place_in_window(
        &mut self,
        id: &str,
        duration: f64,
        locator: &str,
        window: &DomainWindow,
        base_duration: f64,
    ) -> CascadeResult<Option<WindowPlacement>> {
        let Some((x_start, x_end)) = window.bounds() else {
            tracing::debug!(id, "skipping window with missing bounds");
            return Ok(None);
        };
        if !x_start.is_finite() || !x_end.is_finite() || x_start < 0.0 || x_end <= x_start {
            tracing::warn!(id, x_start, x_end, "skipping malformed domain window");
            return Ok(None);
        }

        let domain_secs = (x_end - x_start) * base_duration;
        let insert_at = x_start * base_duration;

        if duration <= domain_secs {
            let track = self.place_on_free_track(id, insert_at, duration, locator)?;
            return Ok(Some(WindowPlacement::Whole { track }));
        }

        let head_track =
            self.place_on_free_track(&format!("{id}_head"), insert_at, domain_secs, locator)?;
        let overflow = duration - domain_secs;
        let tail_track = self.place_on_free_track(
            &format!("{id}_tail"),
            insert_at + domain_secs,
            overflow,
            locator,
        )?;
        Ok(Some(WindowPlacement::Split {
            head_track,
            tail_track,
        }))
    }

    /// One placement sequence per window, or a direct timed placement when the
    /// record carries no windows at all.
    pub fn place_record(
        &mut self,
        record: &GenerationRecord,
        config: &BuildConfig,
    ) -> CascadeResult<()> {
        let id = record.generation_id.as_str();
        let duration = record.duration.unwrap_or(config.base_duration_secs);
        if !duration.is_finite() || duration <= 0.0 {
            tracing::warn!(id, duration, "skipping record with non-positive duration");
            return Ok(());
        }
        let locator = record.locator();

        match &record.inputs {
            Some(windows) => {
                for window in windows {
                    self.place_in_window(
                        id,
                        duration,
                        &locator,
                        window,
                        config.base_duration_secs,
                    )?;
                }
            }
            None => {
                let start = record.start_time.unwrap_or(0.0);
                if !start.is_finite() || start < 0.0 {
                    tracing::warn!(id, start, "skipping record with negative start_time");
                    return Ok(());
                }
                self.place_on_free_track(id, start, duration, &locator)?;
            }
        }
        Ok(())
    }

    pub fn finish(self, name: impl Into<String>) -> Timeline {
        Timeline {
            name: name.into(),
            tracks: self.tracks,
        }
    }
}

/// Lays out a batch of generation records in arrival order.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn build_timeline(
    records: &[GenerationRecord],
    config: &BuildConfig,
) -> CascadeResult<Timeline> {
    config.validate()?;
    let mut ctx = BuildContext::new();
    for record in records {
        ctx.place_record(record, config)?;
    }
    let timeline = ctx.finish(config.timeline_name.clone());
    tracing::info!(
        tracks = timeline.tracks.len(),
        segments = timeline.segment_count(),
        "timeline built"
    );
    Ok(timeline)
}

/// Unwraps storyboard steps at their declared times, stacking collisions.
#[tracing::instrument(skip_all, fields(clips = storyboard.clips.len()))]
pub fn build_storyboard_timeline(
    storyboard: &StoryboardRecord,
    config: &BuildConfig,
) -> CascadeResult<Timeline> {
    config.validate()?;
    let mut ctx = BuildContext::new();
    for (idx, clip) in storyboard.clips.iter().enumerate() {
        let name = clip.name(idx);
        let start = clip.start_time.unwrap_or(0.0);
        if !start.is_finite() || start < 0.0 {
            tracing::warn!(
                name = name.as_str(),
                start,
                "skipping storyboard step with negative start_time"
            );
            continue;
        }
        // Prompt-only steps get a placeholder length so they stay visible.
        let duration = clip
            .duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(config.storyboard_clip_duration_secs);
        let locator = clip.locator(&name);
        ctx.place_on_free_track(&name, start, duration, &locator)?;
    }
    let timeline = ctx.finish(config.storyboard_name.clone());
    tracing::info!(
        tracks = timeline.tracks.len(),
        segments = timeline.segment_count(),
        "storyboard unwrapped"
    );
    Ok(timeline)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/planner.rs"]
mod tests;
