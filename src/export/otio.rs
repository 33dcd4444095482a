use serde_json::{Value, json};

use crate::{
    export::TimelineWriter,
    foundation::core::Fps,
    foundation::error::{CascadeError, CascadeResult},
    layout::track::{Timeline, Track, TrackItem},
};

/// OpenTimelineIO JSON (`.otio`), times expressed at `rate`.
#[derive(Clone, Copy, Debug)]
pub struct OtioJson {
    pub rate: Fps,
}

impl OtioJson {
    pub fn new(rate: Fps) -> Self {
        Self { rate }
    }

    fn rational_time(&self, secs: f64) -> Value {
        json!({
            "OTIO_SCHEMA": "RationalTime.1",
            "rate": self.rate.as_f64(),
            "value": self.rate.secs_to_frames_exact(secs),
        })
    }

    fn time_range(&self, start_secs: f64, duration_secs: f64) -> Value {
        json!({
            "OTIO_SCHEMA": "TimeRange.1",
            "duration": self.rational_time(duration_secs),
            "start_time": self.rational_time(start_secs),
        })
    }

    fn item(&self, item: &TrackItem) -> Value {
        match item {
            TrackItem::Gap { duration } => json!({
                "OTIO_SCHEMA": "Gap.1",
                "effects": [],
                "markers": [],
                "metadata": {},
                "name": "",
                "source_range": self.time_range(0.0, *duration),
            }),
            TrackItem::Segment(seg) => json!({
                "OTIO_SCHEMA": "Clip.1",
                "effects": [],
                "markers": [],
                "media_reference": {
                    "OTIO_SCHEMA": "ExternalReference.1",
                    "available_range": null,
                    "metadata": {},
                    "name": "",
                    "target_url": seg.locator,
                },
                "metadata": {},
                "name": seg.name,
                "source_range": self.time_range(0.0, seg.duration),
            }),
        }
    }

    fn track(&self, track: &Track) -> Value {
        let children: Vec<Value> = track.items().iter().map(|i| self.item(i)).collect();
        json!({
            "OTIO_SCHEMA": "Track.1",
            "children": children,
            "effects": [],
            "kind": "Video",
            "markers": [],
            "metadata": {},
            "name": track.name,
            "source_range": null,
        })
    }

    pub fn to_value(&self, timeline: &Timeline) -> Value {
        let tracks: Vec<Value> = timeline.tracks.iter().map(|t| self.track(t)).collect();
        json!({
            "OTIO_SCHEMA": "Timeline.1",
            "global_start_time": null,
            "metadata": {},
            "name": timeline.name,
            "tracks": {
                "OTIO_SCHEMA": "Stack.1",
                "children": tracks,
                "effects": [],
                "markers": [],
                "metadata": {},
                "name": "tracks",
                "source_range": null,
            },
        })
    }
}

impl TimelineWriter for OtioJson {
    fn write_timeline(&self, timeline: &Timeline) -> CascadeResult<String> {
        serde_json::to_string_pretty(&self.to_value(timeline))
            .map_err(|e| CascadeError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/otio.rs"]
mod tests;
