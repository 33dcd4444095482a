use std::collections::BTreeMap;

use crate::{
    foundation::core::{Fps, FrameIndex, FrameRange},
    layout::track::{Segment, Timeline, Track},
};

/// Which tracks feed the grouper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupScope {
    /// Only the first track (`V1`).
    #[default]
    PrimaryTrack,
    /// Every track, lowest index first.
    AllTracks,
}

/// Segments sharing one frame window, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainGroup {
    pub window: FrameRange,
    pub segments: Vec<Segment>,
}

/// `start = round(start_s * fps)`, `end = start + round(duration_s * fps)`.
///
/// Windows closer than half a frame therefore share a key.
pub fn segment_window(segment: &Segment, fps: Fps) -> FrameRange {
    let start = fps.secs_to_frames_round(segment.start);
    let len = fps.secs_to_frames_round(segment.duration);
    FrameRange {
        start: FrameIndex(start),
        end: FrameIndex(start.saturating_add(len)),
    }
}

/// Buckets segments by window, preserving first-seen group order.
#[derive(Debug)]
pub struct DomainGrouper {
    fps: Fps,
    groups: Vec<DomainGroup>,
    by_window: BTreeMap<FrameRange, usize>,
}

impl DomainGrouper {
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            groups: Vec::new(),
            by_window: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, segment: &Segment) {
        let window = segment_window(segment, self.fps);
        match self.by_window.get(&window) {
            Some(&idx) => self.groups[idx].segments.push(segment.clone()),
            None => {
                self.by_window.insert(window, self.groups.len());
                self.groups.push(DomainGroup {
                    window,
                    segments: vec![segment.clone()],
                });
            }
        }
    }

    pub fn push_track(&mut self, track: &Track) {
        for segment in track.segments() {
            self.push(segment);
        }
    }

    pub fn finish(self) -> Vec<DomainGroup> {
        self.groups
    }
}

pub fn group_track(track: &Track, fps: Fps) -> Vec<DomainGroup> {
    let mut grouper = DomainGrouper::new(fps);
    grouper.push_track(track);
    grouper.finish()
}

pub fn group_timeline(timeline: &Timeline, fps: Fps, scope: GroupScope) -> Vec<DomainGroup> {
    let mut grouper = DomainGrouper::new(fps);
    match scope {
        GroupScope::PrimaryTrack => {
            if let Some(track) = timeline.tracks.first() {
                grouper.push_track(track);
            }
        }
        GroupScope::AllTracks => {
            for track in &timeline.tracks {
                grouper.push_track(track);
            }
        }
    }
    grouper.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/graph/group.rs"]
mod tests;
