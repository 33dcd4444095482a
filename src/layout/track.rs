use crate::layout::ledger::PlacedInterval;

/// Slack when comparing accumulated track positions against requested starts.
pub const POSITION_EPSILON_SECS: f64 = 1e-9;

/// One placed piece of media. `start` is the absolute timeline position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub name: String,
    pub start: f64,
    pub duration: f64,
    pub locator: String,
}

impl Segment {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn interval(&self) -> PlacedInterval {
        PlacedInterval::new(self.start, self.end())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackItem {
    Gap { duration: f64 },
    Segment(Segment),
}

impl TrackItem {
    pub fn duration(&self) -> f64 {
        match self {
            Self::Gap { duration } => *duration,
            Self::Segment(seg) => seg.duration,
        }
    }

    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Self::Segment(seg) => Some(seg),
            Self::Gap { .. } => None,
        }
    }
}

/// A lane of gaps and segments laid end to end.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Track {
    pub name: String,
    items: Vec<TrackItem>,
}

/// The requested span is neither past the cursor nor inside a single gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpliceConflict;

impl Track {
    /// Tracks are named `V1`, `V2`, … after their zero-based index.
    pub fn for_index(index: usize) -> Self {
        Self {
            name: format!("V{}", index + 1),
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[TrackItem] {
        &self.items
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.items.iter().filter_map(TrackItem::as_segment)
    }

    /// Sum of entry durations, i.e. where the next appended entry would start.
    pub fn cursor(&self) -> f64 {
        self.items.iter().map(TrackItem::duration).sum()
    }

    /// Places `seg` at its absolute start.
    ///
    /// Past the cursor this appends (bridging with a gap); before the cursor
    /// the segment must fit inside one existing gap, which is split around it.
    pub fn insert(&mut self, seg: Segment) -> Result<(), SpliceConflict> {
        let cursor = self.cursor();
        let lead = seg.start - cursor;
        if lead > POSITION_EPSILON_SECS {
            self.items.push(TrackItem::Gap { duration: lead });
            self.items.push(TrackItem::Segment(seg));
            return Ok(());
        }
        if lead >= -POSITION_EPSILON_SECS {
            self.items.push(TrackItem::Segment(seg));
            return Ok(());
        }
        self.splice_into_gap(seg)
    }

    fn splice_into_gap(&mut self, seg: Segment) -> Result<(), SpliceConflict> {
        let mut pos = 0.0;
        for idx in 0..self.items.len() {
            let len = self.items[idx].duration();
            let gap_end = pos + len;
            let is_gap = matches!(self.items[idx], TrackItem::Gap { .. });
            if is_gap
                && seg.start >= pos - POSITION_EPSILON_SECS
                && seg.end() <= gap_end + POSITION_EPSILON_SECS
            {
                let before = seg.start - pos;
                let after = gap_end - seg.end();
                let mut replacement = Vec::with_capacity(3);
                if before > POSITION_EPSILON_SECS {
                    replacement.push(TrackItem::Gap { duration: before });
                }
                replacement.push(TrackItem::Segment(seg));
                if after > POSITION_EPSILON_SECS {
                    replacement.push(TrackItem::Gap { duration: after });
                }
                self.items.splice(idx..=idx, replacement);
                return Ok(());
            }
            if pos > seg.start {
                break;
            }
            pos = gap_end;
        }
        Err(SpliceConflict)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl Timeline {
    pub fn segment_count(&self) -> usize {
        self.tracks.iter().map(|t| t.segments().count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segment_count() == 0
    }

    /// Longest track cursor.
    pub fn duration(&self) -> f64 {
        self.tracks.iter().map(Track::cursor).fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/track.rs"]
mod tests;
