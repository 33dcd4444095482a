use crate::foundation::core::intervals_overlap;

/// A half-open `[start, end)` span in seconds recorded on one track.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacedInterval {
    pub start: f64,
    pub end: f64, // exclusive
}

impl PlacedInterval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn overlaps(self, other: PlacedInterval) -> bool {
        intervals_overlap(self.start, self.end, other.start, other.end)
    }
}

/// Per-track record of everything placed so far.
///
/// Track indices are dense: `allocate` only ever grows the ledger by one.
#[derive(Clone, Debug, Default)]
pub struct OccupancyLedger {
    tracks: Vec<Vec<PlacedInterval>>,
}

impl OccupancyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn intervals(&self, track: usize) -> &[PlacedInterval] {
        self.tracks.get(track).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `false` iff some recorded `(s, e)` on `track` has `start < e && end > s`.
    /// Tracks that do not exist yet are free.
    pub fn is_free(&self, track: usize, start: f64, end: f64) -> bool {
        let want = PlacedInterval::new(start, end);
        !self.intervals(track).iter().any(|iv| iv.overlaps(want))
    }

    /// First track (ascending) that can hold `[start, end)`, appending a new
    /// empty track when none can.
    pub fn allocate(&mut self, start: f64, end: f64) -> usize {
        if let Some(idx) = (0..self.tracks.len()).find(|&idx| self.is_free(idx, start, end)) {
            return idx;
        }
        self.tracks.push(Vec::new());
        self.tracks.len() - 1
    }

    /// Appends without checking; callers test `is_free` first.
    pub fn record(&mut self, track: usize, interval: PlacedInterval) {
        if self.tracks.len() <= track {
            self.tracks.resize_with(track + 1, Vec::new);
        }
        self.tracks[track].push(interval);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/ledger.rs"]
mod tests;
