use super::*;
use crate::layout::track::TrackItem;
use crate::source::record::StoryboardClip;

fn cfg() -> BuildConfig {
    BuildConfig::default()
}

fn segments_on(tl: &Timeline, track: usize) -> Vec<(String, f64, f64)> {
    tl.tracks[track]
        .segments()
        .map(|s| (s.name.clone(), s.start, s.end()))
        .collect()
}

fn assert_no_overlap(tl: &Timeline) {
    for track in &tl.tracks {
        let segs: Vec<_> = track.segments().collect();
        for (i, a) in segs.iter().enumerate() {
            for b in &segs[i + 1..] {
                assert!(
                    !a.interval().overlaps(b.interval()),
                    "{} overlaps {} on {}",
                    a.name,
                    b.name,
                    track.name
                );
            }
        }
    }
}

#[test]
fn segment_that_fits_is_placed_whole() {
    let rec = GenerationRecord::new("g", 5.0).with_window(DomainWindow::new(0.0, 1.0));
    let tl = build_timeline(&[rec], &cfg()).unwrap();
    assert_eq!(tl.tracks.len(), 1);
    assert_eq!(segments_on(&tl, 0), vec![("g".to_string(), 0.0, 5.0)]);
    assert_eq!(tl.tracks[0].items().len(), 1);
}

#[test]
fn overflow_splits_into_head_and_tail() {
    let rec = GenerationRecord::new("g", 8.0).with_window(DomainWindow::new(0.0, 0.5));
    let tl = build_timeline(&[rec], &cfg()).unwrap();
    let all: Vec<_> = tl.tracks.iter().flat_map(|t| t.segments()).collect();
    assert_eq!(all.len(), 2);
    let head = all.iter().find(|s| s.name == "g_head").unwrap();
    let tail = all.iter().find(|s| s.name == "g_tail").unwrap();
    assert_eq!((head.start, head.end()), (0.0, 5.0));
    assert_eq!((tail.start, tail.end()), (5.0, 8.0));
    assert_eq!(head.duration + tail.duration, 8.0);
    assert_eq!(head.end(), tail.start);
}

#[test]
fn tail_ripples_to_another_track_when_blocked() {
    let mut ctx = BuildContext::new();
    ctx.place(0, "blocker", 5.0, 2.0, "file://b.mp4").unwrap();
    let placed = ctx
        .place_in_window("g", 8.0, "file://g.mp4", &DomainWindow::new(0.0, 0.5), 10.0)
        .unwrap();
    assert_eq!(
        placed,
        Some(WindowPlacement::Split {
            head_track: 0,
            tail_track: 1
        })
    );
    let tl = ctx.finish("t");
    assert_eq!(tl.tracks[1].items()[0], TrackItem::Gap { duration: 5.0 });
    assert_no_overlap(&tl);
}

#[test]
fn overlapping_requests_get_distinct_tracks() {
    let a = GenerationRecord::new("a", 5.0).with_start_time(0.0);
    let b = GenerationRecord::new("b", 4.0).with_start_time(2.0);
    let tl = build_timeline(&[a, b], &cfg()).unwrap();
    assert_eq!(tl.tracks.len(), 2);
    assert_eq!(segments_on(&tl, 0), vec![("a".to_string(), 0.0, 5.0)]);
    assert_eq!(segments_on(&tl, 1), vec![("b".to_string(), 2.0, 6.0)]);
}

#[test]
fn windows_with_missing_bounds_are_skipped() {
    let rec = GenerationRecord::new("g", 3.0)
        .with_window(DomainWindow {
            clip_section_start: Some(0.2),
            clip_section_end: None,
        })
        .with_window(DomainWindow::default());
    let tl = build_timeline(&[rec], &cfg()).unwrap();
    assert!(tl.is_empty());
    assert!(tl.tracks.is_empty());
}

#[test]
fn inverted_window_is_skipped() {
    let rec = GenerationRecord::new("g", 3.0).with_window(DomainWindow::new(0.6, 0.2));
    let tl = build_timeline(&[rec], &cfg()).unwrap();
    assert!(tl.is_empty());
}

#[test]
fn each_window_gets_its_own_placement() {
    let rec = GenerationRecord::new("g", 2.0)
        .with_window(DomainWindow::new(0.0, 0.5))
        .with_window(DomainWindow::new(0.5, 1.0));
    let tl = build_timeline(&[rec], &cfg()).unwrap();
    assert_eq!(tl.tracks.len(), 1);
    assert_eq!(
        segments_on(&tl, 0),
        vec![("g".to_string(), 0.0, 2.0), ("g".to_string(), 5.0, 7.0)]
    );
    assert_eq!(tl.tracks[0].items()[1], TrackItem::Gap { duration: 3.0 });
}

#[test]
fn missing_duration_defaults_to_base_duration() {
    let mut rec = GenerationRecord::new("g", 0.0).with_window(DomainWindow::new(0.0, 1.0));
    rec.duration = None;
    let tl = build_timeline(&[rec], &cfg()).unwrap();
    assert_eq!(segments_on(&tl, 0), vec![("g".to_string(), 0.0, 10.0)]);
}

#[test]
fn non_positive_duration_record_is_skipped() {
    let rec = GenerationRecord::new("g", 0.0).with_window(DomainWindow::new(0.0, 1.0));
    let tl = build_timeline(&[rec], &cfg()).unwrap();
    assert!(tl.is_empty());
}

#[test]
fn direct_placement_never_splits() {
    let rec = GenerationRecord::new("long", 30.0).with_start_time(4.0);
    let tl = build_timeline(&[rec], &cfg()).unwrap();
    assert_eq!(segments_on(&tl, 0), vec![("long".to_string(), 4.0, 34.0)]);
}

#[test]
fn placing_onto_an_occupied_span_is_an_invariant_violation() {
    let mut ctx = BuildContext::new();
    ctx.place(0, "a", 0.0, 5.0, "file://a.mp4").unwrap();
    let err = ctx.place(0, "b", 2.0, 4.0, "file://b.mp4").unwrap_err();
    assert!(err.is_invariant_violation());
    match err {
        CascadeError::Overlap {
            segment,
            track,
            start,
            end,
        } => {
            assert_eq!(segment, "b");
            assert_eq!(track, 0);
            assert_eq!((start, end), (2.0, 6.0));
        }
        other => panic!("expected overlap, got {other:?}"),
    }
    assert_eq!(ctx.ledger().intervals(0).len(), 1);
}

#[test]
fn place_rejects_non_positive_duration() {
    let mut ctx = BuildContext::new();
    let err = ctx.place(0, "a", 0.0, 0.0, "x").unwrap_err();
    assert!(matches!(err, CascadeError::Validation(_)));
}

#[test]
fn earlier_hole_on_a_track_is_back_filled() {
    let a = GenerationRecord::new("late", 2.0).with_start_time(6.0);
    let b = GenerationRecord::new("early", 2.0).with_start_time(1.0);
    let tl = build_timeline(&[a, b], &cfg()).unwrap();
    assert_eq!(tl.tracks.len(), 1);
    assert_eq!(
        segments_on(&tl, 0),
        vec![
            ("early".to_string(), 1.0, 3.0),
            ("late".to_string(), 6.0, 8.0)
        ]
    );
    assert_eq!(tl.tracks[0].cursor(), 8.0);
}

#[test]
fn dense_batch_keeps_every_track_overlap_free() {
    let mut records = Vec::new();
    for i in 0..12 {
        let x0 = f64::from(i % 4) * 0.2;
        records.push(
            GenerationRecord::new(format!("g{i}"), 1.0 + f64::from(i % 5))
                .with_window(DomainWindow::new(x0, x0 + 0.25)),
        );
    }
    let tl = build_timeline(&records, &cfg()).unwrap();
    assert_no_overlap(&tl);
    for track in &tl.tracks {
        let mut pos = 0.0;
        for item in track.items() {
            if let TrackItem::Segment(s) = item {
                assert!((s.start - pos).abs() < 1e-9);
            }
            pos += item.duration();
        }
    }
}

#[test]
fn storyboard_steps_stack_on_collision() {
    let sb = StoryboardRecord {
        generation_id: Some("sb".to_string()),
        clips: vec![
            StoryboardClip {
                start_time: Some(0.0),
                duration: Some(4.0),
                media_type: Some("video".to_string()),
                ..StoryboardClip::default()
            },
            StoryboardClip {
                start_time: Some(2.0),
                duration: None,
                media_type: Some("prompt".to_string()),
                ..StoryboardClip::default()
            },
            StoryboardClip {
                start_time: Some(4.0),
                duration: Some(1.0),
                ..StoryboardClip::default()
            },
        ],
    };
    let tl = build_storyboard_timeline(&sb, &cfg()).unwrap();
    assert_eq!(tl.name, "Storyboard Unwrapped");
    assert_eq!(tl.tracks.len(), 2);
    assert_eq!(
        segments_on(&tl, 0),
        vec![
            ("clip_1_video".to_string(), 0.0, 4.0),
            ("clip_3_unknown".to_string(), 4.0, 5.0)
        ]
    );
    let prompt = tl.tracks[1].segments().next().unwrap();
    assert_eq!(prompt.name, "clip_2_prompt");
    assert!((prompt.duration - 0.1).abs() < 1e-12);
}

#[test]
fn invalid_config_fails_before_placing() {
    let mut config = cfg();
    config.base_duration_secs = -1.0;
    assert!(build_timeline(&[], &config).is_err());
}
