use super::*;
use crate::source::record::DomainWindow;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_source").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn parses_blend_record_with_windows() {
    let rec = parse_generation_record(
        r#"{
            "generation_id": "gen_01",
            "duration": 8.0,
            "inputs": [
                { "clip_section_start": 0.0, "clip_section_end": 0.5 },
                { "clip_section_start": 0.5 }
            ],
            "prompt": "ignored"
        }"#,
    )
    .unwrap();
    assert_eq!(rec.generation_id, "gen_01");
    assert_eq!(rec.duration, Some(8.0));
    let inputs = rec.inputs.as_ref().unwrap();
    assert_eq!(inputs[0], DomainWindow::new(0.0, 0.5));
    assert_eq!(inputs[1].bounds(), None);
    assert_eq!(rec.locator(), "file://gen_01.mp4");
}

#[test]
fn explicit_url_wins_over_derived_locator() {
    let rec = parse_generation_record(
        r#"{ "generation_id": "g", "source_media_url": "https://cdn/x.mp4" }"#,
    )
    .unwrap();
    assert_eq!(rec.locator(), "https://cdn/x.mp4");
    assert_eq!(rec.duration, None);
    assert_eq!(rec.inputs, None);
}

#[test]
fn missing_generation_id_is_a_serde_error() {
    let err = parse_generation_record(r#"{ "duration": 3 }"#).unwrap_err();
    assert!(matches!(err, CascadeError::Serde(_)));
}

#[test]
fn storyboard_clip_names_and_locators() {
    let sb = parse_storyboard(
        r#"{
            "generation_id": "sb",
            "clips": [
                { "start_time": 0, "duration": 2, "media_type": "video", "source_media_uuid": "abc" },
                { "start_time": 1 }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(sb.clips[0].name(0), "clip_1_video");
    assert_eq!(sb.clips[0].locator("clip_1_video"), "file://abc.mp4");
    assert_eq!(sb.clips[1].name(1), "clip_2_unknown");
    assert_eq!(sb.clips[1].locator("clip_2_unknown"), "file://clip_2_unknown.mp4");
}

#[test]
fn directory_loading_is_sorted_and_skips_non_json() {
    let dir = scratch_dir("sorted");
    std::fs::write(dir.join("b.json"), r#"{ "generation_id": "second" }"#).unwrap();
    std::fs::write(dir.join("a.json"), r#"{ "generation_id": "first" }"#).unwrap();
    std::fs::write(dir.join("notes.txt"), "not a record").unwrap();

    let records = load_generation_records(&dir).unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.generation_id.as_str()).collect();
    assert_eq!(ids, ["first", "second"]);
}

#[test]
fn bad_file_is_named_in_error() {
    let dir = scratch_dir("bad");
    std::fs::write(dir.join("broken.json"), "{ not json").unwrap();
    let err = load_generation_records(&dir).unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn missing_directory_is_reported() {
    let err = load_generation_records(Path::new("target/unit_source/nope")).unwrap_err();
    assert!(err.to_string().contains("read directory"));
}
