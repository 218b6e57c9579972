// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end export: snapshot in, `.edl` files on disk out.

use cutlist_edl::{
    export_timeline, ExportError, FrameRate, TimelineEntry, TimelineSnapshot,
};

fn two_channel_snapshot() -> TimelineSnapshot {
    let mut snapshot = TimelineSnapshot::new(FrameRate::whole(25));
    snapshot.add_entry(TimelineEntry::movie(2, 0, 100, 0, "top_a.mov"));
    snapshot.add_entry(TimelineEntry::movie(2, 100, 50, 10, "top_b.mov"));
    snapshot.add_entry(TimelineEntry::movie(1, 25, 75, 0, "under.mov"));
    snapshot.add_entry(TimelineEntry::sound(1, 0, 200, 0, "mix.wav"));
    snapshot
}

#[test]
fn test_export_writes_one_file_per_channel_per_medium() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("scene.edl");

    let report = export_timeline(&two_channel_snapshot(), &base).unwrap();
    assert!(report.warnings.is_empty());

    let names: Vec<String> = report
        .written
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["scene_V_01.edl", "scene_V_02.edl", "scene_A_02.edl"]);

    for path in &report.written {
        assert!(path.exists(), "missing {}", path.display());
    }

    let top = std::fs::read_to_string(dir.path().join("scene_V_01.edl")).unwrap();
    assert!(top.starts_with("TITLE: scene_V_01  25 fps\nFCM: NON DROP FRAME\n\n001  "));
    assert!(top.contains("* FROM CLIP NAME: top_a.mov"));

    let audio = std::fs::read_to_string(dir.path().join("scene_A_02.edl")).unwrap();
    assert!(audio.contains(" A     C "));
    assert!(audio.contains("* FROM CLIP NAME: mix.wav"));
}

#[test]
fn test_unsupported_rate_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("scene.edl");

    let mut snapshot = two_channel_snapshot();
    snapshot.frame_rate = FrameRate::new(30000, 1001);

    let err = export_timeline(&snapshot, &base).unwrap_err();
    assert!(matches!(err, ExportError::UnsupportedFrameRate { fps } if fps == 29.97));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_write_failure_names_the_path() {
    let snapshot = two_channel_snapshot();
    let base = std::path::Path::new("/nonexistent-cutlist-dir/scene.edl");

    match export_timeline(&snapshot, base) {
        Err(ExportError::Write { path, .. }) => {
            assert_eq!(path.file_name().unwrap(), "scene_V_01.edl");
        }
        other => panic!("expected write error, got {other:?}"),
    }
}
