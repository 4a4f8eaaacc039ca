//! End-to-end estimation scenarios over the public API.

use approx::assert_relative_eq;
use body_measure::{
    estimate, load_pose, Estimator, Frame, Keypoint, Landmark, Measurement, MeasurementRecord,
    PoseResult,
};

fn frame() -> Frame {
    Frame::new(640, 480).unwrap()
}

fn kp(l: Landmark, x: f64, y: f64) -> Keypoint {
    Keypoint::new(l, x, y, 0.9)
}

/// Front-facing, left/right symmetric body around x = 320.
fn full_body() -> PoseResult {
    PoseResult::new(vec![
        kp(Landmark::Nose, 320.0, 60.0),
        kp(Landmark::LeftShoulder, 270.0, 120.0),
        kp(Landmark::RightShoulder, 370.0, 120.0),
        kp(Landmark::LeftElbow, 250.0, 190.0),
        kp(Landmark::RightElbow, 390.0, 190.0),
        kp(Landmark::LeftWrist, 240.0, 260.0),
        kp(Landmark::RightWrist, 400.0, 260.0),
        kp(Landmark::LeftHip, 285.0, 300.0),
        kp(Landmark::RightHip, 355.0, 300.0),
        kp(Landmark::LeftKnee, 285.0, 380.0),
        kp(Landmark::RightKnee, 355.0, 380.0),
        kp(Landmark::LeftAnkle, 285.0, 460.0),
        kp(Landmark::RightAnkle, 355.0, 460.0),
    ])
}

fn torso_only() -> PoseResult {
    PoseResult::new(vec![
        kp(Landmark::LeftShoulder, 100.0, 200.0),
        kp(Landmark::RightShoulder, 200.0, 200.0),
        kp(Landmark::LeftHip, 110.0, 400.0),
        kp(Landmark::RightHip, 190.0, 400.0),
    ])
}

#[test]
fn always_returns_seven_keys() {
    let poses = [None, Some(PoseResult::default()), Some(torso_only()), Some(full_body())];
    for pose in &poses {
        let set = estimate(&frame(), pose.as_ref());
        assert_eq!(set.len(), 7);
        let keys: Vec<_> = set.iter().map(|(m, _)| m).collect();
        assert_eq!(keys, Measurement::ALL);
    }
}

#[test]
fn absent_pose_uses_exact_fallbacks() {
    let set = estimate(&frame(), None);
    let expected = [
        (Measurement::Height, 5.0),
        (Measurement::ShoulderWidth, 115.0),
        (Measurement::Chest, 96.0),
        (Measurement::Waist, 77.0),
        (Measurement::Hips, 90.0),
        (Measurement::ArmLength, 120.0),
        (Measurement::LegLength, 168.0),
    ];
    for (m, cm) in expected {
        assert_eq!(set[m].centimeters, cm, "{m}");
        assert!(set[m].is_estimated_fallback, "{m}");
    }
}

#[test]
fn torso_scenario() {
    let pose = torso_only();
    assert_relative_eq!(Estimator::default().pixel_to_cm(&pose), 0.225);

    let set = estimate(&frame(), Some(&pose));

    let shoulders = set[Measurement::ShoulderWidth];
    assert_eq!(shoulders.centimeters, 23.0);
    assert!(!shoulders.is_estimated_fallback);

    // 100px * 1.15 * 0.225 = 25.875
    assert_eq!(set[Measurement::Chest].centimeters, 26.0);
    // 80px * 0.85 * 0.225 = 15.3
    assert_eq!(set[Measurement::Waist].centimeters, 15.0);
    // 80px * 1.10 * 0.225 = 19.8
    assert_eq!(set[Measurement::Hips].centimeters, 20.0);

    let height = set[Measurement::Height];
    assert!(height.is_estimated_fallback);
    assert_eq!(height.centimeters, 5.0);

    assert!(set[Measurement::ArmLength].is_estimated_fallback);
    assert!(set[Measurement::LegLength].is_estimated_fallback);
    assert_eq!(set.fallback_count(), 3);
}

#[test]
fn height_fallback_follows_frame_size() {
    let tall = Frame::new(640, 1920).unwrap();
    let set = estimate(&tall, Some(&torso_only()));
    assert_eq!(set[Measurement::Height].centimeters, 19.0);
}

#[test]
fn full_body_has_no_fallbacks() {
    let pose = full_body();
    let set = estimate(&frame(), Some(&pose));
    assert_eq!(set.fallback_count(), 0);

    // torso span 180px -> 0.25 cm/px
    let scale = Estimator::default().pixel_to_cm(&pose);
    assert_relative_eq!(scale, 0.25);

    // nose 60 -> ankles 460 = 400px
    assert_eq!(set[Measurement::Height].centimeters, 100.0);
    assert_eq!(set[Measurement::ShoulderWidth].centimeters, 25.0);
    // leg: 160px per side
    assert_eq!(set[Measurement::LegLength].centimeters, 40.0);
    // arm: sqrt(30^2 + 140^2) = 143.18px per side
    assert_eq!(set[Measurement::ArmLength].centimeters, 36.0);
}

#[test]
fn low_confidence_is_treated_as_absent() {
    let mut pose = full_body();
    for k in &mut pose.keypoints {
        k.score = 0.3;
    }
    assert_eq!(estimate(&frame(), Some(&pose)), estimate(&frame(), None));
}

#[test]
fn single_side_limbs_use_that_side() {
    let mut pose = full_body();
    pose.keypoints
        .retain(|k| k.name != "right_wrist" && k.name != "left_ankle");
    // move the remaining wrist so the sides would differ
    let wrist = pose
        .keypoints
        .iter_mut()
        .find(|k| k.name == "left_wrist")
        .unwrap();
    wrist.x = 270.0;
    wrist.y = 320.0;

    let set = estimate(&frame(), Some(&pose));
    // left arm 200px * 0.25
    assert_eq!(set[Measurement::ArmLength].centimeters, 50.0);
    assert!(!set[Measurement::ArmLength].is_estimated_fallback);
    assert_eq!(set[Measurement::LegLength].centimeters, 40.0);
    assert!(!set[Measurement::LegLength].is_estimated_fallback);
}

#[test]
fn calibration_decreases_with_span() {
    let estimator = Estimator::default();
    let mut last = f64::INFINITY;
    for span in [160.0, 200.0, 300.0, 450.0, 600.0, 850.0] {
        let pose = PoseResult::new(vec![
            kp(Landmark::LeftShoulder, 100.0, 50.0),
            kp(Landmark::LeftHip, 100.0, 50.0 + span),
        ]);
        let scale = estimator.pixel_to_cm(&pose);
        assert!(scale < last, "span {span}: {scale} !< {last}");
        last = scale;
    }
}

#[test]
fn rejected_calibration_uses_default() {
    let estimator = Estimator::default();
    for span in [20.0, 100.0, 150.0, 900.0, 1200.0] {
        let pose = PoseResult::new(vec![
            kp(Landmark::LeftShoulder, 100.0, 50.0),
            kp(Landmark::LeftHip, 100.0, 50.0 + span),
        ]);
        assert_eq!(estimator.pixel_to_cm(&pose), 0.12, "span {span}");
    }
}

#[test]
fn mirrored_labels_give_same_widths() {
    let pose = full_body();
    let mirrored = pose.mirrored_labels();
    let a = estimate(&frame(), Some(&pose));
    let b = estimate(&frame(), Some(&mirrored));
    for m in [
        Measurement::ShoulderWidth,
        Measurement::Chest,
        Measurement::Waist,
        Measurement::Hips,
        Measurement::ArmLength,
        Measurement::LegLength,
    ] {
        assert_eq!(a[m], b[m], "{m}");
    }
}

#[test]
fn mirrored_single_side_matches() {
    let mut pose = full_body();
    pose.keypoints.retain(|k| k.name != "right_wrist");
    let a = estimate(&frame(), Some(&pose));
    let b = estimate(&frame(), Some(&pose.mirrored_labels()));
    assert_eq!(a[Measurement::ArmLength], b[Measurement::ArmLength]);
}

#[test]
fn pose_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("body-measure-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("pose.json");
    std::fs::write(
        &path,
        r#"[{"score": 0.8, "keypoints": [
            {"name": "left_shoulder", "x": 100, "y": 200, "score": 0.9},
            {"name": "right_shoulder", "x": 200, "y": 200, "score": 0.9},
            {"name": "left_hip", "x": 110, "y": 400, "score": 0.9},
            {"name": "right_hip", "x": 190, "y": 400, "score": 0.9},
            {"name": "left_eye", "x": 140, "y": 90, "score": 0.9}
        ]}]"#,
    )
    .unwrap();

    let pose = load_pose(&path).unwrap().unwrap();
    let record = MeasurementRecord::from_set(&estimate(&frame(), Some(&pose)));
    assert_eq!(record.get("Shoulder Width"), Some("23 cm"));
    assert_eq!(record.get("Height"), Some("5 cm (estimated)"));

    let out = dir.join("measurements.json");
    record.write_json(&out).unwrap();
    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(exported["Chest"], "26 cm");

    std::fs::remove_dir_all(&dir).unwrap();
}
