mod common;

use common::{neutral_pose, CONFIDENT};
use ergo_score::{Keypoint, KeypointIndex, Pose, PoseError, Side, COCO_KEYPOINT_COUNT};

#[test]
fn test_coco_keypoint_count() {
    assert_eq!(COCO_KEYPOINT_COUNT, 17);
}

#[test]
fn test_keypoint_index_try_from_valid() {
    assert_eq!(KeypointIndex::try_from(0).unwrap(), KeypointIndex::Nose);
    assert_eq!(KeypointIndex::try_from(10).unwrap(), KeypointIndex::RightWrist);
    assert_eq!(KeypointIndex::try_from(16).unwrap(), KeypointIndex::RightAnkle);
}

#[test]
fn test_keypoint_index_try_from_invalid() {
    assert!(KeypointIndex::try_from(17).is_err());
    assert!(KeypointIndex::try_from(100).is_err());
}

#[test]
fn test_keypoint_presence_threshold() {
    assert!(!Keypoint::new(0.0, 0.0, 0.3).is_present());
    assert!(Keypoint::new(0.0, 0.0, 0.31).is_present());
}

#[test]
fn test_keypoint_deserializes_wire_shape() {
    let keypoint: Keypoint = serde_json::from_str(r#"{"x": 0.5, "y": 0.25, "score": 0.8}"#).unwrap();
    assert_eq!(keypoint, Keypoint::new(0.5, 0.25, 0.8));

    let json = serde_json::to_value(keypoint).unwrap();
    assert_eq!(json["score"], serde_json::json!(0.8_f32));
}

#[test]
fn test_pose_rejects_wrong_length() {
    let short = &neutral_pose()[..16];
    assert_eq!(
        Pose::new(short),
        Err(PoseError::KeypointCount { expected: 17, got: 16 })
    );

    let mut long = neutral_pose();
    long.push(Keypoint::new(0.0, 0.0, 1.0));
    assert!(Pose::try_from(long.as_slice()).is_err());
}

#[test]
fn test_pose_error_display() {
    let err = PoseError::KeypointCount { expected: 17, got: 3 };
    assert_eq!(err.to_string(), "pose needs 17 keypoints, got 3");
}

#[test]
fn test_pose_sanitizes_malformed_keypoints() {
    let mut keypoints = neutral_pose();
    keypoints[0] = Keypoint::new(f32::NAN, 0.1, 0.9);
    keypoints[1] = Keypoint::new(0.5, 0.1, f32::INFINITY);
    keypoints[2] = Keypoint::new(0.5, 0.1, 4.0);

    let pose = Pose::new(&keypoints).unwrap();
    assert!(pose.get(KeypointIndex::Nose).is_none());
    assert!(pose.get(KeypointIndex::LeftEye).is_none());
    assert_eq!(pose.keypoint(KeypointIndex::RightEye).confidence, 1.0);
}

#[test]
fn test_pose_midpoint_falls_back_to_present_point() {
    let mut keypoints = neutral_pose();
    let pose = Pose::new(&keypoints).unwrap();
    let mid = pose.shoulder_mid().unwrap();
    assert!((mid.x - 0.5).abs() < 1e-6);

    keypoints[usize::from(KeypointIndex::LeftShoulder)].confidence = 0.1;
    let pose = Pose::new(&keypoints).unwrap();
    let mid = pose.shoulder_mid().unwrap();
    assert!((mid.x - 0.4).abs() < 1e-6);

    keypoints[usize::from(KeypointIndex::RightShoulder)].confidence = 0.1;
    let pose = Pose::new(&keypoints).unwrap();
    assert!(pose.shoulder_mid().is_none());
}

#[test]
fn test_more_confident_side() {
    let mut keypoints = neutral_pose();
    let pose = Pose::new(&keypoints).unwrap();
    // tie goes right
    assert_eq!(pose.more_confident_side(), Side::Right);

    keypoints[usize::from(KeypointIndex::RightWrist)].confidence = 0.5;
    let pose = Pose::new(&keypoints).unwrap();
    assert_eq!(pose.more_confident_side(), Side::Left);
    assert!((pose.arm_confidence(Side::Left) - 3.0 * CONFIDENT).abs() < 1e-5);
}

#[test]
fn test_valid_count() {
    let mut keypoints = neutral_pose();
    keypoints[3].confidence = 0.0;
    keypoints[4].confidence = 0.3;
    let pose = Pose::new(&keypoints).unwrap();
    assert_eq!(pose.valid_count(), 15);
}
