#![allow(dead_code)]

use ergo_score::{Keypoint, KeypointIndex, COCO_KEYPOINT_COUNT};

pub const CONFIDENT: f32 = 0.9;

/// Upright, arms hanging, feet level. Normalized image coordinates, y down.
pub fn neutral_pose() -> Vec<Keypoint> {
    let points: [(f32, f32); COCO_KEYPOINT_COUNT] = [
        (0.50, 0.10), // nose
        (0.52, 0.08), // left eye
        (0.48, 0.08), // right eye
        (0.54, 0.09), // left ear
        (0.46, 0.09), // right ear
        (0.60, 0.25), // left shoulder
        (0.40, 0.25), // right shoulder
        (0.60, 0.40), // left elbow
        (0.40, 0.40), // right elbow
        (0.60, 0.55), // left wrist
        (0.40, 0.55), // right wrist
        (0.57, 0.60), // left hip
        (0.43, 0.60), // right hip
        (0.57, 0.78), // left knee
        (0.43, 0.78), // right knee
        (0.57, 0.95), // left ankle
        (0.43, 0.95), // right ankle
    ];
    points
        .iter()
        .map(|&(x, y)| Keypoint::new(x, y, CONFIDENT))
        .collect()
}

pub fn set(pose: &mut [Keypoint], index: KeypointIndex, x: f32, y: f32) {
    pose[usize::from(index)].position.x = x;
    pose[usize::from(index)].position.y = y;
}

pub fn hide(pose: &mut [Keypoint], index: KeypointIndex) {
    pose[usize::from(index)].confidence = 0.2;
}

/// Neutral pose with the right forearm raised straight above the shoulder.
pub fn overhead_pose() -> Vec<Keypoint> {
    let mut pose = neutral_pose();
    set(&mut pose, KeypointIndex::RightElbow, 0.40, 0.15);
    set(&mut pose, KeypointIndex::RightWrist, 0.40, 0.05);
    pose
}

/// Both arms reaching forward and out, elbows bent, like holding a box.
pub fn carrying_pose() -> Vec<Keypoint> {
    let mut pose = neutral_pose();
    set(&mut pose, KeypointIndex::LeftElbow, 0.66, 0.38);
    set(&mut pose, KeypointIndex::LeftWrist, 0.53, 0.45);
    set(&mut pose, KeypointIndex::RightElbow, 0.34, 0.38);
    set(&mut pose, KeypointIndex::RightWrist, 0.47, 0.45);
    pose
}

/// Deterministic pseudo-random generator for pose sweeps.
pub struct Lcg(pub u64);

impl Lcg {
    pub fn next_f32(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32) / ((1u64 << 24) as f32)
    }

    pub fn pose(&mut self) -> Vec<Keypoint> {
        (0..COCO_KEYPOINT_COUNT)
            .map(|_| {
                let x = self.next_f32() * 2.0 - 0.5;
                let y = self.next_f32() * 2.0 - 0.5;
                let confidence = 0.31 + self.next_f32() * 0.69;
                Keypoint::new(x, y, confidence)
            })
            .collect()
    }
}
