use {
    crate::{Keypoint, COCO_KEYPOINT_COUNT},
    serde::Serialize,
};

/// How much of the skeleton the detector actually saw in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseQuality {
    pub total_keypoints: usize,
    pub valid_keypoints: usize,
    /// Percentage of the 17 COCO keypoints that are present, rounded.
    pub confidence: u32,
}

impl PoseQuality {
    /// Entries beyond the 17th are not counted.
    pub fn from_keypoints(keypoints: &[Keypoint]) -> Self {
        let valid_keypoints = keypoints
            .iter()
            .take(COCO_KEYPOINT_COUNT)
            .filter(|k| k.position.is_finite() && k.confidence.is_finite() && k.is_present())
            .count();
        let confidence = (valid_keypoints as f32 / COCO_KEYPOINT_COUNT as f32 * 100.0).round() as u32;
        PoseQuality {
            total_keypoints: COCO_KEYPOINT_COUNT,
            valid_keypoints,
            confidence,
        }
    }
}
