//! Joint angles and posture flags derived from 2D keypoints.
//!
//! Angles are in degrees. Image y grows downward, so a segment hanging
//! straight down has a [`segment_angle`] of 0.

use {
    crate::{KeypointIndex, Pose, Side},
    ergo_base::Vec2,
    serde::Serialize,
};

/// Returned by [`joint_angle`] when a limb vector has zero length.
pub const DEGENERATE_ANGLE: f32 = 90.0;

const SHOULDER_RAISE_RATIO: f32 = 0.1;
const ABDUCTION_RATIO: f32 = 0.5;
const NECK_TWIST_RATIO: f32 = 0.25;
const TRUNK_TWIST_RATIO: f32 = 0.7;
const LEVEL_FEET_RATIO: f32 = 0.1;

/// Interior angle at `mid` between the segments towards `proximal` and `distal`.
///
/// Straight limbs measure 180, a right-angle bend 90. If either segment has
/// zero length the arccosine is undefined and [`DEGENERATE_ANGLE`] is returned.
pub fn joint_angle(proximal: Vec2<f32>, mid: Vec2<f32>, distal: Vec2<f32>) -> f32 {
    let v1 = proximal - mid;
    let v2 = distal - mid;

    let cos = (v1.dot(v2) / (v1.length() * v2.length())).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();
    if angle.is_nan() {
        DEGENERATE_ANGLE
    } else {
        angle
    }
}

/// Signed deviation of the segment `from -> to` from the downward vertical,
/// `atan2(dy, dx) - 90`, wrapped into (-180, 180].
pub fn segment_angle(from: Vec2<f32>, to: Vec2<f32>) -> f32 {
    wrap_degrees((to - from).heading_degrees() - 90.0)
}

/// Flexion of a joint from its interior angle; a straight joint has 0 flexion.
pub fn flexion(interior: f32) -> f32 {
    180.0 - interior
}

fn wrap_degrees(angle: f32) -> f32 {
    let angle = angle % 360.0;
    if angle <= -180.0 {
        angle + 360.0
    } else if angle > 180.0 {
        angle - 360.0
    } else {
        angle
    }
}

/// Raw angles for one side of the body. Signed where a direction exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyAngles {
    pub neck: f32,
    pub trunk: f32,
    pub upper_arm: f32,
    /// Elbow flexion, 0 for a straight arm.
    pub lower_arm: f32,
    /// Forearm deviation from vertical; COCO carries no hand keypoints.
    pub wrist: f32,
    /// Knee flexion, 0 when the leg is not visible.
    pub knee: f32,
}

impl BodyAngles {
    /// Measure one side. `None` when the arm, shoulders or hips are missing.
    pub fn measure(pose: &Pose, side: Side) -> Option<Self> {
        let shoulder = pose.get(side.shoulder())?;
        let elbow = pose.get(side.elbow())?;
        let wrist = pose.get(side.wrist())?;
        let shoulder_mid = pose.shoulder_mid()?;
        let hip_mid = pose.hip_mid()?;

        let neck = pose
            .get(KeypointIndex::Nose)
            .map(|nose| segment_angle(nose, shoulder_mid))
            .unwrap_or(0.0);

        let knee = match (pose.get(side.hip()), pose.get(side.knee()), pose.get(side.ankle())) {
            (Some(hip), Some(knee), Some(ankle)) => flexion(joint_angle(hip, knee, ankle)),
            _ => 0.0,
        };

        Some(BodyAngles {
            neck,
            trunk: segment_angle(shoulder_mid, hip_mid),
            upper_arm: segment_angle(shoulder, elbow),
            lower_arm: flexion(joint_angle(shoulder, elbow, wrist)),
            wrist: segment_angle(elbow, wrist),
            knee,
        })
    }
}

/// Posture adjustments for one side, detected from keypoint layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostureFlags {
    pub shoulder_raised: bool,
    pub arm_abducted: bool,
    /// Not observable from keypoints; only set by callers.
    pub arm_supported: bool,
    pub crosses_midline: bool,
    pub neck_twisted: bool,
    pub trunk_twisted: bool,
    pub wrist_twisted: bool,
    pub bilateral_support: bool,
}

impl PostureFlags {
    pub fn detect(pose: &Pose, side: Side) -> Self {
        let mut flags = PostureFlags {
            bilateral_support: true,
            ..Default::default()
        };

        let shoulder = pose.get(side.shoulder());
        let elbow = pose.get(side.elbow());
        let wrist = pose.get(side.wrist());
        let other_shoulder = pose.get(side.opposite().shoulder());
        let left_shoulder = pose.get(KeypointIndex::LeftShoulder);
        let right_shoulder = pose.get(KeypointIndex::RightShoulder);
        let left_hip = pose.get(KeypointIndex::LeftHip);
        let right_hip = pose.get(KeypointIndex::RightHip);

        if let (Some(elbow), Some(wrist)) = (elbow, wrist) {
            flags.wrist_twisted = wrist.y < elbow.y;
        }

        if let (Some(shoulder), Some(other), Some(hip_mid)) = (shoulder, other_shoulder, pose.hip_mid()) {
            let shoulder_mid = shoulder.midpoint(other);
            let torso = shoulder_mid.distance_to(hip_mid);
            flags.shoulder_raised = other.y - shoulder.y > SHOULDER_RAISE_RATIO * torso;
        }

        if let (Some(shoulder), Some(other)) = (shoulder, other_shoulder) {
            let midline = shoulder.midpoint(other).x;
            let outward = (shoulder.x - midline).signum();
            if shoulder.x != midline {
                if let Some(elbow) = elbow {
                    let upper_arm = shoulder.distance_to(elbow);
                    flags.arm_abducted = (elbow.x - shoulder.x) * outward > ABDUCTION_RATIO * upper_arm;
                }
                if let Some(wrist) = wrist {
                    flags.crosses_midline = (wrist.x - midline) * outward < 0.0;
                }
            }
        }

        if let (Some(nose), Some(left), Some(right)) = (pose.get(KeypointIndex::Nose), left_shoulder, right_shoulder) {
            let width = left.distance_to(right);
            let offset = (nose.x - left.midpoint(right).x).abs();
            flags.neck_twisted = width > 0.0 && offset > NECK_TWIST_RATIO * width;
        }

        if let (Some(ls), Some(rs), Some(lh), Some(rh)) = (left_shoulder, right_shoulder, left_hip, right_hip) {
            let hip_width = lh.distance_to(rh);
            flags.trunk_twisted = hip_width > 0.0 && ls.distance_to(rs) < TRUNK_TWIST_RATIO * hip_width;
        }

        if let (Some(left), Some(right), Some(hip_mid)) = (
            pose.get(KeypointIndex::LeftAnkle),
            pose.get(KeypointIndex::RightAnkle),
            pose.hip_mid(),
        ) {
            let leg = hip_mid.distance_to(left.midpoint(right));
            flags.bilateral_support = (left.y - right.y).abs() <= LEVEL_FEET_RATIO * leg;
        }

        flags
    }
}
