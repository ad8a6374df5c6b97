//! Heuristic external-load estimation from arm posture.
//!
//! The estimate is approximate and non-authoritative: it infers whether the
//! subject is lifting or carrying from arm extension and wrist placement, then
//! assigns a conservative weight class. Nothing is smoothed across frames.

use {
    crate::{geometry, Keypoint, KeypointIndex, Pose, Side},
    log::debug,
    serde::Serialize,
};

const EXTENDED_MIN_ANGLE: f32 = 30.0;
const EXTENDED_MAX_ANGLE: f32 = 150.0;
const WRIST_DISPLACEMENT: f32 = 0.05;
const OVERHEAD_RISE: f32 = 0.1;
const FORWARD_LEAN_DROP: f32 = 0.15;
const ELBOW_ASYMMETRY: f32 = 30.0;

const OVERHEAD_KG: f32 = 12.0;
const LIFTING_KG: f32 = 10.0;
const CARRYING_KG: f32 = 7.0;
const ASYMMETRY_BONUS_KG: f32 = 3.0;
const FORWARD_LEAN_BONUS_KG: f32 = 5.0;

const DETECTED_CONFIDENCE: f32 = 0.8;
const IDLE_CONFIDENCE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmPosition {
    Extended,
    #[default]
    Close,
    Overhead,
}

/// Always `Front`: no classifier decides the load direction yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadDirection {
    #[default]
    Front,
    Side,
    Back,
}

/// An object detected in the subject's hands. Nothing populates this yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedObject {
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostureAnalysis {
    pub is_lifting: bool,
    pub is_carrying: bool,
    pub arm_position: ArmPosition,
    /// Trunk deviation from vertical, degrees.
    pub spine_deviation: f32,
    pub load_direction: LoadDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEstimation {
    /// Kilograms.
    pub estimated_weight: f32,
    pub confidence: f32,
    pub detected_objects: Vec<DetectedObject>,
    pub body_posture: PostureAnalysis,
}

impl Default for WeightEstimation {
    fn default() -> Self {
        Self::idle(PostureAnalysis::default())
    }
}

impl WeightEstimation {
    fn idle(body_posture: PostureAnalysis) -> Self {
        WeightEstimation {
            estimated_weight: 0.0,
            confidence: IDLE_CONFIDENCE,
            detected_objects: Vec::new(),
            body_posture,
        }
    }

    /// Estimation carrying only a weight, e.g. one entered by an operator.
    pub fn with_weight(estimated_weight: f32) -> Self {
        WeightEstimation {
            estimated_weight,
            ..Default::default()
        }
    }
}

struct ArmReading {
    elbow_angle: f32,
    extended: bool,
    displaced: bool,
    overhead: bool,
}

impl ArmReading {
    fn read(pose: &Pose, side: Side) -> Option<Self> {
        let shoulder = pose.get(side.shoulder())?;
        let elbow = pose.get(side.elbow())?;
        let wrist = pose.get(side.wrist())?;

        let elbow_angle = geometry::joint_angle(shoulder, elbow, wrist);
        Some(ArmReading {
            elbow_angle,
            extended: elbow_angle > EXTENDED_MIN_ANGLE && elbow_angle < EXTENDED_MAX_ANGLE,
            displaced: (wrist.x - shoulder.x).abs() > WRIST_DISPLACEMENT,
            overhead: shoulder.y - wrist.y > OVERHEAD_RISE,
        })
    }

    fn holding(&self) -> bool {
        self.extended && self.displaced
    }
}

/// Estimate external load for a raw keypoint frame.
///
/// Frames without exactly 17 keypoints yield the idle estimate.
pub fn estimate_weight(keypoints: &[Keypoint]) -> WeightEstimation {
    match Pose::new(keypoints) {
        Ok(pose) => estimate_weight_for(&pose),
        Err(err) => {
            debug!("weight estimation skipped: {err}");
            WeightEstimation::default()
        }
    }
}

pub fn estimate_weight_for(pose: &Pose) -> WeightEstimation {
    let left = ArmReading::read(pose, Side::Left);
    let right = ArmReading::read(pose, Side::Right);
    let arms = || left.iter().chain(right.iter());

    let is_carrying = arms().any(ArmReading::holding);
    let overhead = arms().any(|arm| arm.overhead);
    let both_extended = matches!((&left, &right), (Some(l), Some(r)) if l.extended && r.extended);
    let is_lifting = overhead || (both_extended && arms().any(|arm| arm.displaced));

    let arm_position = if overhead {
        ArmPosition::Overhead
    } else if is_lifting || is_carrying {
        ArmPosition::Extended
    } else {
        ArmPosition::Close
    };

    let spine_deviation = match (pose.shoulder_mid(), pose.hip_mid()) {
        (Some(shoulders), Some(hips)) => geometry::segment_angle(shoulders, hips).abs(),
        _ => 0.0,
    };

    let body_posture = PostureAnalysis {
        is_lifting,
        is_carrying,
        arm_position,
        spine_deviation,
        load_direction: LoadDirection::Front,
    };

    if !is_lifting && !is_carrying {
        return WeightEstimation::idle(body_posture);
    }

    let mut weight = if overhead {
        OVERHEAD_KG
    } else if is_lifting {
        LIFTING_KG
    } else {
        CARRYING_KG
    };

    if let (Some(l), Some(r)) = (&left, &right) {
        if (l.elbow_angle - r.elbow_angle).abs() > ELBOW_ASYMMETRY {
            weight += ASYMMETRY_BONUS_KG;
        }
    }

    if let (Some(wrists), Some(shoulders)) = (
        both(pose, KeypointIndex::LeftWrist, KeypointIndex::RightWrist),
        both(pose, KeypointIndex::LeftShoulder, KeypointIndex::RightShoulder),
    ) {
        if wrists.y - shoulders.y > FORWARD_LEAN_DROP {
            weight += FORWARD_LEAN_BONUS_KG;
        }
    }

    debug!(
        "estimated load {:.1} kg (lifting={}, carrying={}, {:?})",
        weight, is_lifting, is_carrying, arm_position
    );

    WeightEstimation {
        estimated_weight: weight,
        confidence: DETECTED_CONFIDENCE,
        detected_objects: Vec::new(),
        body_posture,
    }
}

/// Midpoint of a pair, only when both points are present.
fn both(pose: &Pose, a: KeypointIndex, b: KeypointIndex) -> Option<ergo_base::Vec2<f32>> {
    Some(pose.get(a)?.midpoint(pose.get(b)?))
}
