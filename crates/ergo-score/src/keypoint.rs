use {
    crate::PoseError,
    ergo_base::Vec2,
    serde::{Deserialize, Serialize},
};

/// Number of keypoints in COCO pose format
pub const COCO_KEYPOINT_COUNT: usize = 17;

/// Keypoints at or below this confidence are treated as absent.
pub const MIN_CONFIDENCE: f32 = 0.3;

/// A single keypoint with 2D position and confidence score.
///
/// On the wire a keypoint is `{"x": .., "y": .., "score": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "KeypointRecord", into = "KeypointRecord")]
pub struct Keypoint {
    pub position: Vec2<f32>,
    /// Detection confidence in [0.0, 1.0].
    pub confidence: f32,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct KeypointRecord {
    x: f32,
    y: f32,
    score: f32,
}

impl From<KeypointRecord> for Keypoint {
    fn from(record: KeypointRecord) -> Self {
        Keypoint::new(record.x, record.y, record.score)
    }
}

impl From<Keypoint> for KeypointRecord {
    fn from(keypoint: Keypoint) -> Self {
        KeypointRecord {
            x: keypoint.position.x,
            y: keypoint.position.y,
            score: keypoint.confidence,
        }
    }
}

impl Keypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            confidence,
        }
    }

    pub fn is_present(&self) -> bool {
        self.confidence > MIN_CONFIDENCE
    }

    fn sanitized(self) -> Self {
        if !self.position.is_finite() || !self.confidence.is_finite() {
            return Keypoint::default();
        }
        Keypoint {
            confidence: self.confidence.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// COCO keypoint indices for human pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl From<KeypointIndex> for usize {
    fn from(index: KeypointIndex) -> usize {
        index as usize
    }
}

impl TryFrom<usize> for KeypointIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        use KeypointIndex::*;
        const ALL: [KeypointIndex; COCO_KEYPOINT_COUNT] = [
            Nose,
            LeftEye,
            RightEye,
            LeftEar,
            RightEar,
            LeftShoulder,
            RightShoulder,
            LeftElbow,
            RightElbow,
            LeftWrist,
            RightWrist,
            LeftHip,
            RightHip,
            LeftKnee,
            RightKnee,
            LeftAnkle,
            RightAnkle,
        ];
        ALL.get(value).copied().ok_or_else(|| {
            format!(
                "Invalid keypoint index: {}. Must be in range 0-16.",
                value
            )
        })
    }
}

/// Body side of a bilateral joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn shoulder(self) -> KeypointIndex {
        match self {
            Side::Left => KeypointIndex::LeftShoulder,
            Side::Right => KeypointIndex::RightShoulder,
        }
    }

    pub fn elbow(self) -> KeypointIndex {
        match self {
            Side::Left => KeypointIndex::LeftElbow,
            Side::Right => KeypointIndex::RightElbow,
        }
    }

    pub fn wrist(self) -> KeypointIndex {
        match self {
            Side::Left => KeypointIndex::LeftWrist,
            Side::Right => KeypointIndex::RightWrist,
        }
    }

    pub fn hip(self) -> KeypointIndex {
        match self {
            Side::Left => KeypointIndex::LeftHip,
            Side::Right => KeypointIndex::RightHip,
        }
    }

    pub fn knee(self) -> KeypointIndex {
        match self {
            Side::Left => KeypointIndex::LeftKnee,
            Side::Right => KeypointIndex::RightKnee,
        }
    }

    pub fn ankle(self) -> KeypointIndex {
        match self {
            Side::Left => KeypointIndex::LeftAnkle,
            Side::Right => KeypointIndex::RightAnkle,
        }
    }
}

/// A validated frame of exactly 17 COCO keypoints.
///
/// Non-finite coordinates or confidences mark a keypoint absent and
/// confidences are clamped to [0, 1], so scorers never see NaN input.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    keypoints: [Keypoint; COCO_KEYPOINT_COUNT],
}

impl Pose {
    pub fn new(keypoints: &[Keypoint]) -> Result<Self, PoseError> {
        if keypoints.len() != COCO_KEYPOINT_COUNT {
            return Err(PoseError::KeypointCount {
                expected: COCO_KEYPOINT_COUNT,
                got: keypoints.len(),
            });
        }

        let mut sanitized = [Keypoint::default(); COCO_KEYPOINT_COUNT];
        for (slot, keypoint) in sanitized.iter_mut().zip(keypoints) {
            *slot = keypoint.sanitized();
        }
        Ok(Pose {
            keypoints: sanitized,
        })
    }

    pub fn keypoints(&self) -> &[Keypoint; COCO_KEYPOINT_COUNT] {
        &self.keypoints
    }

    pub fn keypoint(&self, index: KeypointIndex) -> &Keypoint {
        &self.keypoints[usize::from(index)]
    }

    /// Position of a keypoint, or `None` when it is absent.
    pub fn get(&self, index: KeypointIndex) -> Option<Vec2<f32>> {
        let keypoint = self.keypoint(index);
        keypoint.is_present().then_some(keypoint.position)
    }

    /// Midpoint of a bilateral pair; falls back to whichever point is present.
    pub fn midpoint(&self, a: KeypointIndex, b: KeypointIndex) -> Option<Vec2<f32>> {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => Some(a.midpoint(b)),
            (Some(p), None) | (None, Some(p)) => Some(p),
            (None, None) => None,
        }
    }

    pub fn shoulder_mid(&self) -> Option<Vec2<f32>> {
        self.midpoint(KeypointIndex::LeftShoulder, KeypointIndex::RightShoulder)
    }

    pub fn hip_mid(&self) -> Option<Vec2<f32>> {
        self.midpoint(KeypointIndex::LeftHip, KeypointIndex::RightHip)
    }

    /// Summed confidence of one arm's shoulder, elbow and wrist.
    pub fn arm_confidence(&self, side: Side) -> f32 {
        [side.shoulder(), side.elbow(), side.wrist()]
            .into_iter()
            .map(|index| self.keypoint(index).confidence)
            .sum()
    }

    /// The side whose arm was detected with higher confidence. Ties go right.
    pub fn more_confident_side(&self) -> Side {
        if self.arm_confidence(Side::Left) > self.arm_confidence(Side::Right) {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn valid_count(&self) -> usize {
        self.keypoints.iter().filter(|k| k.is_present()).count()
    }
}

impl TryFrom<&[Keypoint]> for Pose {
    type Error = PoseError;

    fn try_from(keypoints: &[Keypoint]) -> Result<Self, Self::Error> {
        Pose::new(keypoints)
    }
}
