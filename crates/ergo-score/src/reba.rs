//! Rapid Entire Body Assessment.
//!
//! REBA scores whichever side's arm was detected with higher confidence.
//!
//! Table layout: the observed scorer reads Score A from a 2D `[neck][legs]`
//! grid and Score B from a 2D `[upper_arm][wrist]` grid, leaving trunk and
//! lower arm out of the lookups although both are computed. The published
//! tables are 3D (`trunk x neck x legs`, `lower_arm x upper_arm x wrist`).
//! It is unconfirmed whether the 2D form was an intended simplification, so
//! it stays the default ([`RebaTableLayout::Collapsed`]) and the published
//! form is available as [`RebaTableLayout::Canonical`].

use {
    crate::{
        config::RebaConfig,
        geometry::{BodyAngles, PostureFlags},
        tables::{
            lookup2, lookup3, REBA_TABLE_A, REBA_TABLE_A_COLLAPSED, REBA_TABLE_B,
            REBA_TABLE_B_COLLAPSED, REBA_TABLE_C,
        },
        Keypoint, Pose, Side,
    },
    log::{debug, trace},
    serde::{Deserialize, Serialize},
    std::fmt,
};

pub const REBA_MIN_SCORE: u8 = 1;
pub const REBA_MAX_SCORE: u8 = 15;
/// Largest Score A / Score B the Table C axes accept.
pub const REBA_MAX_GROUP_SCORE: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebaTableLayout {
    /// 2D Score A `[neck][legs]` and Score B `[upper_arm][wrist]`.
    #[default]
    Collapsed,
    /// Published 3D tables including trunk and lower arm.
    Canonical,
}

/// Points added on top of the posture tables. All zero unless configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RebaModifiers {
    /// Load/force points, added to Score A.
    pub load_points: u8,
    /// Coupling points, added to Score B.
    pub coupling_points: u8,
    /// Activity points, added to the Table C result.
    pub activity_points: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RebaRisk {
    Negligible,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RebaActionLevel {
    #[serde(rename = "None necessary")]
    NoneNecessary,
    #[serde(rename = "May be necessary")]
    MayBeNecessary,
    Necessary,
    #[serde(rename = "Necessary soon")]
    NecessarySoon,
    #[serde(rename = "Necessary now")]
    NecessaryNow,
}

impl RebaRisk {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=1 => RebaRisk::Negligible,
            2..=3 => RebaRisk::Low,
            4..=7 => RebaRisk::Medium,
            8..=10 => RebaRisk::High,
            _ => RebaRisk::VeryHigh,
        }
    }

    pub fn action_level(&self) -> RebaActionLevel {
        match self {
            RebaRisk::Negligible => RebaActionLevel::NoneNecessary,
            RebaRisk::Low => RebaActionLevel::MayBeNecessary,
            RebaRisk::Medium => RebaActionLevel::Necessary,
            RebaRisk::High => RebaActionLevel::NecessarySoon,
            RebaRisk::VeryHigh => RebaActionLevel::NecessaryNow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RebaRisk::Negligible => "Negligible",
            RebaRisk::Low => "Low",
            RebaRisk::Medium => "Medium",
            RebaRisk::High => "High",
            RebaRisk::VeryHigh => "Very High",
        }
    }
}

impl RebaActionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RebaActionLevel::NoneNecessary => "None necessary",
            RebaActionLevel::MayBeNecessary => "May be necessary",
            RebaActionLevel::Necessary => "Necessary",
            RebaActionLevel::NecessarySoon => "Necessary soon",
            RebaActionLevel::NecessaryNow => "Necessary now",
        }
    }
}

impl fmt::Display for RebaRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RebaActionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebaAngles {
    pub neck: f32,
    pub trunk: f32,
    pub knee: f32,
    pub upper_arm: f32,
    pub lower_arm: f32,
    pub wrist: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebaScore {
    pub neck: u8,
    pub trunk: u8,
    pub legs: u8,
    pub upper_arm: u8,
    pub lower_arm: u8,
    pub wrist: u8,
    pub score_a: u8,
    pub score_b: u8,
    pub final_score: u8,
    pub risk_level: RebaRisk,
    pub action_level: RebaActionLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angles: Option<RebaAngles>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebaComponents {
    pub neck: u8,
    pub trunk: u8,
    pub legs: u8,
    pub upper_arm: u8,
    pub lower_arm: u8,
    pub wrist: u8,
}

pub fn neck_score(angle: f32, flags: &PostureFlags) -> u8 {
    let base = if angle.abs() <= 20.0 { 1 } else { 2 };
    base + flags.neck_twisted as u8
}

pub fn trunk_score(angle: f32, flags: &PostureFlags) -> u8 {
    let angle = angle.abs();
    let base = if angle <= 5.0 {
        1
    } else if angle <= 20.0 {
        2
    } else if angle <= 60.0 {
        3
    } else {
        4
    };
    base + flags.trunk_twisted as u8
}

/// 1 with both feet supported, 2 otherwise; knee flexion adds up to 2. Max 4.
pub fn legs_score(knee_flexion: f32, flags: &PostureFlags) -> u8 {
    let base = if flags.bilateral_support { 1 } else { 2 };
    let knee = if knee_flexion > 60.0 {
        2
    } else if knee_flexion >= 30.0 {
        1
    } else {
        0
    };
    (base + knee).min(4)
}

pub fn upper_arm_score(angle: f32, flags: &PostureFlags) -> u8 {
    let angle = angle.abs();
    let mut score: i8 = if angle <= 20.0 {
        1
    } else if angle <= 45.0 {
        2
    } else if angle <= 90.0 {
        3
    } else {
        4
    };
    score += flags.shoulder_raised as i8;
    score += flags.arm_abducted as i8;
    score -= flags.arm_supported as i8;
    score.clamp(1, 6) as u8
}

pub fn lower_arm_score(flexion: f32) -> u8 {
    if (60.0..=100.0).contains(&flexion) { 1 } else { 2 }
}

pub fn wrist_score(angle: f32, flags: &PostureFlags) -> u8 {
    let base = if angle.abs() <= 15.0 { 1 } else { 2 };
    base + flags.wrist_twisted as u8
}

/// Table C lookup plus activity points, clamped to 1-15.
pub fn final_score(score_a: u8, score_b: u8, activity_points: u8) -> u8 {
    lookup2(&REBA_TABLE_C, score_a, score_b)
        .saturating_add(activity_points)
        .clamp(REBA_MIN_SCORE, REBA_MAX_SCORE)
}

impl RebaComponents {
    pub fn from_angles(angles: &BodyAngles, flags: &PostureFlags) -> Self {
        RebaComponents {
            neck: neck_score(angles.neck, flags),
            trunk: trunk_score(angles.trunk, flags),
            legs: legs_score(angles.knee, flags),
            upper_arm: upper_arm_score(angles.upper_arm, flags),
            lower_arm: lower_arm_score(angles.lower_arm),
            wrist: wrist_score(angles.wrist, flags),
        }
    }

    /// Posture part of Score A, before load points.
    pub fn score_a(&self, layout: RebaTableLayout) -> u8 {
        match layout {
            RebaTableLayout::Collapsed => lookup2(&REBA_TABLE_A_COLLAPSED, self.neck, self.legs),
            RebaTableLayout::Canonical => lookup3(&REBA_TABLE_A, self.trunk, self.neck, self.legs),
        }
    }

    /// Posture part of Score B, before coupling points.
    pub fn score_b(&self, layout: RebaTableLayout) -> u8 {
        match layout {
            RebaTableLayout::Collapsed => lookup2(&REBA_TABLE_B_COLLAPSED, self.upper_arm, self.wrist),
            RebaTableLayout::Canonical => {
                lookup3(&REBA_TABLE_B, self.lower_arm, self.upper_arm, self.wrist)
            }
        }
    }

    pub fn score(&self, layout: RebaTableLayout, modifiers: &RebaModifiers) -> RebaScore {
        let score_a = self.score_a(layout).saturating_add(modifiers.load_points);
        let score_b = self.score_b(layout).saturating_add(modifiers.coupling_points);
        let final_score = final_score(score_a, score_b, modifiers.activity_points);
        let risk_level = RebaRisk::from_score(final_score);
        RebaScore {
            neck: self.neck,
            trunk: self.trunk,
            legs: self.legs,
            upper_arm: self.upper_arm,
            lower_arm: self.lower_arm,
            wrist: self.wrist,
            score_a,
            score_b,
            final_score,
            risk_level,
            action_level: risk_level.action_level(),
            side: None,
            angles: None,
        }
    }
}

/// Stateless REBA scorer carrying its table layout and modifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RebaScorer {
    config: RebaConfig,
}

impl RebaScorer {
    pub fn new(config: RebaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RebaConfig {
        &self.config
    }

    /// Score a validated pose; `None` when the scored arm, shoulders or hips are missing.
    pub fn score(&self, pose: &Pose) -> Option<RebaScore> {
        let side = pose.more_confident_side();
        let Some(angles) = BodyAngles::measure(pose, side) else {
            debug!("REBA: required landmarks missing on {:?} side, no assessment", side);
            return None;
        };
        let flags = PostureFlags::detect(pose, side);
        let components = RebaComponents::from_angles(&angles, &flags);
        trace!("REBA components {:?} ({:?} side)", components, side);

        let mut score = components.score(self.config.table_layout, &self.config.modifiers);
        score.side = Some(side);
        score.angles = Some(RebaAngles {
            neck: angles.neck,
            trunk: angles.trunk,
            knee: angles.knee,
            upper_arm: angles.upper_arm,
            lower_arm: angles.lower_arm,
            wrist: angles.wrist,
        });
        Some(score)
    }

    pub fn calculate(&self, keypoints: &[Keypoint]) -> Option<RebaScore> {
        match Pose::new(keypoints) {
            Ok(pose) => self.score(&pose),
            Err(err) => {
                debug!("REBA: {err}");
                None
            }
        }
    }
}

/// Score a raw keypoint frame with the default layout and no modifiers.
pub fn calculate_reba(keypoints: &[Keypoint]) -> Option<RebaScore> {
    RebaScorer::default().calculate(keypoints)
}
