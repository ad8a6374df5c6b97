//! Rapid Upper Limb Assessment.
//!
//! RULA always scores the right arm (COCO 6, 8, 10). It deliberately does not
//! share REBA's confidence-based side selection.

use {
    crate::{
        geometry::{BodyAngles, PostureFlags},
        tables::{lookup2, lookup3, RULA_TABLE_A, RULA_TABLE_B, RULA_TABLE_C},
        Keypoint, Pose, Side,
    },
    log::{debug, trace},
    serde::Serialize,
    std::fmt,
};

pub const RULA_MIN_SCORE: u8 = 1;
pub const RULA_MAX_SCORE: u8 = 7;

const SCORED_SIDE: Side = Side::Right;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RulaRisk {
    Acceptable,
    Investigate,
    #[serde(rename = "Investigate Soon")]
    InvestigateSoon,
    #[serde(rename = "Investigate Immediately")]
    InvestigateImmediately,
}

impl RulaRisk {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => RulaRisk::Acceptable,
            3..=4 => RulaRisk::Investigate,
            5..=6 => RulaRisk::InvestigateSoon,
            _ => RulaRisk::InvestigateImmediately,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RulaRisk::Acceptable => "Acceptable",
            RulaRisk::Investigate => "Investigate",
            RulaRisk::InvestigateSoon => "Investigate Soon",
            RulaRisk::InvestigateImmediately => "Investigate Immediately",
        }
    }
}

impl fmt::Display for RulaRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw angles the component scores were derived from, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RulaAngles {
    pub upper_arm: f32,
    pub lower_arm: f32,
    pub wrist: f32,
    pub neck: f32,
    pub trunk: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RulaScore {
    pub upper_arm: u8,
    pub lower_arm: u8,
    pub wrist: u8,
    pub neck: u8,
    pub trunk: u8,
    pub score_a: u8,
    pub score_b: u8,
    pub final_score: u8,
    pub risk_level: RulaRisk,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angles: Option<RulaAngles>,
}

/// The five RULA component scores, before any table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulaComponents {
    pub upper_arm: u8,
    pub lower_arm: u8,
    pub wrist: u8,
    pub neck: u8,
    pub trunk: u8,
}

/// 1-4 by flexion band, +1 raised shoulder, +1 abduction, -1 supported; 1-6.
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

/// 1 inside the 60-100 degree working band, else 2; +1 across the midline.
pub fn lower_arm_score(flexion: f32, flags: &PostureFlags) -> u8 {
    let base = if (60.0..=100.0).contains(&flexion) { 1 } else { 2 };
    base + flags.crosses_midline as u8
}

pub fn wrist_score(angle: f32, flags: &PostureFlags) -> u8 {
    let angle = angle.abs();
    let base = if angle <= 5.0 {
        1
    } else if angle <= 15.0 {
        2
    } else {
        3
    };
    base + flags.wrist_twisted as u8
}

pub fn neck_score(angle: f32, flags: &PostureFlags) -> u8 {
    let angle = angle.abs();
    let base = if angle <= 10.0 {
        1
    } else if angle <= 20.0 {
        2
    } else {
        3
    };
    base + flags.neck_twisted as u8
}

pub fn trunk_score(angle: f32) -> u8 {
    let angle = angle.abs();
    if angle <= 5.0 {
        1
    } else if angle <= 20.0 {
        2
    } else if angle <= 60.0 {
        3
    } else {
        4
    }
}

/// Table C lookup, clamped to 1-7.
pub fn final_score(score_a: u8, score_b: u8) -> u8 {
    lookup2(&RULA_TABLE_C, score_a, score_b).clamp(RULA_MIN_SCORE, RULA_MAX_SCORE)
}

impl RulaComponents {
    pub fn from_angles(angles: &BodyAngles, flags: &PostureFlags) -> Self {
        RulaComponents {
            upper_arm: upper_arm_score(angles.upper_arm, flags),
            lower_arm: lower_arm_score(angles.lower_arm, flags),
            wrist: wrist_score(angles.wrist, flags),
            neck: neck_score(angles.neck, flags),
            trunk: trunk_score(angles.trunk),
        }
    }

    pub fn score_a(&self) -> u8 {
        lookup3(&RULA_TABLE_A, self.upper_arm, self.lower_arm, self.wrist)
    }

    pub fn score_b(&self) -> u8 {
        lookup2(&RULA_TABLE_B, self.neck, self.trunk)
    }

    /// Run the table pipeline. Out-of-range components saturate.
    pub fn score(&self) -> RulaScore {
        let score_a = self.score_a();
        let score_b = self.score_b();
        let final_score = final_score(score_a, score_b);
        RulaScore {
            upper_arm: self.upper_arm,
            lower_arm: self.lower_arm,
            wrist: self.wrist,
            neck: self.neck,
            trunk: self.trunk,
            score_a,
            score_b,
            final_score,
            risk_level: RulaRisk::from_score(final_score),
            angles: None,
        }
    }
}

/// Score a validated pose; `None` when the right arm, shoulders or hips are missing.
pub fn score_rula(pose: &Pose) -> Option<RulaScore> {
    let Some(angles) = BodyAngles::measure(pose, SCORED_SIDE) else {
        debug!("RULA: required landmarks missing, no assessment");
        return None;
    };
    let flags = PostureFlags::detect(pose, SCORED_SIDE);
    let components = RulaComponents::from_angles(&angles, &flags);
    trace!("RULA components {:?} from {:?}", components, angles);

    let mut score = components.score();
    score.angles = Some(RulaAngles {
        upper_arm: angles.upper_arm,
        lower_arm: angles.lower_arm,
        wrist: angles.wrist,
        neck: angles.neck,
        trunk: angles.trunk,
    });
    Some(score)
}

/// Score a raw keypoint frame; `None` unless it holds exactly 17 keypoints.
pub fn calculate_rula(keypoints: &[Keypoint]) -> Option<RulaScore> {
    match Pose::new(keypoints) {
        Ok(pose) => score_rula(&pose),
        Err(err) => {
            debug!("RULA: {err}");
            None
        }
    }
}
