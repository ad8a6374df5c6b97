//! Per-frame pipeline: keypoints to every score the engine produces.

use {
    crate::{
        adjust::{adjust_reba, adjust_rula, WeightAdjusted},
        posture::{estimate_weight_for, WeightEstimation},
        reba::{RebaScore, RebaScorer},
        rula::{score_rula, RulaScore},
        EngineConfig, Keypoint, Pose, PoseQuality,
    },
    log::debug,
    serde::Serialize,
};

/// Everything computed for one frame, as handed to a report exporter.
///
/// Absent scores mean "no assessment available", never a low score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub pose_quality: PoseQuality,
    pub rula: Option<RulaScore>,
    pub reba: Option<RebaScore>,
    pub weight: WeightEstimation,
    pub adjusted_rula: Option<WeightAdjusted<RulaScore>>,
    pub adjusted_reba: Option<WeightAdjusted<RebaScore>>,
}

/// Stateless frame assessor; safe to share across threads and streams.
#[derive(Debug, Clone, Default)]
pub struct Assessor {
    config: EngineConfig,
    reba: RebaScorer,
}

impl Assessor {
    pub fn new(config: EngineConfig) -> Self {
        let reba = RebaScorer::new(*config.reba());
        Self { config, reba }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assess one frame. `manual_weight` (kg) overrides the estimated load.
    pub fn assess(&self, keypoints: &[Keypoint], manual_weight: Option<f32>) -> Assessment {
        let pose_quality = PoseQuality::from_keypoints(keypoints);

        let pose = match Pose::new(keypoints) {
            Ok(pose) => pose,
            Err(err) => {
                debug!("frame not assessed: {err}");
                return Assessment {
                    pose_quality,
                    rula: None,
                    reba: None,
                    weight: WeightEstimation::default(),
                    adjusted_rula: None,
                    adjusted_reba: None,
                };
            }
        };

        let rula = score_rula(&pose);
        let reba = self.reba.score(&pose);
        let weight = estimate_weight_for(&pose);

        let (adjusted_rula, adjusted_reba) = if self.config.weight_adjustment() {
            (
                rula.as_ref().map(|score| adjust_rula(score, &weight, manual_weight)),
                reba.as_ref().map(|score| adjust_reba(score, &weight, manual_weight)),
            )
        } else {
            (None, None)
        };

        Assessment {
            pose_quality,
            rula,
            reba,
            weight,
            adjusted_rula,
            adjusted_reba,
        }
    }
}
