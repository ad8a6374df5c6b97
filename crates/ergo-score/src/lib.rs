pub mod adjust;
pub mod assess;
pub mod config;
pub mod error;
pub mod geometry;
pub mod keypoint;
pub mod posture;
pub mod quality;
pub mod reba;
pub mod rula;
pub mod tables;

pub use adjust::{adjust_reba, adjust_rula, reba_multiplier, rula_multiplier, WeightAdjusted};
pub use assess::{Assessment, Assessor};
pub use config::{EngineConfig, RebaConfig};
pub use error::{ConfigError, PoseError};
pub use keypoint::{Keypoint, KeypointIndex, Pose, Side, COCO_KEYPOINT_COUNT, MIN_CONFIDENCE};
pub use posture::{
    estimate_weight, estimate_weight_for, ArmPosition, DetectedObject, LoadDirection,
    PostureAnalysis, WeightEstimation,
};
pub use quality::PoseQuality;
pub use reba::{
    calculate_reba, RebaActionLevel, RebaAngles, RebaComponents, RebaModifiers, RebaRisk,
    RebaScore, RebaScorer, RebaTableLayout,
};
pub use rula::{calculate_rula, score_rula, RulaAngles, RulaComponents, RulaRisk, RulaScore};
