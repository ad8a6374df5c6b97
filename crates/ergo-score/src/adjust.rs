//! Weight-adjusted recalculation of RULA and REBA scores.
//!
//! The two systems adjust differently and must stay that way: RULA multiplies
//! its final score directly, REBA rescales Score A and Score B and re-runs
//! Table C. Base scores are never modified.

use {
    crate::{
        reba::{self, RebaRisk, RebaScore, REBA_MAX_GROUP_SCORE},
        rula::{RulaRisk, RulaScore, RULA_MAX_SCORE, RULA_MIN_SCORE},
        WeightEstimation,
    },
    log::debug,
    serde::Serialize,
};

/// A base score recomputed for an external load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightAdjusted<S> {
    #[serde(flatten)]
    pub score: S,
    /// Kilograms.
    pub effective_weight: f32,
    pub weight_multiplier: f32,
    pub is_weight_adjusted: bool,
}

/// `> 23 kg -> 3`, `> 10 kg -> 2`, `> 5 kg -> 1.5`, else 1.
pub fn rula_multiplier(weight: f32) -> f32 {
    if weight > 23.0 {
        3.0
    } else if weight > 10.0 {
        2.0
    } else if weight > 5.0 {
        1.5
    } else {
        1.0
    }
}

/// `<= 5 kg -> 1.0`, `<= 10 -> 1.1`, `<= 20 -> 1.3`, `<= 40 -> 1.5`, else 1.8.
pub fn reba_multiplier(weight: f32) -> f32 {
    if weight <= 5.0 {
        1.0
    } else if weight <= 10.0 {
        1.1
    } else if weight <= 20.0 {
        1.3
    } else if weight <= 40.0 {
        1.5
    } else {
        1.8
    }
}

/// The manual override when given, else the estimate. Unusable values become 0.
fn effective_weight(estimation: &WeightEstimation, manual_weight: Option<f32>) -> f32 {
    let weight = manual_weight.unwrap_or(estimation.estimated_weight);
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        if weight != 0.0 {
            debug!("ignoring unusable weight {weight}");
        }
        0.0
    }
}

pub fn adjust_rula(
    base: &RulaScore,
    estimation: &WeightEstimation,
    manual_weight: Option<f32>,
) -> WeightAdjusted<RulaScore> {
    let weight = effective_weight(estimation, manual_weight);
    let multiplier = rula_multiplier(weight);

    let final_score = ((base.final_score as f32 * multiplier).ceil() as u8)
        .clamp(RULA_MIN_SCORE, RULA_MAX_SCORE);

    WeightAdjusted {
        score: RulaScore {
            final_score,
            risk_level: RulaRisk::from_score(final_score),
            ..base.clone()
        },
        effective_weight: weight,
        weight_multiplier: multiplier,
        is_weight_adjusted: true,
    }
}

pub fn adjust_reba(
    base: &RebaScore,
    estimation: &WeightEstimation,
    manual_weight: Option<f32>,
) -> WeightAdjusted<RebaScore> {
    let weight = effective_weight(estimation, manual_weight);
    let multiplier = reba_multiplier(weight);

    let rescale = |score: u8| ((score as f32 * multiplier).round() as u8).clamp(1, REBA_MAX_GROUP_SCORE);
    let score_a = rescale(base.score_a);
    let score_b = rescale(base.score_b);
    let final_score = reba::final_score(score_a, score_b, 0);
    let risk_level = RebaRisk::from_score(final_score);

    WeightAdjusted {
        score: RebaScore {
            score_a,
            score_b,
            final_score,
            risk_level,
            action_level: risk_level.action_level(),
            ..base.clone()
        },
        effective_weight: weight,
        weight_multiplier: multiplier,
        is_weight_adjusted: true,
    }
}
