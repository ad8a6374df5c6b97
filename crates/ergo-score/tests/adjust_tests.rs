mod common;

use common::{neutral_pose, overhead_pose};
use ergo_score::tables::REBA_TABLE_C;
use ergo_score::{
    adjust_reba, adjust_rula, calculate_reba, calculate_rula, reba_multiplier, rula_multiplier,
    RebaActionLevel, RebaRisk, RebaScore, RulaRisk, RulaScore, WeightEstimation,
};

fn rula_base(final_score: u8) -> RulaScore {
    let base = calculate_rula(&neutral_pose()).unwrap();
    RulaScore {
        final_score,
        risk_level: RulaRisk::from_score(final_score),
        ..base
    }
}

fn reba_base(score_a: u8, score_b: u8) -> RebaScore {
    let base = calculate_reba(&neutral_pose()).unwrap();
    RebaScore {
        score_a,
        score_b,
        ..base
    }
}

#[test]
fn test_rula_multiplier_bands() {
    assert_eq!(rula_multiplier(0.0), 1.0);
    assert_eq!(rula_multiplier(5.0), 1.0);
    assert_eq!(rula_multiplier(5.5), 1.5);
    assert_eq!(rula_multiplier(10.0), 1.5);
    assert_eq!(rula_multiplier(10.5), 2.0);
    assert_eq!(rula_multiplier(23.0), 2.0);
    assert_eq!(rula_multiplier(23.5), 3.0);
}

#[test]
fn test_reba_multiplier_bands() {
    assert_eq!(reba_multiplier(5.0), 1.0);
    assert_eq!(reba_multiplier(10.0), 1.1);
    assert_eq!(reba_multiplier(20.0), 1.3);
    assert_eq!(reba_multiplier(40.0), 1.5);
    assert_eq!(reba_multiplier(40.5), 1.8);
}

#[test]
fn test_zero_weight_keeps_base_scores() {
    let idle = WeightEstimation::default();

    let rula = calculate_rula(&overhead_pose()).unwrap();
    let adjusted = adjust_rula(&rula, &idle, None);
    assert_eq!(adjusted.score, rula);
    assert_eq!(adjusted.weight_multiplier, 1.0);
    assert_eq!(adjusted.effective_weight, 0.0);
    assert!(adjusted.is_weight_adjusted);

    let reba = calculate_reba(&overhead_pose()).unwrap();
    let adjusted = adjust_reba(&reba, &idle, None);
    assert_eq!(adjusted.score.final_score, reba.final_score);
    assert_eq!(adjusted.score.score_a, reba.score_a);
    assert_eq!(adjusted.score.score_b, reba.score_b);
    assert_eq!(adjusted.weight_multiplier, 1.0);
}

#[test]
fn test_rula_adjustment_rounds_up_and_clamps() {
    let heavy = WeightEstimation::with_weight(12.0);
    let adjusted = adjust_rula(&rula_base(2), &heavy, None);
    assert_eq!(adjusted.score.final_score, 4);
    assert_eq!(adjusted.score.risk_level, RulaRisk::Investigate);

    let moderate = WeightEstimation::with_weight(8.0);
    assert_eq!(adjust_rula(&rula_base(3), &moderate, None).score.final_score, 5);

    let very_heavy = WeightEstimation::with_weight(30.0);
    let adjusted = adjust_rula(&rula_base(4), &very_heavy, None);
    assert_eq!(adjusted.score.final_score, 7);
    assert_eq!(adjusted.score.risk_level, RulaRisk::InvestigateImmediately);
}

#[test]
fn test_reba_heavy_load_reruns_table_c() {
    let adjusted = adjust_reba(&reba_base(4, 3), &WeightEstimation::with_weight(25.0), None);
    assert_eq!(adjusted.weight_multiplier, 1.5);
    assert_eq!(adjusted.score.score_a, 6);
    assert_eq!(adjusted.score.score_b, 5);
    assert_eq!(adjusted.score.final_score, REBA_TABLE_C[5][4]);
    assert_eq!(adjusted.score.final_score, 8);
    assert_eq!(adjusted.score.risk_level, RebaRisk::High);
    assert_eq!(adjusted.score.action_level, RebaActionLevel::NecessarySoon);
}

#[test]
fn test_reba_group_scores_clamp() {
    let adjusted = adjust_reba(&reba_base(12, 12), &WeightEstimation::with_weight(80.0), None);
    assert_eq!(adjusted.score.score_a, 12);
    assert_eq!(adjusted.score.score_b, 12);
    assert_eq!(adjusted.score.final_score, 12);
}

#[test]
fn test_adjustment_is_monotonic_in_weight() {
    let weights = [0.0, 3.0, 5.0, 7.5, 10.0, 15.0, 20.0, 23.0, 30.0, 40.0, 60.0];
    for base in 1..=7 {
        let scores: Vec<u8> = weights
            .iter()
            .map(|&w| adjust_rula(&rula_base(base), &WeightEstimation::with_weight(w), None).score.final_score)
            .collect();
        assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]), "{:?}", scores);
        assert!(scores[0] >= base);
    }
    for a in 1..=12 {
        for b in 1..=12 {
            let scores: Vec<u8> = weights
                .iter()
                .map(|&w| adjust_reba(&reba_base(a, b), &WeightEstimation::with_weight(w), None).score.final_score)
                .collect();
            assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]), "{:?}", scores);
        }
    }
}

#[test]
fn test_manual_weight_overrides_estimate() {
    let estimated = WeightEstimation::with_weight(30.0);

    let adjusted = adjust_rula(&rula_base(2), &estimated, Some(0.0));
    assert_eq!(adjusted.effective_weight, 0.0);
    assert_eq!(adjusted.score.final_score, 2);

    let adjusted = adjust_rula(&rula_base(2), &WeightEstimation::default(), Some(12.0));
    assert_eq!(adjusted.effective_weight, 12.0);
    assert_eq!(adjusted.weight_multiplier, 2.0);
}

#[test]
fn test_unusable_weights_count_as_zero() {
    for weight in [f32::NAN, f32::INFINITY, -4.0] {
        let adjusted = adjust_reba(&reba_base(4, 3), &WeightEstimation::default(), Some(weight));
        assert_eq!(adjusted.effective_weight, 0.0);
        assert_eq!(adjusted.weight_multiplier, 1.0);
        assert_eq!(adjusted.score.final_score, REBA_TABLE_C[3][2]);
    }
}

#[test]
fn test_base_score_is_untouched() {
    let base = reba_base(4, 3);
    let before = base.clone();
    let _ = adjust_reba(&base, &WeightEstimation::with_weight(50.0), None);
    assert_eq!(base, before);
}

#[test]
fn test_serializes_flattened() {
    let adjusted = adjust_rula(&rula_base(2), &WeightEstimation::with_weight(12.0), None);
    let json = serde_json::to_value(&adjusted).unwrap();
    assert_eq!(json["finalScore"], 4);
    assert_eq!(json["riskLevel"], "Investigate");
    assert_eq!(json["isWeightAdjusted"], true);
    assert_eq!(json["weightMultiplier"], 2.0);
    assert_eq!(json["effectiveWeight"], 12.0);
}
