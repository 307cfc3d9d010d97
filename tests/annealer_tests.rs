mod common;

use common::{qwerty_document, sample_corpus, LayoutBuilder};
use keyanneal::config::ScoringWeights;
use keyanneal::corpus::FrequencyModel;
use keyanneal::error::KeyAnnealError;
use keyanneal::layout::{Layout, Location};
use keyanneal::optimizer::{AnnealParams, Annealer};

fn quick_params(seed: u64) -> AnnealParams {
    AnnealParams {
        initial_temperature: 100.0,
        cooling_rate: 0.9,
        seed: Some(seed),
        ..AnnealParams::default()
    }
}

fn qwerty(model: &FrequencyModel) -> Layout {
    Layout::from_document(&qwerty_document(), model).unwrap()
}

#[test]
fn two_key_search_terminates_on_schedule() {
    // `a` is typed far more often but starts off the home row.
    let model = FrequencyModel::from_text("aaaaab");
    let layout = LayoutBuilder::new()
        .key("a", "A", 0.5, 0.0)
        .key("b", "B", 5.0, 2.0)
        .build(&model);

    let outcome = Annealer::new(layout, ScoringWeights::default(), quick_params(1))
        .unwrap()
        .run();

    assert_eq!(outcome.iterations, 44);
    assert!(outcome.final_temperature <= 1.0);
    assert!(outcome.best_score <= outcome.initial_score);
    assert!(outcome.best_score < outcome.initial_score);
    assert_eq!(outcome.best.location_of("a"), Some(Location::new(5.0, 2.0)));
}

#[test]
fn best_score_never_increases() {
    let model = FrequencyModel::from_text(sample_corpus());
    let params = AnnealParams {
        initial_temperature: 1e4,
        cooling_rate: 0.99,
        seed: Some(17),
        ..AnnealParams::default()
    };
    let outcome = Annealer::new(qwerty(&model), ScoringWeights::default(), params)
        .unwrap()
        .run();

    assert_eq!(outcome.trace.len(), outcome.iterations);
    assert_eq!(outcome.accepted + outcome.rejected, outcome.iterations);

    let mut best = outcome.initial_score;
    for (i, point) in outcome.trace.iter().enumerate() {
        assert_eq!(point.iteration, i + 1);
        assert!(point.best_score <= best);
        assert!(point.best_score <= point.current_score);
        best = point.best_score;
    }
    assert_eq!(best, outcome.best_score);

    let temps: Vec<f64> = outcome.trace.iter().map(|p| p.temperature).collect();
    assert!(temps.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn best_snapshot_is_independent_of_later_moves() {
    let model = FrequencyModel::from_text(sample_corpus());
    let weights = ScoringWeights::default();
    let params = AnnealParams {
        initial_temperature: 1e6,
        cooling_rate: 0.995,
        seed: Some(5),
        ..AnnealParams::default()
    };
    let outcome = Annealer::new(qwerty(&model), weights, params)
        .unwrap()
        .run();

    // Rescoring the snapshot must reproduce the recorded best exactly.
    assert_eq!(outcome.best.total_score(&weights), outcome.best_score);
}

#[test]
fn current_score_tracks_the_live_layout() {
    let model = FrequencyModel::from_text(sample_corpus());
    let weights = ScoringWeights::default();
    let mut annealer = Annealer::new(qwerty(&model), weights, quick_params(23)).unwrap();

    while !annealer.is_finished() {
        annealer.step();
        assert_eq!(annealer.current().total_score(&weights), annealer.current_score());
        assert!(annealer.best_score() <= annealer.current_score());
    }
}

#[test]
fn shift_swaps_can_be_disabled() {
    let model = FrequencyModel::from_text(sample_corpus());
    let layout = qwerty(&model);
    let mut pairs: Vec<(String, String)> = layout
        .keys()
        .iter()
        .map(|k| (k.base.clone(), k.shift.clone()))
        .collect();
    pairs.sort();

    let params = AnnealParams {
        initial_temperature: 1e3,
        cooling_rate: 0.98,
        shift_swaps: false,
        seed: Some(8),
        ..AnnealParams::default()
    };
    let outcome = Annealer::new(layout, ScoringWeights::default(), params)
        .unwrap()
        .run();

    let mut after: Vec<(String, String)> = outcome
        .best
        .keys()
        .iter()
        .map(|k| (k.base.clone(), k.shift.clone()))
        .collect();
    after.sort();
    assert_eq!(after, pairs);
}

#[test]
fn invalid_schedules_are_rejected_up_front() {
    let model = FrequencyModel::default();
    for params in [
        AnnealParams {
            cooling_rate: 1.5,
            ..quick_params(1)
        },
        AnnealParams {
            cooling_rate: 0.0,
            ..quick_params(1)
        },
        AnnealParams {
            initial_temperature: -1.0,
            ..quick_params(1)
        },
        AnnealParams {
            initial_temperature: f64::INFINITY,
            ..quick_params(1)
        },
    ] {
        let res = Annealer::new(qwerty(&model), ScoringWeights::default(), params);
        assert!(matches!(res, Err(KeyAnnealError::Config(_))));
    }
}

#[test]
fn improvement_is_reported_against_a_baseline() {
    let model = FrequencyModel::from_text("aaaaab");
    let layout = LayoutBuilder::new()
        .key("a", "A", 0.5, 0.0)
        .key("b", "B", 5.0, 2.0)
        .build(&model);
    let outcome = Annealer::new(layout, ScoringWeights::default(), quick_params(2))
        .unwrap()
        .run();

    let pct = outcome.improvement_over(outcome.initial_score).unwrap();
    assert!(pct > 0.0);
    assert_eq!(outcome.improvement_over(0.0), None);
}
