use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, UInt8Array};
use arrow::record_batch::RecordBatch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use riskset_matcher::algorithm::matching::{euclidean, extract_subject_table};
use riskset_matcher::{
    Error, MatchedPair, Matcher, MatchingConfig, MatchingCriteria, TableLayout, match_batch,
    summarize,
};
use rustc_hash::FxHashSet;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn layout(dimension: usize) -> TableLayout {
    TableLayout::new(
        "treated",
        "time",
        (0..dimension).map(|k| format!("x{k}")),
    )
}

fn batch(treated: Vec<bool>, time: Vec<f64>, covariates: Vec<Vec<f64>>) -> RecordBatch {
    let mut columns: Vec<(String, ArrayRef)> = vec![
        ("treated".to_string(), Arc::new(BooleanArray::from(treated))),
        ("time".to_string(), Arc::new(Float64Array::from(time))),
    ];
    for (k, values) in covariates.into_iter().enumerate() {
        columns.push((format!("x{k}"), Arc::new(Float64Array::from(values))));
    }
    RecordBatch::try_from_iter(columns).unwrap()
}

/// Four subjects: treated at times 1 and 3, controls at times 2 and 4
fn scenario_a() -> RecordBatch {
    batch(
        vec![true, false, true, false],
        vec![1.0, 2.0, 3.0, 4.0],
        vec![vec![0.0, 5.0, 1.0, 6.0]],
    )
}

fn random_cohort(seed: u64, subjects: usize, dimension: usize) -> RecordBatch {
    let mut rng = StdRng::seed_from_u64(seed);
    let treated = (0..subjects).map(|_| rng.random_bool(0.3)).collect();
    // Coarse times so that ties occur
    let time = (0..subjects)
        .map(|_| f64::from(rng.random_range(0..20_u8)))
        .collect();
    let covariates = (0..dimension)
        .map(|_| {
            (0..subjects)
                .map(|_| rng.random_range(-3.0..3.0))
                .collect::<Vec<f64>>()
        })
        .collect();
    batch(treated, time, covariates)
}

#[test]
fn scenario_a_matches_in_time_order() {
    init_logging();
    let pairs = match_batch(&scenario_a(), &layout(1), None).unwrap();
    assert_eq!(pairs, vec![MatchedPair::new(0, 1), MatchedPair::new(2, 3)]);
}

#[test]
fn scenario_b_caliper_rejects_everything() {
    init_logging();
    let batch = scenario_a();
    let pairs = match_batch(&batch, &layout(1), Some(0.5)).unwrap();
    assert!(pairs.is_empty());

    let table = extract_subject_table(&batch, &layout(1)).unwrap();
    let summary = summarize(&pairs, &table).unwrap();
    assert_eq!(summary.count, 0);
    assert_eq!(summary.mean_time_diff, None);
}

#[test]
fn scenario_c_ties_are_deterministic_and_split_controls() {
    init_logging();
    let data = || {
        batch(
            vec![true, true, false, false],
            vec![1.0, 1.0, 2.0, 3.0],
            vec![vec![0.0, 0.0, 1.0, -1.0]],
        )
    };

    let first = match_batch(&data(), &layout(1), None).unwrap();
    for _ in 0..10 {
        assert_eq!(match_batch(&data(), &layout(1), None).unwrap(), first);
    }

    // First treated row takes the first control in risk-set order
    assert_eq!(first, vec![MatchedPair::new(0, 2), MatchedPair::new(1, 3)]);
}

#[test]
fn matcher_returns_aligned_rows() {
    init_logging();
    let batch = scenario_a();
    let config = MatchingConfig::builder().layout(layout(1)).build();
    let result = Matcher::new(config).perform_matching(&batch).unwrap();

    assert_eq!(result.matched_count(), 2);
    assert_eq!(result.treated_count, 2);
    assert_eq!(result.unmatched_treated_count, 0);
    assert_eq!(result.matched_treated.num_rows(), 2);
    assert_eq!(result.matched_controls.num_rows(), 2);

    let control_x = result
        .matched_controls
        .column_by_name("x0")
        .unwrap()
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!(control_x.values().to_vec(), vec![5.0, 6.0]);
}

#[test]
fn no_treated_subjects_gives_empty_result() {
    init_logging();
    let batch = batch(vec![false, false], vec![1.0, 2.0], vec![vec![0.0, 1.0]]);
    let config = MatchingConfig::builder().layout(layout(1)).build();
    let result = Matcher::new(config).perform_matching(&batch).unwrap();

    assert!(result.pairs.is_empty());
    assert_eq!(result.matched_treated.num_rows(), 0);

    let table = extract_subject_table(&batch, &layout(1)).unwrap();
    assert_eq!(summarize(&result.pairs, &table).unwrap().count, 0);
}

#[test]
fn integer_indicator_columns_are_accepted() {
    let batch = RecordBatch::try_from_iter(vec![
        ("treated", Arc::new(UInt8Array::from(vec![1, 0])) as ArrayRef),
        ("time", Arc::new(Int64Array::from(vec![3, 3])) as ArrayRef),
        ("x0", Arc::new(Int64Array::from(vec![7, 9])) as ArrayRef),
    ])
    .unwrap();

    let pairs = match_batch(&batch, &layout(1), Some(2.0)).unwrap();
    assert_eq!(pairs, vec![MatchedPair::new(0, 1)]);
}

#[test]
fn configuration_errors_abort_the_run() {
    let batch = scenario_a();

    let err = match_batch(&batch, &layout(2), None).unwrap_err();
    assert!(matches!(err, Error::ColumnNotFound { column } if column == "x1"));

    let err = match_batch(&batch, &layout(1), Some(f64::NAN)).unwrap_err();
    assert!(matches!(err, Error::InvalidCaliper(_)));

    let config = MatchingConfig::builder()
        .layout(layout(1))
        .caliper(-1.0)
        .build();
    let err = Matcher::new(config).perform_matching(&batch).unwrap_err();
    assert!(matches!(err, Error::InvalidCaliper(_)));
}

#[test]
fn randomized_runs_respect_matching_invariants() {
    init_logging();
    for seed in 0..20 {
        let batch = random_cohort(seed, 200, 3);
        let layout = layout(3);
        let table = extract_subject_table(&batch, &layout).unwrap();
        let caliper = if seed % 2 == 0 { Some(1.5) } else { None };

        let config = MatchingConfig::builder()
            .layout(layout.clone())
            .criteria(MatchingCriteria { caliper })
            .build();
        let pairs = Matcher::new(config).perform_matching(&batch).unwrap().pairs;

        let mut controls = FxHashSet::default();
        let mut treated = FxHashSet::default();
        let mut previous_time = f64::NEG_INFINITY;
        for pair in &pairs {
            let t = table.get(pair.treated_id).unwrap();
            let c = table.get(pair.control_id).unwrap();

            assert!(t.treated && !c.treated);
            assert!(controls.insert(pair.control_id), "control reused");
            assert!(treated.insert(pair.treated_id), "treated matched twice");
            assert!(c.time >= t.time);
            assert!(t.time >= previous_time, "pairs out of treated-time order");
            previous_time = t.time;

            if let Some(caliper) = caliper {
                assert!(euclidean(&t.covariates, &c.covariates).unwrap() <= caliper);
            }
        }

        // Determinism, including the summary
        let again = match_batch(&batch, &layout, caliper).unwrap();
        assert_eq!(again, pairs);
        assert_eq!(
            summarize(&again, &table).unwrap(),
            summarize(&pairs, &table).unwrap()
        );
    }
}

#[test]
fn parallel_scoring_gives_same_pairs_as_serial() {
    init_logging();
    let batch = random_cohort(7, 3000, 2);
    let serial = MatchingConfig::builder()
        .layout(layout(2))
        .use_parallel(false)
        .build();
    let parallel = MatchingConfig::builder()
        .layout(layout(2))
        .use_parallel(true)
        .build();

    let serial_pairs = Matcher::new(serial).perform_matching(&batch).unwrap().pairs;
    let parallel_pairs = Matcher::new(parallel).perform_matching(&batch).unwrap().pairs;
    assert_eq!(serial_pairs, parallel_pairs);
    assert!(!serial_pairs.is_empty());
}
