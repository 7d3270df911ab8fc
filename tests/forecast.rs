use chainwalk::{
    entropy_bits, generate_walk, Error, ForecastRanker, Recommendation, RowState, Topology,
    TransitionLearner, UnobservedPolicy, WalkConfig,
};
use proptest::prelude::*;

fn abc() -> Topology {
    Topology::new([("A", vec!["B"]), ("B", vec!["B", "C"]), ("C", vec!["A"])]).unwrap()
}

fn trained_abc() -> (Topology, TransitionLearner) {
    let t = abc();
    let mut l = TransitionLearner::new(t.len());
    l.train(&[0, 1, 1, 2, 0, 1]).unwrap();
    (t, l)
}

fn trained_mansion(steps: usize, seed: u64) -> (Topology, TransitionLearner) {
    let t = Topology::mansion();
    let walk = generate_walk(&t, &WalkConfig { steps, seed, ..WalkConfig::default() }).unwrap();
    let mut l = TransitionLearner::new(t.len());
    l.train(&walk).unwrap();
    (t, l)
}

fn assert_sums_to_one(v: &[f64]) {
    let total: f64 = v.iter().sum();
    assert!((total - 1.0).abs() < 1e-9, "sum={total} for {v:?}");
}

#[test]
fn scenario_rows_and_forecasts() {
    let (_, l) = trained_abc();
    assert_eq!(l.row_state(0).unwrap(), RowState::Observed(&[0.0, 1.0, 0.0]));
    assert_eq!(l.row_state(1).unwrap(), RowState::Observed(&[0.0, 0.5, 0.5]));
    assert_eq!(l.row_state(2).unwrap(), RowState::Observed(&[1.0, 0.0, 0.0]));

    let one = l.predict(0, 1).unwrap();
    assert_eq!(one, vec![0.0, 1.0, 0.0]);
    assert_eq!(entropy_bits(&one), 0.0);

    let two = l.predict(0, 2).unwrap();
    assert_eq!(two, vec![0.0, 0.5, 0.5]);
    assert_eq!(entropy_bits(&two), 1.0);
}

#[test]
fn scenario_ranking() {
    let (t, l) = trained_abc();
    let ranker = ForecastRanker::new(&t, &l).unwrap();
    let f = ranker.recommend("A", 2, 2).unwrap();
    assert_eq!(
        f.ranked,
        vec![
            Recommendation { location: "B".into(), probability: 50.0 },
            Recommendation { location: "C".into(), probability: 50.0 },
        ]
    );
    assert_eq!(f.entropy, 1.0);
}

#[test]
fn untrained_learner_fails_strictly() {
    let t = abc();
    let l = TransitionLearner::new(t.len());
    for s in 0..t.len() {
        assert!(matches!(l.predict(s, 3), Err(Error::UnobservedState { index }) if index == s));
    }
    let ranker = ForecastRanker::new(&t, &l).unwrap();
    assert!(matches!(
        ranker.recommend("B", 1, 3),
        Err(Error::UnobservedState { index: 1 })
    ));
}

#[test]
fn untrained_learner_under_absorbing_policy_stays_put() {
    let t = abc();
    let l = TransitionLearner::new(t.len()).with_policy(UnobservedPolicy::AbsorbingSelfLoop);
    assert_eq!(l.predict(2, 7).unwrap(), vec![0.0, 0.0, 1.0]);
    let f = ForecastRanker::new(&t, &l).unwrap().recommend_default("C", 7).unwrap();
    assert_eq!(f.ranked[0], Recommendation { location: "C".into(), probability: 100.0 });
    assert_eq!(f.entropy, 0.0);
}

#[test]
fn large_horizon_on_mansion_approaches_stationary_mix() {
    let (t, l) = trained_mansion(20_000, 42);
    let foyer = t.index_of("Foyer").unwrap();
    let far = l.predict(foyer, 1_000_001).unwrap();
    assert_sums_to_one(&far);
    // The mansion is bipartite, so odd and even horizons never mix fully;
    // the lazy stationary distribution is the average of the two phases.
    let next = l.predict(foyer, 1_000_002).unwrap();
    let avg: Vec<f64> = far.iter().zip(&next).map(|(a, b)| 0.5 * (a + b)).collect();
    let pi = l.stationary_distribution(Default::default()).unwrap();
    for (a, p) in avg.iter().zip(&pi) {
        assert!((a - p).abs() < 1e-6, "avg={avg:?} pi={pi:?}");
    }
}

#[test]
fn learned_mansion_matches_uniform_neighbor_choice() {
    let (t, l) = trained_mansion(50_000, 7);
    for (i, name) in t.locations().iter().enumerate() {
        let nbrs = t.neighbors(name).unwrap();
        for nb in &nbrs {
            let p = l.probability(i, t.index_of(nb).unwrap()).unwrap();
            let expected = 1.0 / nbrs.len() as f64;
            assert!((p - expected).abs() < 0.05, "{name} -> {nb}: {p}");
        }
    }
}

#[test]
fn recommend_is_deterministic() {
    let (t, l) = trained_mansion(5_000, 11);
    let ranker = ForecastRanker::new(&t, &l).unwrap();
    let a = ranker.recommend("Hallway", 4, 9).unwrap();
    let b = ranker.recommend("Hallway", 4, 9).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.ranked.len(), 9);
    for w in a.ranked.windows(2) {
        assert!(w[0].probability >= w[1].probability);
    }
}

#[cfg(feature = "serde")]
#[test]
fn training_from_move_log_equals_live_training() {
    use chainwalk::MoveLog;

    let t = Topology::mansion();
    let walk = generate_walk(&t, &WalkConfig { steps: 2_000, ..WalkConfig::default() }).unwrap();
    let json = MoveLog::from_walk(walk.clone()).to_json_string().unwrap();

    let mut live = TransitionLearner::new(t.len());
    live.train(&walk).unwrap();
    let mut replayed = TransitionLearner::new(t.len());
    replayed.train_log(&MoveLog::from_json_str(&json).unwrap()).unwrap();

    for i in 0..t.len() {
        assert_eq!(live.counts(i).unwrap(), replayed.counts(i).unwrap());
    }
}

#[cfg(feature = "serde")]
#[test]
fn invalid_move_log_is_not_trained() {
    use chainwalk::MoveLog;

    let mut l = TransitionLearner::new(3);
    let log = MoveLog::from_json_str(r#"{"metadata": {"total_steps": 3}, "movements": [0, 1]}"#).unwrap();
    assert!(matches!(l.train_log(&log), Err(Error::LogLengthMismatch { .. })));
    assert_eq!(l.total_observations(), 0);
}

/// Random sequences over `n` states that visit every state as a source.
fn covering_sequence() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1usize..7).prop_flat_map(|n| {
        (Just(n), prop::collection::vec(0..n, 0..60)).prop_map(|(n, tail)| {
            // Every state appears before the final element, so every row is a source.
            let mut seq: Vec<usize> = (0..n).collect();
            seq.extend(tail);
            seq.push(0);
            (n, seq)
        })
    })
}

proptest! {
    #[test]
    fn prop_observed_rows_sum_to_one(n in 1usize..7, seq in prop::collection::vec(0usize..7, 0..80)) {
        let seq: Vec<usize> = seq.into_iter().map(|x| x % n).collect();
        let mut l = TransitionLearner::new(n);
        l.train(&seq).unwrap();
        for i in l.observed_rows() {
            match l.row_state(i).unwrap() {
                RowState::Observed(row) => assert_sums_to_one(row),
                RowState::Unobserved => panic!("observed row {i} reported unobserved"),
            }
        }
    }

    #[test]
    fn prop_zero_horizon_is_one_hot((n, seq) in covering_sequence(), s in 0usize..7) {
        let s = s % n;
        let mut l = TransitionLearner::new(n);
        l.train(&seq).unwrap();
        let v = l.predict(s, 0).unwrap();
        for (i, &p) in v.iter().enumerate() {
            prop_assert_eq!(p, if i == s { 1.0 } else { 0.0 });
        }
    }

    #[test]
    fn prop_forecasts_preserve_mass((n, seq) in covering_sequence(), s in 0usize..7, k in 0i64..200) {
        let mut l = TransitionLearner::new(n);
        l.train(&seq).unwrap();
        let v = l.predict(s % n, k).unwrap();
        assert_sums_to_one(&v);
        prop_assert!(v.iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn prop_entropy_is_bounded((n, seq) in covering_sequence(), s in 0usize..7, k in 0i64..20) {
        let mut l = TransitionLearner::new(n);
        l.train(&seq).unwrap();
        let v = l.predict(s % n, k).unwrap();
        let support = v.iter().filter(|&&p| p > 0.0).count();
        let h = entropy_bits(&v);
        prop_assert!(h >= -1e-12);
        prop_assert!(h <= (support as f64).log2() + 1e-9);
        if support == 1 {
            prop_assert!(h.abs() < 1e-9);
        }
    }

    #[test]
    fn prop_uniform_entropy_is_log2_support(m in 1usize..32) {
        let v = vec![1.0 / m as f64; m];
        prop_assert!((entropy_bits(&v) - (m as f64).log2()).abs() < 1e-9);
    }

    #[test]
    fn prop_split_training_is_additive(
        n in 1usize..6,
        a in prop::collection::vec(0usize..6, 0..40),
        b in prop::collection::vec(0usize..6, 0..40),
    ) {
        let a: Vec<usize> = a.into_iter().map(|x| x % n).collect();
        let b: Vec<usize> = b.into_iter().map(|x| x % n).collect();

        let mut split = TransitionLearner::new(n);
        split.train(&a).unwrap();
        split.train(&b).unwrap();

        let mut swapped = TransitionLearner::new(n);
        swapped.train(&b).unwrap();
        swapped.train(&a).unwrap();

        for i in 0..n {
            prop_assert_eq!(split.counts(i).unwrap(), swapped.counts(i).unwrap());
            prop_assert_eq!(split.row_state(i).unwrap(), swapped.row_state(i).unwrap());
        }
    }
}
