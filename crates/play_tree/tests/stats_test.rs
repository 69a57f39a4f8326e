use approx::assert_relative_eq;
use play_tree::play::*;
use play_tree::stats::*;
use play_tree::{PlayStore, PlayStoreBuilder};

fn situation(down: Down) -> Situation {
    Situation::new(
        down,
        DistanceNeeded::TenToFour,
        FieldLocation::Middle,
        TimeRemaining::OutsideTwoMinutes,
        ScoreDifferential::Even,
    )
}

// first down: 3 runs, 1 short pass; second down: 1 run, 3 short passes (one intercepted)
fn store() -> PlayStore {
    let mut builder = PlayStoreBuilder::new();
    for gained in [2, 4, 6] {
        builder.insert(PlayType::RunMiddle, situation(Down::First), gained, false).unwrap();
    }
    builder.insert(PlayType::PassShortMiddle, situation(Down::First), 8, false).unwrap();
    builder.insert(PlayType::RunMiddle, situation(Down::Second), 0, true).unwrap();
    for (gained, turned_over) in [(10, false), (0, true), (5, false)] {
        builder.insert(PlayType::PassShortMiddle, situation(Down::Second), gained, turned_over).unwrap();
    }
    builder.finalize().unwrap()
}

fn leaves(store: &PlayStore) -> (DetailedSummaries, DetailedSummaries) {
    let mut first = store.indexes();
    let mut siblings = first
        .split_by_characteristic(store.plays(), Characteristic::Down)
        .unwrap();
    let second = siblings.remove(0);
    (
        DetailedSummaries::build(store.plays(), &first, store.overall()),
        DetailedSummaries::build(store.plays(), &second, store.overall()),
    )
}

#[test]
fn overall_summaries_cover_every_play() {
    let store = store();
    let overall = store.overall();
    assert_eq!(overall.total(), 8);

    let runs = overall.get(PlayType::RunMiddle);
    assert_eq!(runs.count(), 4);
    assert_relative_eq!(runs.mean(), 3.0);
    // population variance of 2, 4, 6, 0
    assert_relative_eq!(runs.variance(), 5.0);
    assert_relative_eq!(runs.std_dev(), 5.0_f64.sqrt());
    assert_eq!(runs.turnover_rate(), 250);

    assert_eq!(overall.get(PlayType::Punt).count(), 0);
}

#[test]
fn detailed_summaries_report_shares_in_permille() {
    let store = store();
    let (first, second) = leaves(&store);

    assert_eq!(first.len(), 2);
    assert_eq!(first.total_plays(), 4);
    let runs = first.get(PlayType::RunMiddle).unwrap();
    assert_eq!(runs.play_count(), 3);
    assert_eq!(runs.condition_share(), 750);
    assert_eq!(runs.type_share(), 750);
    assert_relative_eq!(runs.mean_distance(), 4.0);
    assert_eq!(runs.turnover_rate(), 0);
    assert_eq!(runs.overall().count(), 4);

    let passes = second.get(PlayType::PassShortMiddle).unwrap();
    assert_eq!(passes.distances(), &[0, 5, 10]);
    assert_eq!(passes.turnover_count(), 1);
    assert_eq!(passes.turnover_rate(), 333);
    assert_eq!(passes.condition_share(), 750);
    assert!(second.get(PlayType::Punt).is_none());
}

#[test]
fn merge_recomputes_against_combined_population() {
    let store = store();
    let (mut first, second) = leaves(&store);
    first.merge(&second);

    assert_eq!(first.total_plays(), 8);
    let runs = first.get(PlayType::RunMiddle).unwrap();
    assert_eq!(runs.play_count(), 4);
    assert_eq!(runs.distances(), &[0, 2, 4, 6]);
    assert_eq!(runs.condition_share(), 500);
    assert_eq!(runs.type_share(), 1000);
    assert_relative_eq!(runs.mean_distance(), 3.0);
    assert_relative_eq!(runs.distance_variance(), 5.0);
    assert_eq!(runs.turnover_rate(), 250);
}

#[test]
fn merge_rescales_types_present_on_one_side_only() {
    let overall = GroupStats::from_samples(&[1, 2, 3, 4], 0);
    let mut ours: DetailedSummaries = [
        (PlayType::RunLeft, DetailedSummary::new(vec![1, 2], 0, 2, overall)),
    ]
    .into_iter()
    .collect();
    let theirs: DetailedSummaries = [
        (PlayType::Punt, DetailedSummary::new(vec![40, 35], 0, 2, overall)),
    ]
    .into_iter()
    .collect();

    ours.merge(&theirs);
    assert_eq!(ours.len(), 2);
    assert_eq!(ours.get(PlayType::RunLeft).unwrap().condition_share(), 500);
    assert_eq!(ours.get(PlayType::Punt).unwrap().condition_share(), 500);
    assert_eq!(ours.get(PlayType::Punt).unwrap().distances(), &[35, 40]);
}

#[test]
fn merge_with_empty_is_identity() {
    let store = store();
    let (first, _) = leaves(&store);
    let mut merged = first.clone();
    merged.merge(&DetailedSummaries::new());
    assert_eq!(merged, first);

    let mut empty = DetailedSummaries::new();
    empty.merge(&first);
    assert_eq!(empty, first);
}

#[test]
fn summary_display() {
    let overall = GroupStats::from_samples(&[0, 10], 1);
    let summary = DetailedSummary::new(vec![10, 0], 1, 4, overall);
    assert_eq!(
        summary.to_string(),
        "pct of condition: 50.0% pct of type: 100.0% avg dist: 5.0 dist var: 25.0 turnover pct: 50.0%"
    );
}
