use polars::prelude::*;
// Bring extension traits into scope
use play_tree::dataframe::PlayFrameExt;
use play_tree::play::*;
use play_tree::{PlayStoreBuilder, PlayTreeError};

fn frame() -> DataFrame {
    df!(
        "play_type" => &["run_left", "pass_deep_middle", "punt"],
        "down" => &[1i64, 3, 4],
        "distance_needed" => &[10i32, 18, 9],
        "yard_line" => &[80i16, 45, 95],
        "minutes" => &[55i64, 31, 12],
        "own_score" => &[0i32, 14, 3],
        "opp_score" => &[0i32, 3, 21],
        "distance_gained" => &[4i64, -7, 38],
        "turned_over" => &[false, true, false]
    )
    .unwrap()
}

#[test]
fn rows_become_normalized_plays() {
    let store = frame().to_play_builder().unwrap().finalize().unwrap();
    assert_eq!(store.len(), 3);

    let plays = store.plays();
    assert_eq!(plays[0].play_type(), PlayType::RunLeft);
    assert_eq!(plays[0].situation().down, Down::First);
    assert_eq!(plays[0].situation().distance_needed, DistanceNeeded::TenToFour);
    assert_eq!(plays[0].situation().field_location, FieldLocation::Middle);
    assert_eq!(plays[0].situation().score_differential, ScoreDifferential::Even);

    assert_eq!(plays[1].play_type(), PlayType::PassDeepMiddle);
    assert_eq!(plays[1].situation().time_remaining, TimeRemaining::InsideTwoMinutes);
    assert_eq!(plays[1].situation().score_differential, ScoreDifferential::UpOverSeven);
    assert_eq!(plays[1].distance_gained(), -7);
    assert!(plays[1].turned_over());

    assert_eq!(plays[2].situation().field_location, FieldLocation::OwnRedZone);
    assert_eq!(plays[2].situation().score_differential, ScoreDifferential::DownOverFourteen);
}

#[test]
fn extend_appends_after_existing_plays() {
    let mut builder = PlayStoreBuilder::new();
    builder
        .insert_raw(PlayType::FieldGoal, 4, 3, 20, 5, 0, 0, 0, false)
        .unwrap();
    let added = builder.extend_from_dataframe(&frame()).unwrap();
    assert_eq!(added, 3);
    assert_eq!(builder.len(), 4);

    let store = builder.finalize().unwrap();
    assert_eq!(store.plays()[0].play_type(), PlayType::FieldGoal);
    assert_eq!(store.plays()[3].play_type(), PlayType::Punt);
    assert_eq!(store.plays()[3].id().index(), 3);
}

#[test]
fn invalid_down_names_the_row() {
    let df = df!(
        "play_type" => &["run_left", "run_right"],
        "down" => &[1i64, 5],
        "distance_needed" => &[10i64, 10],
        "yard_line" => &[50i64, 50],
        "minutes" => &[40i64, 40],
        "own_score" => &[0i64, 0],
        "opp_score" => &[0i64, 0],
        "distance_gained" => &[3i64, 3],
        "turned_over" => &[false, false]
    )
    .unwrap();

    let mut builder = PlayStoreBuilder::new();
    let err = builder.extend_from_dataframe(&df).unwrap_err();
    match err {
        PlayTreeError::InvalidRecord { row, reason } => {
            assert_eq!(row, 1);
            assert!(reason.contains("down"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    // nothing from the failed frame was kept
    assert!(builder.is_empty());
}

#[test]
fn unknown_play_type_and_nulls_are_invalid_records() {
    let df = df!(
        "play_type" => &["hail_mary"],
        "down" => &[1i64],
        "distance_needed" => &[10i64],
        "yard_line" => &[50i64],
        "minutes" => &[40i64],
        "own_score" => &[0i64],
        "opp_score" => &[0i64],
        "distance_gained" => &[3i64],
        "turned_over" => &[false]
    )
    .unwrap();
    let err = df.to_play_builder().unwrap_err();
    assert!(matches!(err, PlayTreeError::InvalidRecord { row: 0, .. }));

    let df = df!(
        "play_type" => &["punt"],
        "down" => &[4i64],
        "distance_needed" => &[10i64],
        "yard_line" => &[50i64],
        "minutes" => &[40i64],
        "own_score" => &[0i64],
        "opp_score" => &[0i64],
        "distance_gained" => &[None::<i64>],
        "turned_over" => &[false]
    )
    .unwrap();
    let err = df.to_play_builder().unwrap_err();
    match err {
        PlayTreeError::InvalidRecord { row, reason } => {
            assert_eq!(row, 0);
            assert!(reason.contains("distance_gained"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn out_of_range_numbers_are_invalid_records() {
    let df = df!(
        "play_type" => &["punt"],
        "down" => &[4i64],
        "distance_needed" => &[10i64],
        "yard_line" => &[50i64],
        "minutes" => &[40i64],
        "own_score" => &[0i64],
        "opp_score" => &[0i64],
        "distance_gained" => &[100_000i64],
        "turned_over" => &[false]
    )
    .unwrap();
    let err = df.to_play_builder().unwrap_err();
    assert!(matches!(err, PlayTreeError::InvalidRecord { row: 0, .. }));
}

#[test]
fn missing_or_mistyped_columns_are_polars_errors() {
    let missing = frame().drop("minutes").unwrap();
    let err = missing.to_play_builder().unwrap_err();
    assert!(matches!(err, PlayTreeError::Polars(_)));

    let mistyped = df!(
        "play_type" => &["punt"],
        "down" => &["fourth"],
        "distance_needed" => &[10i64],
        "yard_line" => &[50i64],
        "minutes" => &[40i64],
        "own_score" => &[0i64],
        "opp_score" => &[0i64],
        "distance_gained" => &[40i64],
        "turned_over" => &[false]
    )
    .unwrap();
    let err = mistyped.to_play_builder().unwrap_err();
    assert!(matches!(err, PlayTreeError::Polars(_)));
}
