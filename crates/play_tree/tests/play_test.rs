use play_tree::play::*;
use play_tree::PlayTreeError;

#[test]
fn distance_needed_boundaries() {
    assert_eq!(DistanceNeeded::from_yards(0), DistanceNeeded::OneOrLess);
    assert_eq!(DistanceNeeded::from_yards(1), DistanceNeeded::OneOrLess);
    assert_eq!(DistanceNeeded::from_yards(2), DistanceNeeded::FourToOne);
    assert_eq!(DistanceNeeded::from_yards(4), DistanceNeeded::FourToOne);
    assert_eq!(DistanceNeeded::from_yards(5), DistanceNeeded::TenToFour);
    assert_eq!(DistanceNeeded::from_yards(10), DistanceNeeded::TenToFour);
    assert_eq!(DistanceNeeded::from_yards(19), DistanceNeeded::TwentyToTen);
    assert_eq!(DistanceNeeded::from_yards(20), DistanceNeeded::OverTwenty);
}

#[test]
fn field_location_boundaries() {
    assert_eq!(FieldLocation::from_yard_line(99), FieldLocation::OwnRedZone);
    assert_eq!(FieldLocation::from_yard_line(90), FieldLocation::OwnRedZone);
    assert_eq!(FieldLocation::from_yard_line(89), FieldLocation::Middle);
    assert_eq!(FieldLocation::from_yard_line(11), FieldLocation::Middle);
    assert_eq!(FieldLocation::from_yard_line(10), FieldLocation::OppRedZone);
    assert_eq!(FieldLocation::from_yard_line(1), FieldLocation::OppRedZone);
}

#[test]
fn two_minute_warning_applies_to_both_halves() {
    assert_eq!(TimeRemaining::from_minutes(0), TimeRemaining::InsideTwoMinutes);
    assert_eq!(TimeRemaining::from_minutes(1), TimeRemaining::InsideTwoMinutes);
    assert_eq!(TimeRemaining::from_minutes(2), TimeRemaining::OutsideTwoMinutes);
    assert_eq!(TimeRemaining::from_minutes(29), TimeRemaining::OutsideTwoMinutes);
    assert_eq!(TimeRemaining::from_minutes(30), TimeRemaining::InsideTwoMinutes);
    assert_eq!(TimeRemaining::from_minutes(31), TimeRemaining::InsideTwoMinutes);
    assert_eq!(TimeRemaining::from_minutes(32), TimeRemaining::OutsideTwoMinutes);
}

#[test]
fn score_differential_boundaries() {
    use ScoreDifferential::*;
    assert_eq!(ScoreDifferential::from_scores(0, 15), DownOverFourteen);
    assert_eq!(ScoreDifferential::from_scores(0, 14), DownOverSeven);
    assert_eq!(ScoreDifferential::from_scores(0, 8), DownOverSeven);
    assert_eq!(ScoreDifferential::from_scores(0, 7), DownSevenLess);
    assert_eq!(ScoreDifferential::from_scores(3, 3), Even);
    assert_eq!(ScoreDifferential::from_scores(7, 0), UpSevenLess);
    assert_eq!(ScoreDifferential::from_scores(14, 0), UpOverSeven);
    assert_eq!(ScoreDifferential::from_scores(15, 0), UpOverFourteen);
}

#[test]
fn situation_from_raw_rejects_invalid_down() {
    let situation = Situation::from_raw(3, 7, 45, 40, 10, 3).unwrap();
    assert_eq!(situation.down, Down::Third);
    assert_eq!(situation.distance_needed, DistanceNeeded::TenToFour);
    assert_eq!(situation.field_location, FieldLocation::Middle);
    assert_eq!(situation.time_remaining, TimeRemaining::OutsideTwoMinutes);
    assert_eq!(situation.score_differential, ScoreDifferential::UpSevenLess);

    for down in [0, 5, -1] {
        let err = Situation::from_raw(down, 7, 45, 40, 10, 3).unwrap_err();
        assert!(matches!(err, PlayTreeError::InvalidSituation(_)));
    }
}

#[test]
fn value_codes_match_enumeration_order() {
    let situation = Situation::new(
        Down::Fourth,
        DistanceNeeded::OverTwenty,
        FieldLocation::OppRedZone,
        TimeRemaining::InsideTwoMinutes,
        ScoreDifferential::Even,
    );
    assert_eq!(situation.value(Characteristic::Down), 3);
    assert_eq!(situation.value(Characteristic::DistanceNeeded), 0);
    assert_eq!(situation.value(Characteristic::FieldLocation), 2);
    assert_eq!(situation.value(Characteristic::TimeRemaining), 1);
    assert_eq!(situation.value(Characteristic::ScoreDifferential), 3);
}

#[test]
fn domain_sizes_and_labels() {
    let sizes: Vec<usize> = Characteristic::ALL.iter().map(|c| c.domain_size()).collect();
    assert_eq!(sizes, vec![4, 5, 3, 2, 7]);
    assert_eq!(PlayType::COUNT, 11);

    assert_eq!(Characteristic::Down.value_label(0), Some("1st down"));
    assert_eq!(Characteristic::TimeRemaining.value_label(2), None);
}

#[test]
fn keys_round_trip_through_from_str() {
    for &play_type in PlayType::ALL {
        let parsed: PlayType = play_type.to_string().parse().unwrap();
        assert_eq!(parsed, play_type);
    }
    assert_eq!("down_number".parse::<Characteristic>(), Ok(Characteristic::Down));
    assert!("hail_mary".parse::<PlayType>().is_err());
}
