//! Plays and the categorical situations they were called in.
//!
//! Every situation attribute is a small closed enumeration. Tree code handles
//! them uniformly through [`Characteristic`] and the numeric codes returned by
//! [`Situation::value`], which double as bucket positions in the play indexes.

use crate::error::{PlayTreeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed enumeration whose variants map onto dense codes `0..COUNT`.
pub trait Category: Copy + Ord + fmt::Debug + 'static {
    const ALL: &'static [Self];
    const COUNT: usize = Self::ALL.len();

    fn index(self) -> usize;

    /// Machine-readable name, used by `Display` and `FromStr`.
    fn key(self) -> &'static str;

    /// Human-readable name used in tree dumps.
    fn label(self) -> &'static str;

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.key() == key)
    }
}

macro_rules! category {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => ($key:literal, $label:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl Category for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn index(self) -> usize {
                self as usize
            }

            fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::from_key(s)
                    .ok_or_else(|| format!("unknown {} '{}'", stringify!($name), s))
            }
        }
    };
}

category! {
    /// Play types derived from those listed in the play-by-play data.
    PlayType {
        RunLeft => ("run_left", "Run Left"),
        RunMiddle => ("run_middle", "Run Up Middle"),
        RunRight => ("run_right", "Run Right"),
        PassShortRight => ("pass_short_right", "Short Pass Right"),
        PassShortMiddle => ("pass_short_middle", "Short Pass Middle"),
        PassShortLeft => ("pass_short_left", "Short Pass Left"),
        PassDeepRight => ("pass_deep_right", "Deep Pass Right"),
        PassDeepMiddle => ("pass_deep_middle", "Deep Pass Middle"),
        PassDeepLeft => ("pass_deep_left", "Deep Pass Left"),
        FieldGoal => ("field_goal", "Field Goal Attempt"),
        Punt => ("punt", "Punt"),
    }
}

category! {
    /// Situation attributes shown to affect play selection.
    Characteristic {
        Down => ("down_number", "Down"),
        DistanceNeeded => ("distance_needed", "Distance needed"),
        FieldLocation => ("field_location", "Field location"),
        TimeRemaining => ("time_remaining", "Time remaining"),
        ScoreDifferential => ("score_differential", "Score differential"),
    }
}

category! {
    Down {
        First => ("first", "1st down"),
        Second => ("second", "2nd down"),
        Third => ("third", "3rd down"),
        Fourth => ("fourth", "4th down"),
    }
}

category! {
    /// Yards needed for a first down, grouped so outliers do not dominate splits.
    DistanceNeeded {
        OverTwenty => ("over_twenty", "over twenty yards"),
        TwentyToTen => ("twenty_to_ten", "ten to twenty yards"),
        TenToFour => ("ten_to_four", "four to ten yards"),
        FourToOne => ("four_to_one", "one to four yards"),
        OneOrLess => ("one_or_less", "less than one yard"),
    }
}

category! {
    /// Red zones here are the ten yards closest to either goal line.
    FieldLocation {
        OwnRedZone => ("own_red_zone", "backed up, own red zone"),
        Middle => ("middle", "between red zones"),
        OppRedZone => ("opp_red_zone", "scoring range, opponent red zone"),
    }
}

category! {
    TimeRemaining {
        OutsideTwoMinutes => ("outside_two_minutes", "Outside two minute warning"),
        InsideTwoMinutes => ("inside_two_minutes", "Inside two minute warning"),
    }
}

category! {
    ScoreDifferential {
        DownOverFourteen => ("down_over_fourteen", "Down over 14 points"),
        DownOverSeven => ("down_over_seven", "Down between 7 and 14 points"),
        DownSevenLess => ("down_seven_less", "Down 7 or less points"),
        Even => ("even", "Tied"),
        UpSevenLess => ("up_seven_less", "Up 7 or less points"),
        UpOverSeven => ("up_over_seven", "Up between 7 and 14 points"),
        UpOverFourteen => ("up_over_fourteen", "Up over 14 points"),
    }
}

impl Characteristic {
    /// Number of values the characteristic can take.
    pub fn domain_size(self) -> usize {
        match self {
            Characteristic::Down => Down::COUNT,
            Characteristic::DistanceNeeded => DistanceNeeded::COUNT,
            Characteristic::FieldLocation => FieldLocation::COUNT,
            Characteristic::TimeRemaining => TimeRemaining::COUNT,
            Characteristic::ScoreDifferential => ScoreDifferential::COUNT,
        }
    }

    /// Human-readable label of a value code of this characteristic.
    pub fn value_label(self, code: usize) -> Option<&'static str> {
        match self {
            Characteristic::Down => Down::from_index(code).map(Down::label),
            Characteristic::DistanceNeeded => DistanceNeeded::from_index(code).map(DistanceNeeded::label),
            Characteristic::FieldLocation => FieldLocation::from_index(code).map(FieldLocation::label),
            Characteristic::TimeRemaining => TimeRemaining::from_index(code).map(TimeRemaining::label),
            Characteristic::ScoreDifferential => {
                ScoreDifferential::from_index(code).map(ScoreDifferential::label)
            }
        }
    }
}

impl Down {
    pub fn from_number(down: i16) -> Option<Self> {
        match down {
            1 => Some(Down::First),
            2 => Some(Down::Second),
            3 => Some(Down::Third),
            4 => Some(Down::Fourth),
            _ => None,
        }
    }
}

impl DistanceNeeded {
    pub fn from_yards(yards: i16) -> Self {
        if yards <= 1 {
            DistanceNeeded::OneOrLess
        } else if yards <= 4 {
            DistanceNeeded::FourToOne
        } else if yards <= 10 {
            DistanceNeeded::TenToFour
        } else if yards < 20 {
            DistanceNeeded::TwentyToTen
        } else {
            DistanceNeeded::OverTwenty
        }
    }
}

impl FieldLocation {
    /// `yard_line` counts the offense's yards to go to the goal line.
    pub fn from_yard_line(yard_line: i16) -> Self {
        if yard_line >= 90 {
            FieldLocation::OwnRedZone
        } else if yard_line > 10 {
            FieldLocation::Middle
        } else {
            FieldLocation::OppRedZone
        }
    }
}

impl TimeRemaining {
    /// `minutes` is the time remaining in the whole game.
    pub fn from_minutes(minutes: i16) -> Self {
        if minutes < 2 || (30..32).contains(&minutes) {
            TimeRemaining::InsideTwoMinutes
        } else {
            TimeRemaining::OutsideTwoMinutes
        }
    }
}

impl ScoreDifferential {
    pub fn from_scores(own_score: i16, opp_score: i16) -> Self {
        let diff = i32::from(own_score) - i32::from(opp_score);
        if diff < -14 {
            ScoreDifferential::DownOverFourteen
        } else if diff < -7 {
            ScoreDifferential::DownOverSeven
        } else if diff < 0 {
            ScoreDifferential::DownSevenLess
        } else if diff == 0 {
            ScoreDifferential::Even
        } else if diff <= 7 {
            ScoreDifferential::UpSevenLess
        } else if diff <= 14 {
            ScoreDifferential::UpOverSeven
        } else {
            ScoreDifferential::UpOverFourteen
        }
    }
}

/// The conditions a play was called under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Situation {
    pub down: Down,
    pub distance_needed: DistanceNeeded,
    pub field_location: FieldLocation,
    pub time_remaining: TimeRemaining,
    pub score_differential: ScoreDifferential,
}

impl Situation {
    pub fn new(
        down: Down,
        distance_needed: DistanceNeeded,
        field_location: FieldLocation,
        time_remaining: TimeRemaining,
        score_differential: ScoreDifferential,
    ) -> Self {
        Self {
            down,
            distance_needed,
            field_location,
            time_remaining,
            score_differential,
        }
    }

    /// Normalize raw game numbers into a categorical situation.
    pub fn from_raw(
        down: i16,
        distance_needed: i16,
        yard_line: i16,
        minutes: i16,
        own_score: i16,
        opp_score: i16,
    ) -> Result<Self> {
        let down = Down::from_number(down)
            .ok_or_else(|| PlayTreeError::InvalidSituation(format!("down {down} out of range")))?;
        Ok(Self::new(
            down,
            DistanceNeeded::from_yards(distance_needed),
            FieldLocation::from_yard_line(yard_line),
            TimeRemaining::from_minutes(minutes),
            ScoreDifferential::from_scores(own_score, opp_score),
        ))
    }

    /// Value code of one characteristic.
    pub fn value(&self, characteristic: Characteristic) -> usize {
        match characteristic {
            Characteristic::Down => self.down.index(),
            Characteristic::DistanceNeeded => self.distance_needed.index(),
            Characteristic::FieldLocation => self.field_location.index(),
            Characteristic::TimeRemaining => self.time_remaining.index(),
            Characteristic::ScoreDifferential => self.score_differential.index(),
        }
    }
}

/// Handle of a play inside the store's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayId(u32);

impl PlayId {
    /// Handle for arena `position`. Fails once the arena outgrows `u32`.
    pub(crate) fn new(position: usize) -> Result<Self> {
        u32::try_from(position)
            .map(Self)
            .map_err(|_| PlayTreeError::StoreFull { position })
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single classified play. Created once by the store, never modified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Play {
    id: PlayId,
    play_type: PlayType,
    situation: Situation,
    distance_gained: i16,
    turned_over: bool,
}

impl Play {
    pub(crate) fn new(
        id: PlayId,
        play_type: PlayType,
        situation: Situation,
        distance_gained: i16,
        turned_over: bool,
    ) -> Self {
        Self {
            id,
            play_type,
            situation,
            distance_gained,
            turned_over,
        }
    }

    pub fn id(&self) -> PlayId {
        self.id
    }

    pub fn play_type(&self) -> PlayType {
        self.play_type
    }

    pub fn situation(&self) -> &Situation {
        &self.situation
    }

    pub fn distance_gained(&self) -> i16 {
        self.distance_gained
    }

    pub fn turned_over(&self) -> bool {
        self.turned_over
    }

    pub fn value(&self, characteristic: Characteristic) -> usize {
        self.situation.value(characteristic)
    }
}
