//! Play ingestion from typed polars frames.
//!
//! The frame carries one play per row with raw game numbers; rows are
//! normalized into situations the same way [`Situation::from_raw`] does.
//! Integer columns may use any integer width.

use crate::conf::*;
use crate::error::{PlayTreeError, Result};
use crate::play::{PlayId, PlayType, Situation};
use crate::store::PlayStoreBuilder;
use itertools::izip;
use polars::error::ErrString;
use polars::prelude::*;

pub trait PlayFrameExt {
    /// A builder holding every row of the frame.
    fn to_play_builder(&self) -> Result<PlayStoreBuilder>;
}

impl PlayFrameExt for DataFrame {
    fn to_play_builder(&self) -> Result<PlayStoreBuilder> {
        let mut builder = PlayStoreBuilder::with_capacity(self.height());
        builder.extend_from_dataframe(self)?;
        Ok(builder)
    }
}

fn int_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let series = df.column(name)?.as_materialized_series();
    if !series.dtype().is_integer() {
        return Err(PolarsError::SchemaMismatch(ErrString::from(format!(
            "column '{name}' must hold integers, found {}",
            series.dtype()
        )))
        .into());
    }
    let series = series.cast(&DataType::Int64)?;
    Ok(series.i64()?.into_iter().collect())
}

fn required<T>(value: Option<T>, row: usize, name: &str) -> Result<T> {
    value.ok_or_else(|| PlayTreeError::InvalidRecord {
        row,
        reason: format!("{name} is null"),
    })
}

fn narrow(value: Option<i64>, row: usize, name: &str) -> Result<i16> {
    let value = required(value, row, name)?;
    i16::try_from(value).map_err(|_| PlayTreeError::InvalidRecord {
        row,
        reason: format!("{name} {value} out of range"),
    })
}

impl PlayStoreBuilder {
    /// Append every row of `df`. Either all rows are added or none are.
    /// Returns the number of plays added.
    pub fn extend_from_dataframe(&mut self, df: &DataFrame) -> Result<usize> {
        let play_types = df.column(COL_PLAY_TYPE)?.as_materialized_series().str()?;
        let turned_over = df.column(COL_TURNED_OVER)?.as_materialized_series().bool()?;
        let downs = int_column(df, COL_DOWN)?;
        let distances_needed = int_column(df, COL_DISTANCE_NEEDED)?;
        let yard_lines = int_column(df, COL_YARD_LINE)?;
        let minutes = int_column(df, COL_MINUTES)?;
        let own_scores = int_column(df, COL_OWN_SCORE)?;
        let opp_scores = int_column(df, COL_OPP_SCORE)?;
        let distances_gained = int_column(df, COL_DISTANCE_GAINED)?;

        let mut rows = Vec::with_capacity(df.height());
        for (row, (play_type, down, needed, yard_line, minute, own, opp, gained, turnover)) in izip!(
            play_types.into_iter(),
            downs,
            distances_needed,
            yard_lines,
            minutes,
            own_scores,
            opp_scores,
            distances_gained,
            turned_over.into_iter(),
        )
        .enumerate()
        {
            let play_type = required(play_type, row, COL_PLAY_TYPE)?
                .parse::<PlayType>()
                .map_err(|reason| PlayTreeError::InvalidRecord { row, reason })?;
            let situation = Situation::from_raw(
                narrow(down, row, COL_DOWN)?,
                narrow(needed, row, COL_DISTANCE_NEEDED)?,
                narrow(yard_line, row, COL_YARD_LINE)?,
                narrow(minute, row, COL_MINUTES)?,
                narrow(own, row, COL_OWN_SCORE)?,
                narrow(opp, row, COL_OPP_SCORE)?,
            )
            .map_err(|err| PlayTreeError::InvalidRecord {
                row,
                reason: err.to_string(),
            })?;
            let gained = narrow(gained, row, COL_DISTANCE_GAINED)?;
            let turnover = required(turnover, row, COL_TURNED_OVER)?;
            rows.push((play_type, situation, gained, turnover));
        }

        let added = rows.len();
        if let Some(last) = (self.len() + added).checked_sub(1) {
            PlayId::new(last)?;
        }
        for (play_type, situation, gained, turnover) in rows {
            self.insert(play_type, situation, gained, turnover)?;
        }
        Ok(added)
    }
}
