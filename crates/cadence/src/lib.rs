//! # Contribution Cadence
//!
//! Turns a date range and a [`Frequency`] into the trading-day-adjusted
//! candidate dates on which a regular contribution is made.
//!
//! - The first candidate is `start`, rolled forward to Monday if it is a weekend.
//! - Daily cadence steps one day at a time and skips weekend dates.
//! - Weekly and monthly cadences step from the current candidate and roll a
//!   weekend landing forward to Monday before the next comparison.
//!
//! The generator is a pure function of its inputs: [`CadenceDates`] can be
//! recreated from the same arguments at any time and always yields the same
//! finite sequence.

pub mod calendar;

use chrono::NaiveDate;
use core_types::Frequency;

/// Iterator over the candidate investment dates in `[start, end]`.
#[derive(Debug, Clone)]
pub struct CadenceDates {
    current: Option<NaiveDate>,
    end: NaiveDate,
    frequency: Frequency,
}

impl CadenceDates {
    pub fn new(start: NaiveDate, end: NaiveDate, frequency: Frequency) -> Self {
        Self {
            current: calendar::roll_to_weekday(start),
            end,
            frequency,
        }
    }

    fn step(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self.frequency {
            Frequency::Daily => calendar::add_days(date, 1),
            Frequency::Weekly => calendar::add_days(date, 7).and_then(calendar::roll_to_weekday),
            Frequency::Monthly => calendar::add_months(date, 1).and_then(calendar::roll_to_weekday),
        }
    }
}

impl Iterator for CadenceDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        loop {
            let date = self.current.filter(|d| *d <= self.end)?;
            self.current = self.step(date);
            // Only the daily cadence can land on a weekend here.
            if !calendar::is_weekend(date) {
                return Some(date);
            }
        }
    }
}

/// Collects every candidate investment date between `start` and `end` inclusive.
pub fn generate_dates(start: NaiveDate, end: NaiveDate, frequency: Frequency) -> Vec<NaiveDate> {
    let dates: Vec<NaiveDate> = CadenceDates::new(start, end, frequency).collect();
    tracing::debug!(
        %start,
        %end,
        %frequency,
        count = dates.len(),
        "Generated cadence dates"
    );
    dates
}
