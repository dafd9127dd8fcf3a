//! Exam countdown kept in local storage only.

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::error::{Result, ValidationError};
use crate::storage::LocalStorage;

pub const EXAM_DATE_KEY: &str = "examDate";
pub const DEFAULT_LEAD_DAYS: u64 = 90;

/// Whole days, hours (mod 24) and minutes (mod 60) left. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl Remaining {
    pub const fn message(self) -> &'static str {
        if self.days > 30 {
            "You've got time! Stay consistent."
        } else if self.days > 7 {
            "Focus mode activated!"
        } else if self.days > 0 {
            "Final stretch! You can do this!"
        } else {
            "Good luck on your exam!"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    target: NaiveDate,
}

impl Countdown {
    pub const fn new(target: NaiveDate) -> Self {
        Self { target }
    }

    /// Read the saved target, or save and return `today + 90 days`.
    pub fn load(storage: &mut LocalStorage, today: NaiveDate) -> Result<Self> {
        if let Some(saved) = storage.get(EXAM_DATE_KEY) {
            match saved.parse::<NaiveDate>() {
                Ok(target) => return Ok(Self::new(target)),
                Err(error) => {
                    tracing::warn!("Ignoring unreadable {} {:?}: {}", EXAM_DATE_KEY, saved, error);
                }
            }
        }

        let target = today
            .checked_add_days(Days::new(DEFAULT_LEAD_DAYS))
            .unwrap_or(NaiveDate::MAX);
        storage.set(EXAM_DATE_KEY, target.to_string())?;
        Ok(Self::new(target))
    }

    pub const fn target(&self) -> NaiveDate {
        self.target
    }

    /// Move the target. Dates before `today` are rejected.
    pub fn set_target(
        &mut self,
        storage: &mut LocalStorage,
        target: NaiveDate,
        today: NaiveDate,
    ) -> Result<()> {
        if target < today {
            return Err(ValidationError::DateInPast.into());
        }
        storage.set(EXAM_DATE_KEY, target.to_string())?;
        self.target = target;
        tracing::info!(%target, "Exam date updated");
        Ok(())
    }

    /// Time left until midnight UTC at the start of the target date.
    pub fn remaining(&self, now: DateTime<Utc>) -> Remaining {
        let target = self.target.and_time(chrono::NaiveTime::MIN).and_utc();
        if target <= now {
            return Remaining::default();
        }

        let left = target - now;
        Remaining {
            days: left.num_days(),
            hours: left.num_hours() % 24,
            minutes: left.num_minutes() % 60,
        }
    }
}
