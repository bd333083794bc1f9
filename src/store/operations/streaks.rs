use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// Daily activity chain for one owner. `current` counts consecutive calendar
/// days with at least one committed session; `best` is the all-time maximum.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    pub current: u32,
    pub best: u32,
    pub last_activity_date: Option<DateTime<Utc>>,
}

/// Read view: whether the chain is broken and by how many idle days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakInfo {
    pub current: u32,
    pub best: u32,
    pub is_broken: bool,
    pub days_missed: u32,
}

impl Store {
    pub fn get_streak(&self, owner_id: &str) -> Result<StreakData, StoreError> {
        let key = keys::streak_key(owner_id);
        match self.streaks.get(key.as_bytes())? {
            Some(raw) => Ok(Self::deserialize(&raw)?),
            None => Ok(StreakData::default()),
        }
    }

    fn put_streak(&self, owner_id: &str, streak: &StreakData) -> Result<(), StoreError> {
        let key = keys::streak_key(owner_id);
        self.streaks
            .insert(key.as_bytes(), Self::serialize(streak)?)?;
        Ok(())
    }

    pub fn streak_info(&self, owner_id: &str) -> Result<StreakInfo, StoreError> {
        self.streak_info_at(owner_id, Utc::now())
    }

    pub fn streak_info_at(
        &self,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<StreakInfo, StoreError> {
        let streak = self.get_streak(owner_id)?;
        let Some(last) = streak.last_activity_date else {
            return Ok(StreakInfo {
                current: 0,
                best: 0,
                is_broken: false,
                days_missed: 0,
            });
        };
        let gap = day_gap(last, now);
        Ok(StreakInfo {
            current: streak.current,
            best: streak.best,
            is_broken: gap > 1,
            days_missed: gap.saturating_sub(1),
        })
    }

    /// Bumps the streak for a committed session. Same day: unchanged; the
    /// day after: extended; a longer gap or no history: restarted at 1.
    pub fn record_activity(&self, owner_id: &str) -> Result<StreakData, StoreError> {
        self.record_activity_at(owner_id, Utc::now())
    }

    pub fn record_activity_at(
        &self,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<StreakData, StoreError> {
        let mut streak = self.get_streak(owner_id)?;
        match streak.last_activity_date {
            None => streak.current = 1,
            Some(last) => match day_gap(last, now) {
                0 => {}
                1 => streak.current += 1,
                _ => streak.current = 1,
            },
        }
        if streak.current > streak.best {
            streak.best = streak.current;
        }
        streak.last_activity_date = Some(now);
        self.put_streak(owner_id, &streak)?;
        Ok(streak)
    }
}

/// Whole calendar days between two instants, clamped at zero.
fn day_gap(last: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let days = (now.date_naive() - last.date_naive()).num_days();
    days.max(0) as u32
}
