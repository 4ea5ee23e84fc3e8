use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The voting window. Times are UTC, sent without an offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSettings {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_active: bool,
}

impl ElectionSettings {
    /// Is voting open at the given UTC time?
    pub fn is_open_at(&self, now: NaiveDateTime) -> bool {
        self.is_active && self.start_time <= now && now < self.end_time
    }
}
