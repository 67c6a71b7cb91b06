use chrono::{NaiveDateTime, Utc};

/// Current UTC time as stored in timestamp columns
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
