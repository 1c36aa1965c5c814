//! Wall-clock time for report timestamps.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};
use stockbox_traits::{UNSYNCED_TIMESTAMP, WallClock};

use crate::error::{HwError, Result};

/// Before this year the clock is assumed never to have been synchronized.
const MIN_SYNCED_YEAR: i32 = 2016;

pub fn format_timestamp<Tz: TimeZone>(t: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if t.year() < MIN_SYNCED_YEAR {
        return UNSYNCED_TIMESTAMP.to_string();
    }
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// System time shifted by a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemWallClock {
    offset: FixedOffset,
}

impl SystemWallClock {
    pub fn new(utc_offset_secs: i32) -> Result<Self> {
        let offset =
            FixedOffset::east_opt(utc_offset_secs).ok_or(HwError::InvalidOffset(utc_offset_secs))?;
        Ok(Self { offset })
    }
}

impl WallClock for SystemWallClock {
    fn timestamp(&self) -> String {
        format_timestamp(&Utc::now().with_timezone(&self.offset))
    }
}
