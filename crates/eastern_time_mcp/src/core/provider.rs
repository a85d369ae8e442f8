use std::fmt::Write;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::core::{
    error::{TimeServerError, TimeServerResult},
    utils::{self, LOCAL_DATETIME_FORMAT},
};

/// Renders instants as America/New_York civil time with a UTC offset
#[derive(Debug, Clone)]
pub struct EasternClock {
    pub(crate) timezone: Tz,
}

impl EasternClock {
    pub fn new() -> Self {
        Self {
            timezone: chrono_tz::America::New_York,
        }
    }

    /// Current Eastern time as `YYYY-MM-DDTHH:MM:SS±HH:MM`
    pub fn now(&self) -> TimeServerResult<String> {
        self.format_instant(&Utc::now())
    }

    pub fn format_instant(&self, instant: &DateTime<Utc>) -> TimeServerResult<String> {
        let local_time = instant.with_timezone(&self.timezone);
        let offset = utils::format_utc_offset(utils::utc_offset_minutes(&local_time));

        let mut timestamp = String::with_capacity(25);
        write!(timestamp, "{}{}", local_time.format(LOCAL_DATETIME_FORMAT), offset).map_err(
            |e| TimeServerError::Formatting {
                message: e.to_string(),
            },
        )?;

        tracing::trace!(
            timestamp = %timestamp,
            is_dst = utils::is_dst(&local_time),
            "Formatted Eastern time"
        );

        Ok(timestamp)
    }
}

impl Default for EasternClock {
    fn default() -> Self {
        Self::new()
    }
}
