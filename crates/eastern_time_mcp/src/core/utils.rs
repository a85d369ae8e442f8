use chrono::DateTime;
use chrono_tz::{OffsetComponents, Tz};

// Constants for format strings and protocol literals
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const JSONRPC_VERSION: &str = "2.0";

/// Request id used when the caller did not send one
pub const DEFAULT_REQUEST_ID: &str = "mcp-id";

pub const SERVER_NAME: &str = "eastern-time-server";
pub const SERVER_DESCRIPTION: &str = "Provides Eastern Time ISO timestamps";

pub const TOOL_NAME: &str = "get_eastern_time";

/// Plain-text body for verbs other than GET and POST
pub const METHOD_NOT_ALLOWED_TEXT: &str = "Only GET (with ?method=...), or POST supported";

/// Format a UTC offset given in minutes as `±HH:MM`
///
/// Zero and positive offsets carry a `+`, negative offsets a `-`.
pub fn format_utc_offset(offset_minutes: i32) -> String {
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let abs_minutes = offset_minutes.unsigned_abs();

    format!("{}{:02}:{:02}", sign, abs_minutes / 60, abs_minutes % 60)
}

/// Total offset from UTC in minutes, DST included
pub fn utc_offset_minutes(local_time: &DateTime<Tz>) -> i32 {
    let offset = local_time.offset().base_utc_offset() + local_time.offset().dst_offset();
    (offset.num_seconds() / 60) as i32
}

/// Whether daylight saving time is in effect for the given local time
pub fn is_dst(local_time: &DateTime<Tz>) -> bool {
    local_time.offset().dst_offset().num_seconds() != 0
}
