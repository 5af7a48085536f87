//! 时间解析与格式化
//!
//! 后端时间字段的形态并不统一，这里接受：
//! - RFC 3339 字符串
//! - 不带时区的 `YYYY-MM-DDTHH:MM:SS[.fff]`（按 UTC 处理）
//! - 只有日期的 `YYYY-MM-DD`（UTC 零点）
//! - 毫秒时间戳，小数部分截断

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use std::fmt::Display;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 界面显示格式，例如 `Jan 5, 2025, 03:04:05 PM`
pub const DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M:%S %p";

/// 把一个 JSON 值解析为时间点，无法解析时返回 `None`
pub fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => parse_text(raw.trim()),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_text(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// 按给定时区格式化
pub fn format_instant<Tz>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format(DISPLAY_FORMAT).to_string()
}
