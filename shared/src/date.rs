//! 上映日期类型模块
//!
//! 表单里的日期是 `YYYY-MM-DD`，后端 (Go `time.Time`) 收发的是 RFC 3339。
//! `ReleaseDate` 只保存日期部分：
//! - 序列化为当天零点 UTC 的 RFC 3339 字符串
//! - 反序列化时接受纯日期或任意 RFC 3339 时间戳（取日期部分）

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const INPUT_FORMAT: &str = "%Y-%m-%d";
const WIRE_FORMAT: &str = "%Y-%m-%dT00:00:00Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseDate(NaiveDate);

impl ReleaseDate {
    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    #[inline]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// 解析 `<input type="date">` 的值，只接受严格的 `YYYY-MM-DD`
    pub fn parse_input(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() != 10 {
            return None;
        }
        NaiveDate::parse_from_str(s, INPUT_FORMAT).ok().map(Self)
    }

    /// 解析纯日期或 RFC 3339 时间戳
    ///
    /// 返回 None 如果解析失败
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.len() {
            10 => Self::parse_input(s),
            n if n > 10 => {
                // 日期后必须紧跟时间分隔符；第 10 字节可能落在多字节字符内部
                let (head, tail) = s.split_at_checked(10)?;
                if tail.starts_with('T') || tail.starts_with(' ') {
                    Self::parse_input(head)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// 表单回填用的 `YYYY-MM-DD`
    pub fn to_input_value(&self) -> String {
        self.0.format(INPUT_FORMAT).to_string()
    }

    /// 发送给后端的 RFC 3339 字符串
    pub fn to_rfc3339(&self) -> String {
        self.0.format(WIRE_FORMAT).to_string()
    }

    /// 列表页展示用，如 `June 12, 1981`
    pub fn to_display(&self) -> String {
        self.0.format("%B %-d, %Y").to_string()
    }
}

impl From<NaiveDate> for ReleaseDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_input_value())
    }
}

impl Serialize for ReleaseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for ReleaseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid release date: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_dates_and_timestamps() {
        let plain = ReleaseDate::parse("1981-06-12").unwrap();
        let stamped = ReleaseDate::parse("1981-06-12T00:00:00Z").unwrap();
        let offset = ReleaseDate::parse("1981-06-12T04:00:00-04:00").unwrap();
        assert_eq!(plain, stamped);
        assert_eq!(plain, offset);
        assert_eq!(plain.to_rfc3339(), "1981-06-12T00:00:00Z");
        assert_eq!(plain.to_display(), "June 12, 1981");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(ReleaseDate::parse_input("").is_none());
        assert!(ReleaseDate::parse_input("1981-6-12").is_none());
        assert!(ReleaseDate::parse_input("1981-06-31").is_none());
        assert!(ReleaseDate::parse_input("1981-06-12T00:00:00Z").is_none());
        assert!(ReleaseDate::parse("1981-06-12x").is_none());
    }

    #[test]
    fn rejects_multibyte_char_across_date_boundary() {
        assert!(ReleaseDate::parse("1981-06-1é-extra").is_none());
        assert!(ReleaseDate::parse_input("1981-06-é").is_none());
    }
}
