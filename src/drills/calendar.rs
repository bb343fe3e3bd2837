use crate::utils::error::{DrillError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

pub const BIRTHDATE_FORMAT: &str = "%d/%m/%Y";

/// 距離下一個一月一日 00:00 的時間
pub fn time_until_new_year(now: NaiveDateTime) -> Result<TimeDelta> {
    let new_year = NaiveDate::from_ymd_opt(now.year() + 1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DrillError::ProcessingError {
            message: format!("No new year after {}", now),
        })?;
    Ok(new_year - now)
}

/// "12 days, 3:04:05"
pub fn format_duration(delta: TimeDelta) -> String {
    let days = delta.num_days();
    let rest = delta.num_seconds() - days * 86_400;
    format!(
        "{} days, {}:{:02}:{:02}",
        days,
        rest / 3600,
        (rest % 3600) / 60,
        rest % 60
    )
}

pub fn minutes_lived(birthdate: &str, now: NaiveDateTime) -> Result<i64> {
    let born = NaiveDate::parse_from_str(birthdate.trim(), BIRTHDATE_FORMAT)
        .map_err(|e| DrillError::InvalidInput {
            field: "birthdate".to_string(),
            value: birthdate.to_string(),
            reason: format!("expected DD/MM/YYYY: {}", e),
        })?
        .and_time(chrono::NaiveTime::MIN);

    if born > now {
        return Err(DrillError::InvalidInput {
            field: "birthdate".to_string(),
            value: birthdate.to_string(),
            reason: "birthdate is in the future".to_string(),
        });
    }
    Ok((now - born).num_minutes())
}

/// 千分位逗號：1234567 → "1,234,567"
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_time_until_new_year() {
        let left = time_until_new_year(at(2025, 12, 30, 22, 0, 0)).unwrap();
        assert_eq!(left.num_hours(), 26);
        assert_eq!(format_duration(left), "1 days, 2:00:00");

        let left = time_until_new_year(at(2025, 1, 1, 0, 0, 0)).unwrap();
        assert_eq!(left.num_days(), 365);
    }

    #[test]
    fn test_minutes_lived() {
        assert_eq!(minutes_lived("31/12/1991", at(1992, 1, 1, 0, 0, 0)).unwrap(), 1440);
        assert_eq!(minutes_lived("31/12/1991", at(1991, 12, 31, 0, 30, 0)).unwrap(), 30);
        assert!(minutes_lived("1991-12-31", at(2025, 1, 1, 0, 0, 0)).is_err());
        assert!(minutes_lived("01/01/2030", at(2025, 1, 1, 0, 0, 0)).is_err());
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(17_532_480), "17,532,480");
        assert_eq!(format_thousands(-1234), "-1,234");
    }
}
