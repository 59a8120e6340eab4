//! Display Locale
//!
//! The two supported UI languages plus the locale-sensitive bits of the
//! timeline (month names and date display).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_ZH: [&str; 12] = [
    "一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月", "十二月",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Zh];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// Accepts region-qualified codes such as `zh-CN`
    pub fn from_code(code: &str) -> Option<Self> {
        let lang = code.split(['-', '_']).next().unwrap_or("").to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Locale::En),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }

    /// Short month name for a 1-based month
    pub fn month_name(&self, month: u32) -> &'static str {
        let table = match self {
            Locale::En => &MONTHS_EN,
            Locale::Zh => &MONTHS_ZH,
        };
        table[(month.clamp(1, 12) - 1) as usize]
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        match self {
            Locale::En => format!("{}/{}/{}", date.month(), date.day(), date.year()),
            Locale::Zh => format!("{}/{}/{}", date.year(), date.month(), date.day()),
        }
    }

    pub fn format_range(&self, start: NaiveDate, end: NaiveDate) -> String {
        format!("{} - {}", self.format_date(start), self.format_date(end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(Locale::En.month_name(1), "Jan");
        assert_eq!(Locale::Zh.month_name(12), "十二月");
        assert_eq!(Locale::En.month_name(0), "Jan");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Locale::from_code("zh-CN"), Some(Locale::Zh));
        assert_eq!(Locale::from_code("EN"), Some(Locale::En));
        assert_eq!(Locale::from_code("fr"), None);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(Locale::En.format_date(date), "3/9/2024");
        assert_eq!(Locale::Zh.format_date(date), "2024/3/9");
    }
}
