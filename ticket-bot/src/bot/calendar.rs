//! Month-grid date picker.
//!
//! The grid and callback payloads are plain data; `keyboards` turns them
//! into Telegram buttons.

use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Column headers, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    /// `None` unless `month` is 1-12 and the year is representable.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn previous(self) -> Self {
        match self.month {
            1 => Self {
                year: self.year - 1,
                month: 12,
            },
            m => Self {
                year: self.year,
                month: m - 1,
            },
        }
    }

    pub fn next(self) -> Self {
        match self.month {
            12 => Self {
                year: self.year + 1,
                month: 1,
            },
            m => Self {
                year: self.year,
                month: m + 1,
            },
        }
    }

    /// "September 2025"
    pub fn title(self) -> String {
        let name = MONTH_NAMES
            .get(self.month as usize - 1)
            .copied()
            .unwrap_or_default();
        format!("{name} {}", self.year)
    }

    /// Day of the month for `day`, if it exists.
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    fn days(self) -> u32 {
        let first_of_next = self.next().date(1);
        first_of_next
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(28)
    }

    /// Weeks of the month, Monday first; `None` pads before day 1 and after
    /// the last day.
    pub fn weeks(self) -> Vec<[Option<u32>; 7]> {
        let offset = self
            .date(1)
            .map(|d| d.weekday().num_days_from_monday())
            .unwrap_or(0);
        let days = self.days();
        let cells = offset + days;

        (0..cells.div_ceil(7))
            .map(|week| {
                std::array::from_fn(|col| {
                    let cell = week * 7 + col as u32;
                    (cell >= offset && cell < offset + days).then(|| cell - offset + 1)
                })
            })
            .collect()
    }
}

/// Heading shown above the picker.
pub fn calendar_text(month: CalendarMonth) -> String {
    format!("📅 Select Travel Date\n\n{}\n\n", month.title())
}

/// What an inline button press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Show another month in the same message.
    Month(CalendarMonth),
    /// A day was picked.
    Date(NaiveDate),
    /// Back to the main menu.
    MainMenu,
    /// Weekday headers and padding cells.
    Ignore,
}

impl CallbackAction {
    /// Parse callback data; `None` for anything we never issue.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "main_menu" => return Some(Self::MainMenu),
            "header" | "empty" => return Some(Self::Ignore),
            _ => {}
        }

        let mut parts = data.split('_');
        let kind = parts.next()?;
        let numbers: Vec<&str> = parts.collect();
        match (kind, numbers.as_slice()) {
            ("month", [year, month]) => {
                CalendarMonth::new(year.parse().ok()?, month.parse().ok()?).map(Self::Month)
            }
            ("date", [year, month, day]) => {
                NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
                    .map(Self::Date)
            }
            _ => None,
        }
    }

    /// Callback data for this action.
    pub fn encode(self) -> String {
        match self {
            Self::Month(m) => format!("month_{}_{}", m.year, m.month),
            Self::Date(d) => format!("date_{}_{}_{}", d.year(), d.month(), d.day()),
            Self::MainMenu => "main_menu".to_string(),
            Self::Ignore => "empty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> CalendarMonth {
        CalendarMonth::new(year, month).unwrap()
    }

    #[test]
    fn september_2025_starts_on_monday() {
        let weeks = month(2025, 9).weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0], Some(1));
        assert_eq!(weeks[4][1], Some(30));
        assert_eq!(weeks[4][2], None);
    }

    #[test]
    fn padding_before_first_day() {
        // 1 March 2026 is a Sunday.
        let weeks = month(2026, 3).weeks();
        assert_eq!(weeks[0], [None, None, None, None, None, None, Some(1)]);
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[5][1], Some(31));
    }

    #[test]
    fn leap_february() {
        let days: Vec<u32> = month(2024, 2).weeks().into_iter().flatten().flatten().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first(), Some(&1));
        assert_eq!(days.last(), Some(&29));
    }

    #[test]
    fn navigation_wraps_years() {
        assert_eq!(month(2025, 1).previous(), month(2024, 12));
        assert_eq!(month(2025, 12).next(), month(2026, 1));
        assert_eq!(month(2025, 9).title(), "September 2025");
    }

    #[test]
    fn parses_callbacks() {
        assert_eq!(
            CallbackAction::parse("month_2025_10"),
            Some(CallbackAction::Month(month(2025, 10)))
        );
        assert_eq!(
            CallbackAction::parse("date_2025_9_2"),
            NaiveDate::from_ymd_opt(2025, 9, 2).map(CallbackAction::Date)
        );
        assert_eq!(CallbackAction::parse("main_menu"), Some(CallbackAction::MainMenu));
        assert_eq!(CallbackAction::parse("header"), Some(CallbackAction::Ignore));
        assert_eq!(CallbackAction::parse("empty"), Some(CallbackAction::Ignore));

        assert_eq!(CallbackAction::parse("month_2025_13"), None);
        assert_eq!(CallbackAction::parse("date_2025_2_30"), None);
        assert_eq!(CallbackAction::parse("date_x_1_1"), None);
        assert_eq!(CallbackAction::parse("connect:abc"), None);
    }

    #[test]
    fn encodes_what_it_parses() {
        let action = CallbackAction::Date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(action.encode(), "date_2025_12_31");
        assert_eq!(CallbackAction::parse(&action.encode()), Some(action));
    }
}
