//! The date-arithmetic capability that the picker core is written against.
//!
//! The core never touches a concrete date type.  Everything it needs to know
//! about dates (ordering, month arithmetic, formatting) goes through a
//! [`DateAdapter`], and [`TimeAdapter`] provides one for [`time::Date`].
use std::cmp::Ordering;
use std::fmt::Debug;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Month};

static KEYBOARD_DATE_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
static MONTH_AND_YEAR_FMT: &[BorrowedFormatItem<'_>] = format_description!("[month repr:long] [year]");
static MONTH_FMT: &[BorrowedFormatItem<'_>] = format_description!("[month repr:long]");
static MONTH_SHORT_FMT: &[BorrowedFormatItem<'_>] = format_description!("[month repr:short]");
static YEAR_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]");
static DAY_OF_MONTH_FMT: &[BorrowedFormatItem<'_>] = format_description!("[day padding:none]");

/// Text produced by [`DateAdapter::format`] when a date cannot be rendered
pub const INVALID_DATE_TEXT: &str = "Invalid Date";

/// Named output formats understood by [`DateAdapter::format`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DateFormat {
    /// `2024-03-10`
    KeyboardDate,
    /// `March 2024`
    MonthAndYear,
    /// `March`
    Month,
    /// `Mar`
    MonthShort,
    /// `2024`
    Year,
    /// `10`
    DayOfMonth,
}

/// Date arithmetic over an opaque date type.
///
/// Every method must be total: an invalid date is reported through
/// [`is_valid()`](DateAdapter::is_valid) and never causes a panic.
/// Comparisons are day-granular.
pub trait DateAdapter {
    type Date: Copy + Debug;

    fn is_valid(&self, date: &Self::Date) -> bool;

    fn compare(&self, a: &Self::Date, b: &Self::Date) -> Ordering;

    fn year(&self, date: &Self::Date) -> i32;

    /// Returns the month of `date` as a 0-based index (0 = January)
    fn month(&self, date: &Self::Date) -> u8;

    /// Moves `date` into the month with 0-based index `month` of the same
    /// year, clamping the day of the month to the length of the target month
    fn set_month(&self, date: &Self::Date, month: u8) -> Self::Date;

    /// Moves `date` into `year`, clamping the day of the month
    fn set_year(&self, date: &Self::Date, year: i32) -> Self::Date;

    /// Shifts `date` by `months` (which may be negative), clamping the day of
    /// the month
    fn add_months(&self, date: &Self::Date, months: i32) -> Self::Date;

    fn add_days(&self, date: &Self::Date, days: i32) -> Self::Date;

    fn start_of_month(&self, date: &Self::Date) -> Self::Date;

    fn today(&self) -> Self::Date;

    fn format(&self, date: &Self::Date, format: DateFormat) -> String;

    fn is_before(&self, a: &Self::Date, b: &Self::Date) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    fn is_after(&self, a: &Self::Date, b: &Self::Date) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    fn is_equal(&self, a: &Self::Date, b: &Self::Date) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    fn is_same_year(&self, a: &Self::Date, b: &Self::Date) -> bool {
        self.year(a) == self.year(b)
    }

    fn is_same_month(&self, a: &Self::Date, b: &Self::Date) -> bool {
        self.is_same_year(a, b) && self.month(a) == self.month(b)
    }

    fn is_before_year(&self, a: &Self::Date, b: &Self::Date) -> bool {
        self.year(a) < self.year(b)
    }

    fn is_after_year(&self, a: &Self::Date, b: &Self::Date) -> bool {
        self.year(a) > self.year(b)
    }

    /// Number of whole months from the month of `a` to the month of `b`
    fn months_between(&self, a: &Self::Date, b: &Self::Date) -> i32 {
        (self.year(b) - self.year(a)) * 12 + i32::from(self.month(b)) - i32::from(self.month(a))
    }
}

/// A [`DateAdapter`] for [`time::Date`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimeAdapter {
    today: Date,
}

impl TimeAdapter {
    /// `today` is the reference date used for "today" highlighting and for
    /// the past/future restrictions
    pub fn new(today: Date) -> TimeAdapter {
        TimeAdapter { today }
    }
}

impl DateAdapter for TimeAdapter {
    type Date = Date;

    // Every `time::Date` that can be constructed is a real calendar date.
    fn is_valid(&self, _date: &Date) -> bool {
        true
    }

    fn compare(&self, a: &Date, b: &Date) -> Ordering {
        a.cmp(b)
    }

    fn year(&self, date: &Date) -> i32 {
        date.year()
    }

    fn month(&self, date: &Date) -> u8 {
        u8::from(date.month()) - 1
    }

    fn set_month(&self, date: &Date, month: u8) -> Date {
        let Ok(month) = Month::try_from(month % 12 + 1) else {
            return *date;
        };
        clamped_date(date.year(), month, date.day()).unwrap_or(*date)
    }

    fn set_year(&self, date: &Date, year: i32) -> Date {
        clamped_date(year, date.month(), date.day()).unwrap_or(*date)
    }

    fn add_months(&self, date: &Date, months: i32) -> Date {
        let total = date.year() * 12 + i32::from(u8::from(date.month()) - 1) + months;
        let year = total.div_euclid(12);
        let Ok(index) = u8::try_from(total.rem_euclid(12)) else {
            return *date;
        };
        let Ok(month) = Month::try_from(index + 1) else {
            return *date;
        };
        clamped_date(year, month, date.day()).unwrap_or(*date)
    }

    fn add_days(&self, date: &Date, days: i32) -> Date {
        date.checked_add(time::Duration::days(days.into()))
            .unwrap_or(*date)
    }

    fn start_of_month(&self, date: &Date) -> Date {
        date.replace_day(1).unwrap_or(*date)
    }

    fn today(&self) -> Date {
        self.today
    }

    fn format(&self, date: &Date, format: DateFormat) -> String {
        let description = match format {
            DateFormat::KeyboardDate => KEYBOARD_DATE_FMT,
            DateFormat::MonthAndYear => MONTH_AND_YEAR_FMT,
            DateFormat::Month => MONTH_FMT,
            DateFormat::MonthShort => MONTH_SHORT_FMT,
            DateFormat::Year => YEAR_FMT,
            DateFormat::DayOfMonth => DAY_OF_MONTH_FMT,
        };
        date.format(description)
            .unwrap_or_else(|_| String::from(INVALID_DATE_TEXT))
    }
}

/// Returns the number of days in the given month, or `None` if the month
/// lies outside the range supported by `time`
pub fn days_in_month(year: i32, month: Month) -> Option<u8> {
    let (next_year, next_month) = match month {
        Month::December => (year.checked_add(1)?, Month::January),
        m => (year, m.next()),
    };
    match Date::from_calendar_date(next_year, next_month, 1) {
        Ok(first_of_next) => first_of_next.previous_day().map(|d| d.day()),
        // The month after December of the last supported year is out of
        // range, but December always has 31 days.
        Err(_) if month == Month::December => Some(31),
        Err(_) => None,
    }
}

fn clamped_date(year: i32, month: Month, day: u8) -> Option<Date> {
    let day = day.min(days_in_month(year, month)?);
    Date::from_calendar_date(year, month, day).ok()
}
