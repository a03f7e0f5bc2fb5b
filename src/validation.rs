//! Per-date and per-range validation
use crate::adapter::DateAdapter;
use crate::range::{is_range_valid, DateRange, RangeEnd};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Why a single date is not selectable
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
pub enum DateValidationError {
    #[error("invalid date")]
    InvalidDate,
    #[error("date is disabled")]
    ShouldDisableDate,
    #[error("date is in the past")]
    DisablePast,
    #[error("date is in the future")]
    DisableFuture,
    #[error("date is before the minimum date")]
    MinDate,
    #[error("date is after the maximum date")]
    MaxDate,
}

/// Why one endpoint of a range is not acceptable
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
pub enum RangeValidationError {
    #[error(transparent)]
    Date(#[from] DateValidationError),
    #[error("start date is after end date")]
    InvalidRange,
}

/// Validation results for the two ends of a range.  `None` in a slot means
/// "no error", which includes "not specified yet".
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct RangeValidation {
    pub start: Option<RangeValidationError>,
    pub end: Option<RangeValidationError>,
}

impl RangeValidation {
    pub fn new(
        start: Option<RangeValidationError>,
        end: Option<RangeValidationError>,
    ) -> RangeValidation {
        RangeValidation { start, end }
    }

    pub fn get(&self, end: RangeEnd) -> Option<RangeValidationError> {
        match end {
            RangeEnd::Start => self.start,
            RangeEnd::End => self.end,
        }
    }

    pub fn has_error(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

/// A host-supplied predicate for days that may not be picked.  It is told
/// which end of the range the day is being considered for.
pub type ShouldDisableDate<D> = Rc<dyn Fn(&D, RangeEnd) -> bool>;

/// Restrictions on which dates may be picked
#[derive(Clone)]
pub struct ValidationProps<D> {
    pub min_date: Option<D>,
    pub max_date: Option<D>,
    pub disable_past: bool,
    pub disable_future: bool,
    pub should_disable_date: Option<ShouldDisableDate<D>>,
}

impl<D> ValidationProps<D> {
    pub fn new() -> ValidationProps<D> {
        ValidationProps {
            min_date: None,
            max_date: None,
            disable_past: false,
            disable_future: false,
            should_disable_date: None,
        }
    }

    pub fn min_date(mut self, date: D) -> Self {
        self.min_date = Some(date);
        self
    }

    pub fn max_date(mut self, date: D) -> Self {
        self.max_date = Some(date);
        self
    }

    pub fn disable_past(mut self, flag: bool) -> Self {
        self.disable_past = flag;
        self
    }

    pub fn disable_future(mut self, flag: bool) -> Self {
        self.disable_future = flag;
        self
    }

    pub fn should_disable_date<F>(mut self, func: F) -> Self
    where
        F: Fn(&D, RangeEnd) -> bool + 'static,
    {
        self.should_disable_date = Some(Rc::new(func));
        self
    }
}

impl<D> Default for ValidationProps<D> {
    fn default() -> ValidationProps<D> {
        ValidationProps::new()
    }
}

impl<D: fmt::Debug> fmt::Debug for ValidationProps<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationProps")
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("disable_past", &self.disable_past)
            .field("disable_future", &self.disable_future)
            .field(
                "should_disable_date",
                &self.should_disable_date.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

/// Validates a single date that is being considered for the `end` end of a
/// range
pub fn validate_date<A: DateAdapter>(
    adapter: &A,
    date: &A::Date,
    props: &ValidationProps<A::Date>,
    end: RangeEnd,
) -> Option<DateValidationError> {
    let today = adapter.today();
    if !adapter.is_valid(date) {
        Some(DateValidationError::InvalidDate)
    } else if props
        .should_disable_date
        .as_ref()
        .is_some_and(|func| func(date, end))
    {
        Some(DateValidationError::ShouldDisableDate)
    } else if props.disable_future && adapter.is_after(date, &today) {
        Some(DateValidationError::DisableFuture)
    } else if props.disable_past && adapter.is_before(date, &today) {
        Some(DateValidationError::DisablePast)
    } else if props
        .min_date
        .as_ref()
        .is_some_and(|min| adapter.is_before(date, min))
    {
        Some(DateValidationError::MinDate)
    } else if props
        .max_date
        .as_ref()
        .is_some_and(|max| adapter.is_after(date, max))
    {
        Some(DateValidationError::MaxDate)
    } else {
        None
    }
}

/// Validates a whole range.
///
/// An incomplete range has no errors.  Errors in the individual endpoints
/// take precedence; only when both endpoints are acceptable on their own is
/// the ordering checked, and a reversed range is reported as
/// [`RangeValidationError::InvalidRange`] in both slots.
pub fn validate_range<A: DateAdapter>(
    adapter: &A,
    range: &DateRange<A::Date>,
    props: &ValidationProps<A::Date>,
) -> RangeValidation {
    let (Some(start), Some(end)) = (&range.start, &range.end) else {
        return RangeValidation::default();
    };
    let start_error = validate_date(adapter, start, props, RangeEnd::Start);
    let end_error = validate_date(adapter, end, props, RangeEnd::End);
    if start_error.is_some() || end_error.is_some() {
        return RangeValidation::new(start_error.map(Into::into), end_error.map(Into::into));
    }
    if !is_range_valid(adapter, range) {
        return RangeValidation::new(
            Some(RangeValidationError::InvalidRange),
            Some(RangeValidationError::InvalidRange),
        );
    }
    RangeValidation::default()
}

/// Returns `true` if `previous` is present and matches `current` slot for
/// slot.  An absent `previous` never matches, so that the first validation
/// is always reported.
pub fn is_same_range_error(current: &RangeValidation, previous: Option<&RangeValidation>) -> bool {
    previous.is_some_and(|prev| prev.start == current.start && prev.end == current.end)
}

/// Remembers the last reported validation result so that only changes are
/// passed on to the host
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ValidationTracker {
    previous: Option<RangeValidation>,
}

impl ValidationTracker {
    pub fn new() -> ValidationTracker {
        ValidationTracker::default()
    }

    /// Records `current` and returns it if it differs from the previously
    /// recorded result
    pub fn update(&mut self, current: RangeValidation) -> Option<RangeValidation> {
        if is_same_range_error(&current, self.previous.as_ref()) {
            None
        } else {
            self.previous = Some(current);
            Some(current)
        }
    }

    pub fn current(&self) -> RangeValidation {
        self.previous.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{DateFormat, TimeAdapter};
    use std::cmp::Ordering;
    use time::macros::date;
    use time::{Date, Weekday};

    fn adapter() -> TimeAdapter {
        TimeAdapter::new(date!(2024 - 03 - 15))
    }

    fn range(start: Date, end: Date) -> DateRange<Date> {
        DateRange::new(Some(start), Some(end))
    }

    /// Year, month, and day as typed into a field, which need not name a real
    /// date
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    struct Typed(i32, u8, u8);

    struct TypedAdapter(TimeAdapter);

    impl TypedAdapter {
        fn real(&self, d: &Typed) -> Option<Date> {
            let month = time::Month::try_from(d.1).ok()?;
            Date::from_calendar_date(d.0, month, d.2).ok()
        }

        fn typed(d: Date) -> Typed {
            Typed(d.year(), u8::from(d.month()), d.day())
        }

        fn map<F: FnOnce(&Date) -> Date>(&self, d: &Typed, f: F) -> Typed {
            self.real(d).map_or(*d, |r| Self::typed(f(&r)))
        }
    }

    impl DateAdapter for TypedAdapter {
        type Date = Typed;

        fn is_valid(&self, d: &Typed) -> bool {
            self.real(d).is_some()
        }

        fn compare(&self, a: &Typed, b: &Typed) -> Ordering {
            (a.0, a.1, a.2).cmp(&(b.0, b.1, b.2))
        }

        fn year(&self, d: &Typed) -> i32 {
            d.0
        }

        fn month(&self, d: &Typed) -> u8 {
            d.1.saturating_sub(1)
        }

        fn set_month(&self, d: &Typed, month: u8) -> Typed {
            self.map(d, |r| self.0.set_month(r, month))
        }

        fn set_year(&self, d: &Typed, year: i32) -> Typed {
            self.map(d, |r| self.0.set_year(r, year))
        }

        fn add_months(&self, d: &Typed, months: i32) -> Typed {
            self.map(d, |r| self.0.add_months(r, months))
        }

        fn add_days(&self, d: &Typed, days: i32) -> Typed {
            self.map(d, |r| self.0.add_days(r, days))
        }

        fn start_of_month(&self, d: &Typed) -> Typed {
            Typed(d.0, d.1, 1)
        }

        fn today(&self) -> Typed {
            Self::typed(self.0.today())
        }

        fn format(&self, d: &Typed, format: DateFormat) -> String {
            self.real(d).map_or_else(
                || String::from(crate::adapter::INVALID_DATE_TEXT),
                |r| self.0.format(&r, format),
            )
        }
    }

    #[test]
    fn test_validate_date_ok() {
        let props = ValidationProps::new();
        assert_eq!(
            validate_date(&adapter(), &date!(2024 - 03 - 10), &props, RangeEnd::Start),
            None
        );
    }

    #[test]
    fn test_validate_date_invalid() {
        let a = TypedAdapter(adapter());
        let props = ValidationProps::new();
        assert_eq!(
            validate_date(&a, &Typed(2023, 2, 30), &props, RangeEnd::Start),
            Some(DateValidationError::InvalidDate)
        );
    }

    #[test]
    fn test_validate_date_past_and_future() {
        let a = adapter();
        let props = ValidationProps::new().disable_past(true).disable_future(true);
        assert_eq!(
            validate_date(&a, &date!(2024 - 03 - 14), &props, RangeEnd::Start),
            Some(DateValidationError::DisablePast)
        );
        assert_eq!(
            validate_date(&a, &date!(2024 - 03 - 16), &props, RangeEnd::Start),
            Some(DateValidationError::DisableFuture)
        );
        assert_eq!(
            validate_date(&a, &date!(2024 - 03 - 15), &props, RangeEnd::Start),
            None
        );
    }

    #[test]
    fn test_validate_date_bounds() {
        let a = adapter();
        let props = ValidationProps::new()
            .min_date(date!(2024 - 01 - 01))
            .max_date(date!(2024 - 12 - 31));
        assert_eq!(
            validate_date(&a, &date!(2023 - 12 - 31), &props, RangeEnd::Start),
            Some(DateValidationError::MinDate)
        );
        assert_eq!(
            validate_date(&a, &date!(2025 - 01 - 01), &props, RangeEnd::End),
            Some(DateValidationError::MaxDate)
        );
        assert_eq!(
            validate_date(&a, &date!(2024 - 01 - 01), &props, RangeEnd::End),
            None
        );
    }

    #[test]
    fn test_should_disable_date_sees_range_end() {
        let a = adapter();
        // Ranges may only start on a Monday
        let props = ValidationProps::new().should_disable_date(|d: &Date, end| {
            end == RangeEnd::Start && d.weekday() != Weekday::Monday
        });
        assert_eq!(
            validate_date(&a, &date!(2024 - 03 - 12), &props, RangeEnd::Start),
            Some(DateValidationError::ShouldDisableDate)
        );
        assert_eq!(
            validate_date(&a, &date!(2024 - 03 - 12), &props, RangeEnd::End),
            None
        );
        assert_eq!(
            validate_date(&a, &date!(2024 - 03 - 11), &props, RangeEnd::Start),
            None
        );
    }

    #[test]
    fn test_incomplete_range_has_no_errors() {
        let a = adapter();
        let props = ValidationProps::new().disable_past(true);
        let partial = DateRange::new(Some(date!(2020 - 01 - 01)), None);
        assert_eq!(validate_range(&a, &partial, &props), RangeValidation::default());
    }

    #[test]
    fn test_reversed_range_errors_both_ends() {
        let a = adapter();
        let props = ValidationProps::new();
        let v = validate_range(&a, &range(date!(2024 - 03 - 10), date!(2024 - 03 - 05)), &props);
        assert_eq!(
            v,
            RangeValidation::new(
                Some(RangeValidationError::InvalidRange),
                Some(RangeValidationError::InvalidRange)
            )
        );
    }

    #[test]
    fn test_endpoint_error_beats_range_error() {
        let a = adapter();
        let props = ValidationProps::new().max_date(date!(2024 - 03 - 31));
        let v = validate_range(&a, &range(date!(2024 - 04 - 10), date!(2024 - 03 - 05)), &props);
        assert_eq!(
            v,
            RangeValidation::new(Some(DateValidationError::MaxDate.into()), None)
        );
    }

    #[test]
    fn test_valid_range() {
        let a = adapter();
        let props = ValidationProps::new();
        let v = validate_range(&a, &range(date!(2024 - 03 - 10), date!(2024 - 03 - 20)), &props);
        assert!(!v.has_error());
    }

    #[test]
    fn test_invalid_typed_endpoint() {
        let a = TypedAdapter(adapter());
        let props = ValidationProps::new();
        let r = DateRange::new(Some(Typed(2024, 3, 10)), Some(Typed(2024, 13, 1)));
        assert_eq!(
            validate_range(&a, &r, &props),
            RangeValidation::new(None, Some(DateValidationError::InvalidDate.into()))
        );
    }

    #[test]
    fn test_same_range_error() {
        let a = RangeValidation::new(Some(RangeValidationError::InvalidRange), None);
        let b = RangeValidation::new(Some(RangeValidationError::InvalidRange), None);
        let c = RangeValidation::default();
        assert!(is_same_range_error(&a, Some(&b)));
        assert!(!is_same_range_error(&a, Some(&c)));
        assert!(!is_same_range_error(&c, None));
    }

    #[test]
    fn test_tracker_reports_first_and_changes_only() {
        let a = adapter();
        let props = ValidationProps::new();
        let r = range(date!(2024 - 03 - 10), date!(2024 - 03 - 20));
        let mut tracker = ValidationTracker::new();
        let first = validate_range(&a, &r, &props);
        assert_eq!(tracker.update(first), Some(RangeValidation::default()));
        let second = validate_range(&a, &r, &props);
        assert_eq!(tracker.update(second), None);
        let reversed = range(date!(2024 - 03 - 20), date!(2024 - 03 - 10));
        let third = validate_range(&a, &reversed, &props);
        assert_eq!(tracker.update(third), Some(third));
        assert!(tracker.current().has_error());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RangeValidationError::from(DateValidationError::DisablePast).to_string(),
            "date is in the past"
        );
        assert_eq!(
            RangeValidationError::InvalidRange.to_string(),
            "start date is after end date"
        );
    }
}
