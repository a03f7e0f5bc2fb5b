use crate::adapter::DateAdapter;
use std::fmt;

/// An ordered pair of optional dates.
///
/// Nothing in this type enforces `start <= end`; use [`is_range_valid()`]
/// to check whether a range is complete and correctly ordered.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateRange<D> {
    pub start: Option<D>,
    pub end: Option<D>,
}

impl<D> DateRange<D> {
    pub fn new(start: Option<D>, end: Option<D>) -> DateRange<D> {
        DateRange { start, end }
    }

    pub fn empty() -> DateRange<D> {
        DateRange {
            start: None,
            end: None,
        }
    }

    pub fn get(&self, end: RangeEnd) -> Option<&D> {
        match end {
            RangeEnd::Start => self.start.as_ref(),
            RangeEnd::End => self.end.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

impl<D> Default for DateRange<D> {
    fn default() -> DateRange<D> {
        DateRange::empty()
    }
}

/// Which endpoint of a [`DateRange`] the next pick will overwrite
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RangeEnd {
    #[default]
    Start,
    End,
}

impl RangeEnd {
    pub fn other(self) -> RangeEnd {
        match self {
            RangeEnd::Start => RangeEnd::End,
            RangeEnd::End => RangeEnd::Start,
        }
    }
}

impl fmt::Display for RangeEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeEnd::Start => write!(f, "start"),
            RangeEnd::End => write!(f, "end"),
        }
    }
}

/// Returns `true` iff both ends of `range` are set, both are valid dates, and
/// the start does not come after the end.  A single-day range is valid.
pub fn is_range_valid<A: DateAdapter>(adapter: &A, range: &DateRange<A::Date>) -> bool {
    match (&range.start, &range.end) {
        (Some(start), Some(end)) => {
            adapter.is_valid(start) && adapter.is_valid(end) && !adapter.is_before(end, start)
        }
        _ => false,
    }
}

/// Returns `true` if `date` lies within the closed interval spanned by
/// `range`.  Incomplete ranges only contain their set endpoint.
pub fn range_contains<A: DateAdapter>(
    adapter: &A,
    range: &DateRange<A::Date>,
    date: &A::Date,
) -> bool {
    match (&range.start, &range.end) {
        (Some(start), Some(end)) => !adapter.is_before(date, start) && !adapter.is_after(date, end),
        (Some(d), None) | (None, Some(d)) => adapter.is_equal(d, date),
        (None, None) => false,
    }
}
