//! Turning a picked day into the next range
use crate::adapter::DateAdapter;
use crate::range::{is_range_valid, DateRange, RangeEnd};
use std::fmt;

/// The outcome of applying one picked day to a range
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RangeChange<D> {
    pub range: DateRange<D>,
    pub next_selecting: RangeEnd,
}

/// Whether a change left the range fully assembled
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Completion {
    /// Both ends are set, valid, and ordered
    Finish,
    /// The range is still being assembled or is invalid
    Partial,
}

impl Completion {
    pub fn of<A: DateAdapter>(adapter: &A, range: &DateRange<A::Date>) -> Completion {
        if is_range_valid(adapter, range) {
            Completion::Finish
        } else {
            Completion::Partial
        }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Finish => write!(f, "finish"),
            Completion::Partial => write!(f, "partial"),
        }
    }
}

/// Computes the range that results from picking `picked` while `selecting`
/// is the end being edited.
///
/// Picking a start that lies after the current end drops the end instead of
/// swapping the two; picking a start anywhere else keeps the end.  After a
/// start pick the end is always edited next.  Picking an end never moves the
/// selection back to the start, even when it produces a reversed range;
/// callers use [`Completion::of()`] to tell a finished range from an
/// unfinished one.
pub fn calculate_range_change<A: DateAdapter>(
    adapter: &A,
    range: &DateRange<A::Date>,
    selecting: RangeEnd,
    picked: A::Date,
) -> RangeChange<A::Date> {
    match selecting {
        RangeEnd::Start => {
            let end = range.end.filter(|end| !adapter.is_after(&picked, end));
            RangeChange {
                range: DateRange::new(Some(picked), end),
                next_selecting: RangeEnd::End,
            }
        }
        RangeEnd::End => RangeChange {
            range: DateRange::new(range.start, Some(picked)),
            next_selecting: RangeEnd::End,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::TimeAdapter;
    use time::macros::date;

    fn adapter() -> TimeAdapter {
        TimeAdapter::new(date!(2024 - 03 - 15))
    }

    #[test]
    fn test_first_start_pick() {
        let a = adapter();
        let change = calculate_range_change(
            &a,
            &DateRange::empty(),
            RangeEnd::Start,
            date!(2024 - 03 - 10),
        );
        assert_eq!(change.range, DateRange::new(Some(date!(2024 - 03 - 10)), None));
        assert_eq!(change.next_selecting, RangeEnd::End);
        assert_eq!(Completion::of(&a, &change.range), Completion::Partial);
    }

    #[test]
    fn test_later_end_pick_finishes() {
        let a = adapter();
        let range = DateRange::new(Some(date!(2024 - 03 - 10)), None);
        let change = calculate_range_change(&a, &range, RangeEnd::End, date!(2024 - 03 - 20));
        assert_eq!(
            change.range,
            DateRange::new(Some(date!(2024 - 03 - 10)), Some(date!(2024 - 03 - 20)))
        );
        assert_eq!(change.next_selecting, RangeEnd::End);
        assert_eq!(Completion::of(&a, &change.range), Completion::Finish);
    }

    #[test]
    fn test_earlier_end_pick_is_kept_reversed() {
        let a = adapter();
        let range = DateRange::new(Some(date!(2024 - 03 - 10)), None);
        let change = calculate_range_change(&a, &range, RangeEnd::End, date!(2024 - 03 - 05));
        assert_eq!(
            change.range,
            DateRange::new(Some(date!(2024 - 03 - 10)), Some(date!(2024 - 03 - 05)))
        );
        assert_eq!(change.next_selecting, RangeEnd::End);
        assert_eq!(Completion::of(&a, &change.range), Completion::Partial);
    }

    #[test]
    fn test_start_after_end_drops_end() {
        let a = adapter();
        let range = DateRange::new(Some(date!(2024 - 03 - 10)), Some(date!(2024 - 03 - 20)));
        let change = calculate_range_change(&a, &range, RangeEnd::Start, date!(2024 - 03 - 25));
        assert_eq!(change.range, DateRange::new(Some(date!(2024 - 03 - 25)), None));
        assert_eq!(change.next_selecting, RangeEnd::End);
        assert_eq!(Completion::of(&a, &change.range), Completion::Partial);
    }

    #[test]
    fn test_start_inside_valid_range_keeps_end() {
        let a = adapter();
        let range = DateRange::new(Some(date!(2024 - 03 - 10)), Some(date!(2024 - 03 - 20)));
        let change = calculate_range_change(&a, &range, RangeEnd::Start, date!(2024 - 03 - 15));
        assert_eq!(
            change.range,
            DateRange::new(Some(date!(2024 - 03 - 15)), Some(date!(2024 - 03 - 20)))
        );
        assert_eq!(change.next_selecting, RangeEnd::End);
    }

    #[test]
    fn test_start_before_valid_range_keeps_end() {
        let a = adapter();
        let range = DateRange::new(Some(date!(2024 - 03 - 10)), Some(date!(2024 - 03 - 20)));
        let change = calculate_range_change(&a, &range, RangeEnd::Start, date!(2024 - 02 - 01));
        assert_eq!(
            change.range,
            DateRange::new(Some(date!(2024 - 02 - 01)), Some(date!(2024 - 03 - 20)))
        );
    }

    #[test]
    fn test_start_equal_to_end_keeps_end() {
        let a = adapter();
        let range = DateRange::new(Some(date!(2024 - 03 - 10)), Some(date!(2024 - 03 - 20)));
        let change = calculate_range_change(&a, &range, RangeEnd::Start, date!(2024 - 03 - 20));
        assert_eq!(
            change.range,
            DateRange::new(Some(date!(2024 - 03 - 20)), Some(date!(2024 - 03 - 20)))
        );
        assert_eq!(Completion::of(&a, &change.range), Completion::Finish);
    }

    #[test]
    fn test_end_pick_without_start() {
        let a = adapter();
        let change = calculate_range_change(
            &a,
            &DateRange::empty(),
            RangeEnd::End,
            date!(2024 - 03 - 20),
        );
        assert_eq!(change.range, DateRange::new(None, Some(date!(2024 - 03 - 20))));
        assert_eq!(Completion::of(&a, &change.range), Completion::Partial);
    }
}
