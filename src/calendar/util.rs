use rangepick::locale::Locale;
use time::{Date, Weekday};

pub(super) const DAYS_IN_WEEK: usize = 7;

pub(super) type Week = [Option<Date>; DAYS_IN_WEEK];

pub(super) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

/// Splits the month starting at `first` into Sunday-first weeks.  Slots
/// belonging to the neighboring months are `None`.
pub(super) fn month_weeks(first: Date) -> Vec<Week> {
    let mut weeks = Vec::with_capacity(6);
    let mut week = [None; DAYS_IN_WEEK];
    let mut day = Some(first);
    while let Some(d) = day.filter(|d| d.month() == first.month()) {
        let i = usize::from(d.weekday().index0());
        if let Some(slot) = week.get_mut(i) {
            *slot = Some(d);
        }
        if i == DAYS_IN_WEEK - 1 {
            weeks.push(std::mem::replace(&mut week, [None; DAYS_IN_WEEK]));
        }
        day = d.next_day();
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

/// Column headings for the weekdays, Sunday first
pub(super) fn weekday_labels(locale: Locale) -> [&'static str; DAYS_IN_WEEK] {
    match locale {
        Locale::EnUs => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
        Locale::ZhCn => ["日", "一", "二", "三", "四", "五", "六"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_month_starting_midweek() {
        let weeks = month_weeks(date!(2024 - 03 - 01));
        assert_eq!(weeks.len(), 6);
        assert_eq!(
            weeks[0],
            [
                None,
                None,
                None,
                None,
                None,
                Some(date!(2024 - 03 - 01)),
                Some(date!(2024 - 03 - 02))
            ]
        );
        assert_eq!(
            weeks[5],
            [Some(date!(2024 - 03 - 31)), None, None, None, None, None, None]
        );
    }

    #[test]
    fn test_month_filling_whole_weeks() {
        let weeks = month_weeks(date!(2015 - 02 - 01));
        assert_eq!(weeks.len(), 4);
        assert!(weeks.iter().flatten().all(Option::is_some));
        assert_eq!(weeks[3][6], Some(date!(2015 - 02 - 28)));
    }

    #[test]
    fn test_december_ends_at_year_boundary() {
        let weeks = month_weeks(date!(2024 - 12 - 01));
        let last = weeks.iter().flatten().flatten().last().copied();
        assert_eq!(last, Some(date!(2024 - 12 - 31)));
    }
}
