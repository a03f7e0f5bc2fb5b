//! Which month(s) the calendar displays, and when that changes
use crate::adapter::DateAdapter;
use crate::range::{DateRange, RangeEnd};
use crate::validation::ValidationProps;

/// Direction in which the month grid slides when the anchor month changes
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SlideDirection {
    /// Moving forwards in time
    #[default]
    Left,
    /// Moving backwards in time
    Right,
}

/// The displayed month(s) and the keyboard-focused day.
///
/// `current_month` is always the first day of the leftmost displayed month.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CalendarState<D> {
    pub current_month: D,
    pub focused_day: Option<D>,
    pub slide_direction: SlideDirection,
}

impl<D: Copy> CalendarState<D> {
    /// Anchors the calendar on the month of `value`, else on
    /// `default_month`, else on the current month
    pub fn new<A>(adapter: &A, value: Option<&D>, default_month: Option<&D>) -> CalendarState<D>
    where
        A: DateAdapter<Date = D>,
    {
        let today = adapter.today();
        let anchor = value.or(default_month).unwrap_or(&today);
        CalendarState {
            current_month: adapter.start_of_month(anchor),
            focused_day: Some(*value.unwrap_or(anchor)),
            slide_direction: SlideDirection::default(),
        }
    }

    /// Makes the month containing `date` the anchor month.  The focused day
    /// is kept if it lies in one of the displayed months (the anchor month
    /// and `trailing_months` after it) and is otherwise moved to the first
    /// of the anchor month.
    pub fn change_month<A>(&mut self, adapter: &A, date: &D, trailing_months: u8)
    where
        A: DateAdapter<Date = D>,
    {
        let new_month = adapter.start_of_month(date);
        self.slide_direction = if adapter.is_after(&new_month, &self.current_month) {
            SlideDirection::Left
        } else {
            SlideDirection::Right
        };
        self.current_month = new_month;
        if !self.focused_day.is_some_and(|day| {
            (0..=i32::from(trailing_months)).contains(&adapter.months_between(&new_month, &day))
        }) {
            self.focused_day = Some(new_month);
        }
    }

    pub fn change_focused_day(&mut self, day: Option<D>) {
        self.focused_day = day;
    }

    /// The anchor months of every displayed month, leftmost first
    pub fn visible_months<A>(&self, adapter: &A, trailing_months: u8) -> Vec<D>
    where
        A: DateAdapter<Date = D>,
    {
        (0..=trailing_months)
            .map(|i| adapter.add_months(&self.current_month, i.into()))
            .collect()
    }

    /// Returns `true` if the "previous month" control must be disabled
    /// because the month before the anchor contains no enabled day
    pub fn is_previous_month_disabled<A>(&self, adapter: &A, props: &ValidationProps<D>) -> bool
    where
        A: DateAdapter<Date = D>,
    {
        first_enabled_month(adapter, props)
            .is_some_and(|first| !adapter.is_before(&first, &self.current_month))
    }

    /// Returns `true` if the "next month" control must be disabled because
    /// the month after the last displayed month contains no enabled day
    pub fn is_next_month_disabled<A>(
        &self,
        adapter: &A,
        props: &ValidationProps<D>,
        trailing_months: u8,
    ) -> bool
    where
        A: DateAdapter<Date = D>,
    {
        let last_visible = adapter.add_months(&self.current_month, trailing_months.into());
        last_enabled_month(adapter, props)
            .is_some_and(|last| !adapter.is_after(&last, &last_visible))
    }
}

/// The earliest day that `min_date` and `disable_past` allow, or `None` if
/// there is no lower bound
pub fn first_enabled_day<A: DateAdapter>(
    adapter: &A,
    props: &ValidationProps<A::Date>,
) -> Option<A::Date> {
    let today = adapter.today();
    match (props.disable_past, props.min_date.as_ref()) {
        (true, Some(min)) if adapter.is_after(&today, min) => Some(today),
        (true, None) => Some(today),
        (_, Some(min)) => Some(*min),
        (false, None) => None,
    }
}

/// The latest day that `max_date` and `disable_future` allow, or `None` if
/// there is no upper bound
pub fn last_enabled_day<A: DateAdapter>(
    adapter: &A,
    props: &ValidationProps<A::Date>,
) -> Option<A::Date> {
    let today = adapter.today();
    match (props.disable_future, props.max_date.as_ref()) {
        (true, Some(max)) if adapter.is_before(&today, max) => Some(today),
        (true, None) => Some(today),
        (_, Some(max)) => Some(*max),
        (false, None) => None,
    }
}

/// The first month in which a day may be enabled, or `None` if there is no
/// lower bound
pub fn first_enabled_month<A: DateAdapter>(
    adapter: &A,
    props: &ValidationProps<A::Date>,
) -> Option<A::Date> {
    first_enabled_day(adapter, props).map(|day| adapter.start_of_month(&day))
}

/// The last month in which a day may be enabled, or `None` if there is no
/// upper bound
pub fn last_enabled_month<A: DateAdapter>(
    adapter: &A,
    props: &ValidationProps<A::Date>,
) -> Option<A::Date> {
    last_enabled_day(adapter, props).map(|day| adapter.start_of_month(&day))
}

/// Returns `true` if `date` falls outside the displayed months, which start
/// at `anchor` and continue for `trailing_months` further months of the same
/// year.  A date in a different year than the anchor is always outside.
pub fn is_outside_visible_months<A: DateAdapter>(
    adapter: &A,
    anchor: &A::Date,
    date: &A::Date,
    trailing_months: u8,
) -> bool {
    let anchor_month = adapter.month(anchor);
    let month = adapter.month(date);
    !adapter.is_same_year(anchor, date)
        || month < anchor_month
        || u16::from(month) > u16::from(anchor_month) + u16::from(trailing_months)
}

/// Inputs to [`month_to_reveal()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RevealRequest<'a, D> {
    pub selecting: RangeEnd,
    pub range: &'a DateRange<D>,
    /// The range as of the previous call, if any
    pub prev_range: Option<&'a DateRange<D>>,
    pub current_month: &'a D,
    pub trailing_months: u8,
    pub disable_auto_month_switching: bool,
}

/// Decides whether the displayed months must shift so that the endpoint
/// being edited is visible, returning the new anchor month if so.
///
/// When editing the start, the start's month becomes the anchor; when
/// editing the end, the anchor is chosen so that the end's month is the
/// last displayed month.  With auto switching disabled, nothing moves
/// unless the edited endpoint itself changed since the previous call.
pub fn month_to_reveal<A: DateAdapter>(adapter: &A, req: &RevealRequest<'_, A::Date>) -> Option<A::Date> {
    let date = req.range.get(req.selecting)?;
    if !adapter.is_valid(date) {
        return None;
    }
    if req.disable_auto_month_switching
        && req
            .prev_range
            .and_then(|prev| prev.get(req.selecting))
            .is_some_and(|prev| adapter.is_equal(prev, date))
    {
        return None;
    }
    if !is_outside_visible_months(adapter, req.current_month, date, req.trailing_months) {
        return None;
    }
    Some(match req.selecting {
        RangeEnd::Start => *date,
        RangeEnd::End => adapter.add_months(date, -i32::from(req.trailing_months)),
    })
}

/// Returns the anchor month that brings `day` into view by shifting the
/// displayed months as little as possible, or `None` if `day` is already
/// displayed
pub fn month_for_focus<A: DateAdapter>(
    adapter: &A,
    anchor: &A::Date,
    day: &A::Date,
    trailing_months: u8,
) -> Option<A::Date> {
    let offset = adapter.months_between(anchor, day);
    if offset < 0 {
        Some(adapter.start_of_month(day))
    } else if offset > i32::from(trailing_months) {
        Some(adapter.add_months(
            &adapter.start_of_month(day),
            -i32::from(trailing_months),
        ))
    } else {
        None
    }
}
