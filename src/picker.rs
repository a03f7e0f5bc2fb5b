//! The range picker as a whole: state plus an event dispatcher.
//!
//! Every user action is turned into a [`PickerEvent`] and handed to
//! [`RangePicker::dispatch()`], which updates the range, re-validates it,
//! recomputes the displayed months, and only then tells the host what
//! changed.  A host never observes a range whose displayed months have not
//! caught up with it.
use crate::adapter::DateAdapter;
use crate::config::{PickerConfig, Viewport, WritingDirection};
use crate::navigation::{
    first_enabled_day, last_enabled_day, month_for_focus, month_to_reveal, CalendarState,
    RevealRequest,
};
use crate::range::{range_contains, DateRange, RangeEnd};
use crate::selection::{calculate_range_change, Completion};
use crate::validation::{validate_date, validate_range, RangeValidation, ValidationTracker};

/// Keys that move the focused day of the day grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DayKey {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PickerEvent<D> {
    /// A day cell was clicked or activated
    PickDay(D),
    /// The user chose which end to edit, e.g. by clicking a toolbar label
    SetSelectingEnd(RangeEnd),
    /// The host replaced the value, e.g. to clear it
    SetValue(DateRange<D>),
    /// Display the month containing the given date first
    ChangeMonth(D),
    PreviousMonth,
    NextMonth,
    FocusDay(D),
    MoveFocus(DayKey),
}

/// Receives notifications from [`RangePicker::dispatch()`].
///
/// For a single event the methods are called at most once each, in the order
/// in which they are declared here.
pub trait PickerHost<D> {
    fn on_date_change(&mut self, _range: &DateRange<D>, _viewport: Viewport, _completion: Completion) {}

    fn on_selecting_range_end_change(&mut self, _end: RangeEnd) {}

    fn on_error(&mut self, _error: &RangeValidation) {}

    fn on_month_change(&mut self, _month: &D) {}
}

/// A host that ignores every notification
impl<D> PickerHost<D> for () {}

/// How a single day cell relates to the picker's state
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DayFlags {
    pub is_start: bool,
    pub is_end: bool,
    pub in_range: bool,
    pub today: bool,
    pub focused: bool,
    pub disabled: bool,
}

#[derive(Clone, Debug)]
pub struct RangePicker<A: DateAdapter> {
    adapter: A,
    config: PickerConfig<A::Date>,
    range: DateRange<A::Date>,
    selecting: RangeEnd,
    calendar: CalendarState<A::Date>,
    prev_range: Option<DateRange<A::Date>>,
    validation: ValidationTracker,
}

impl<A: DateAdapter> RangePicker<A> {
    pub fn new(adapter: A, config: PickerConfig<A::Date>, range: DateRange<A::Date>) -> Self {
        let calendar = CalendarState::new(
            &adapter,
            range.start.as_ref().or(range.end.as_ref()),
            config.default_calendar_month.as_ref(),
        );
        let mut picker = RangePicker {
            adapter,
            config,
            range,
            selecting: RangeEnd::Start,
            calendar,
            prev_range: None,
            validation: ValidationTracker::new(),
        };
        picker.reveal_edited_end();
        picker
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn config(&self) -> &PickerConfig<A::Date> {
        &self.config
    }

    pub fn range(&self) -> &DateRange<A::Date> {
        &self.range
    }

    pub fn selecting(&self) -> RangeEnd {
        self.selecting
    }

    pub fn calendar(&self) -> &CalendarState<A::Date> {
        &self.calendar
    }

    pub fn completion(&self) -> Completion {
        Completion::of(&self.adapter, &self.range)
    }

    /// Validates the current range against the configured restrictions
    pub fn validation(&self) -> RangeValidation {
        validate_range(&self.adapter, &self.range, &self.config.validation)
    }

    /// Returns `true` if `date` may not be picked for the end currently being
    /// edited.  Hosts should not dispatch [`PickerEvent::PickDay`] for such
    /// days.
    pub fn is_day_disabled(&self, date: &A::Date) -> bool {
        validate_date(&self.adapter, date, &self.config.validation, self.selecting).is_some()
    }

    /// The first day of each displayed month, leftmost first
    pub fn visible_months(&self) -> Vec<A::Date> {
        self.calendar
            .visible_months(&self.adapter, self.config.trailing_months())
    }

    pub fn is_previous_month_disabled(&self) -> bool {
        self.calendar
            .is_previous_month_disabled(&self.adapter, &self.config.validation)
    }

    pub fn is_next_month_disabled(&self) -> bool {
        self.calendar.is_next_month_disabled(
            &self.adapter,
            &self.config.validation,
            self.config.trailing_months(),
        )
    }

    pub fn day_flags(&self, date: &A::Date) -> DayFlags {
        let a = &self.adapter;
        let is_start = self.range.start.as_ref().is_some_and(|s| a.is_equal(s, date));
        let is_end = self.range.end.as_ref().is_some_and(|e| a.is_equal(e, date));
        DayFlags {
            is_start,
            is_end,
            in_range: range_contains(a, &self.range, date),
            today: !self.config.disable_highlight_today && a.is_equal(&a.today(), date),
            focused: self
                .calendar
                .focused_day
                .as_ref()
                .is_some_and(|f| a.is_equal(f, date)),
            disabled: self.is_day_disabled(date),
        }
    }

    /// Applies `event` and then notifies `host` of the resulting changes
    pub fn dispatch<H: PickerHost<A::Date>>(&mut self, event: PickerEvent<A::Date>, host: &mut H) {
        log::debug!("Dispatching {event:?}");
        match event {
            PickerEvent::PickDay(date) => self.pick_day(date, host),
            PickerEvent::SetSelectingEnd(end) => {
                if end == self.selecting {
                    return;
                }
                self.selecting = end;
                let month = self.reveal_edited_end();
                host.on_selecting_range_end_change(end);
                if let Some(month) = month {
                    host.on_month_change(&month);
                }
            }
            PickerEvent::SetValue(range) => {
                self.range = range;
                let error = self.revalidate();
                let month = self.reveal_edited_end();
                if let Some(error) = error {
                    host.on_error(&error);
                }
                if let Some(month) = month {
                    host.on_month_change(&month);
                }
            }
            PickerEvent::ChangeMonth(date) => {
                self.calendar
                    .change_month(&self.adapter, &date, self.config.trailing_months());
                host.on_month_change(&self.calendar.current_month);
            }
            PickerEvent::PreviousMonth => {
                if !self.is_previous_month_disabled() {
                    let date = self.adapter.add_months(&self.calendar.current_month, -1);
                    self.calendar.change_month(
                        &self.adapter,
                        &date,
                        self.config.trailing_months(),
                    );
                    host.on_month_change(&self.calendar.current_month);
                }
            }
            PickerEvent::NextMonth => {
                if !self.is_next_month_disabled() {
                    let date = self.adapter.add_months(&self.calendar.current_month, 1);
                    self.calendar.change_month(
                        &self.adapter,
                        &date,
                        self.config.trailing_months(),
                    );
                    host.on_month_change(&self.calendar.current_month);
                }
            }
            PickerEvent::FocusDay(date) => self.focus_day(date, host),
            PickerEvent::MoveFocus(key) => {
                let from = self
                    .calendar
                    .focused_day
                    .unwrap_or(self.calendar.current_month);
                let date = self.moved_focus(&from, key);
                self.focus_day(date, host);
            }
        }
    }

    fn pick_day<H: PickerHost<A::Date>>(&mut self, date: A::Date, host: &mut H) {
        if self.config.read_only {
            log::debug!("Ignoring pick on read-only picker");
            return;
        }
        let change = calculate_range_change(&self.adapter, &self.range, self.selecting, date);
        // A start pick never finishes a range, even one that is already valid
        let completion = match self.selecting {
            RangeEnd::Start => Completion::Partial,
            RangeEnd::End => Completion::of(&self.adapter, &change.range),
        };
        log::debug!(
            "Range changed from {:?} to {:?} ({completion}); next editing {}",
            self.range,
            change.range,
            change.next_selecting
        );
        self.range = change.range;
        let selecting_changed = change.next_selecting != self.selecting;
        self.selecting = change.next_selecting;
        self.calendar.change_focused_day(Some(date));
        let error = self.revalidate();
        let month = self.reveal_edited_end();
        host.on_date_change(&self.range, self.config.viewport, completion);
        if selecting_changed {
            host.on_selecting_range_end_change(self.selecting);
        }
        if let Some(error) = error {
            host.on_error(&error);
        }
        if let Some(month) = month {
            host.on_month_change(&month);
        }
    }

    fn focus_day<H: PickerHost<A::Date>>(&mut self, date: A::Date, host: &mut H) {
        let date = self.clamp_to_enabled(date);
        self.calendar.change_focused_day(Some(date));
        if let Some(anchor) = month_for_focus(
            &self.adapter,
            &self.calendar.current_month,
            &date,
            self.config.trailing_months(),
        ) {
            self.calendar
                .change_month(&self.adapter, &anchor, self.config.trailing_months());
            host.on_month_change(&self.calendar.current_month);
        }
    }

    /// Pulls `date` back within the `min_date`/`max_date`/past/future bounds
    fn clamp_to_enabled(&self, date: A::Date) -> A::Date {
        let a = &self.adapter;
        let props = &self.config.validation;
        let clamped = match (first_enabled_day(a, props), last_enabled_day(a, props)) {
            (Some(first), _) if a.is_before(&date, &first) => first,
            (_, Some(last)) if a.is_after(&date, &last) => last,
            _ => date,
        };
        if !a.is_equal(&clamped, &date) {
            log::debug!("Focus on {date:?} clamped to {clamped:?}");
        }
        clamped
    }

    fn moved_focus(&self, from: &A::Date, key: DayKey) -> A::Date {
        let a = &self.adapter;
        let forwards = match self.config.direction {
            WritingDirection::Ltr => 1,
            WritingDirection::Rtl => -1,
        };
        match key {
            DayKey::Up => a.add_days(from, -7),
            DayKey::Down => a.add_days(from, 7),
            DayKey::Left => a.add_days(from, -forwards),
            DayKey::Right => a.add_days(from, forwards),
            DayKey::PageUp => a.add_months(from, -1),
            DayKey::PageDown => a.add_months(from, 1),
        }
    }

    /// Re-validates the range and returns the result if it differs from the
    /// last reported one
    fn revalidate(&mut self) -> Option<RangeValidation> {
        let current = validate_range(&self.adapter, &self.range, &self.config.validation);
        let changed = self.validation.update(current);
        if let Some(v) = changed {
            log::debug!("Validation result changed to {v:?}");
        }
        changed
    }

    /// Shifts the displayed months so that the end being edited is visible
    /// and returns the new anchor month if they moved
    fn reveal_edited_end(&mut self) -> Option<A::Date> {
        let req = RevealRequest {
            selecting: self.selecting,
            range: &self.range,
            prev_range: self.prev_range.as_ref(),
            current_month: &self.calendar.current_month,
            trailing_months: self.config.trailing_months(),
            disable_auto_month_switching: self.config.disable_auto_month_switching,
        };
        let target = month_to_reveal(&self.adapter, &req);
        if self
            .range
            .get(self.selecting)
            .is_some_and(|d| self.adapter.is_valid(d))
        {
            self.prev_range = Some(self.range);
        }
        let target = target?;
        self.calendar
            .change_month(&self.adapter, &target, self.config.trailing_months());
        log::debug!(
            "Displayed months now start at {:?}",
            self.calendar.current_month
        );
        Some(self.calendar.current_month)
    }
}
