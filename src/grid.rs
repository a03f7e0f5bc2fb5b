//! Keyboard-navigable grids of months or years.
//!
//! A grid is a cyclic sequence of units (the twelve months of a year, or a
//! span of years) laid out in rows.  Arrow keys move the focus between
//! units, wrapping around at either end, and a move onto a disabled unit is
//! refused.  Activating a unit maps it onto an anchor date.
use crate::adapter::{DateAdapter, DateFormat};
use crate::config::WritingDirection;
use crate::navigation::{first_enabled_month, last_enabled_month};
use crate::validation::ValidationProps;
use std::fmt;
use std::rc::Rc;

/// Year shown first in a year grid when there is no minimum date
pub const DEFAULT_MIN_YEAR: i32 = 1900;

/// Year shown last in a year grid when there is no maximum date
pub const DEFAULT_MAX_YEAR: i32 = 2099;

const MONTHS_IN_YEAR: usize = 12;

const UNITS_PER_ROW: usize = 3;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GridKey {
    Up,
    Down,
    Left,
    Right,
}

/// A host-supplied predicate for months or years that may not be chosen
pub type ShouldDisableUnit<D> = Rc<dyn Fn(&D) -> bool>;

/// Computes the index that `key` moves the focus to from `index` in a cyclic
/// grid of `size` units with `row_width` units per row
pub fn step_index(
    index: usize,
    key: GridKey,
    size: usize,
    row_width: usize,
    direction: WritingDirection,
) -> usize {
    if size == 0 {
        return index;
    }
    let index = index % size;
    let row_width = row_width % size;
    let (back, forth) = match direction {
        WritingDirection::Ltr => (size - 1, 1),
        WritingDirection::Rtl => (1, size - 1),
    };
    match key {
        GridKey::Up => (size + index - row_width) % size,
        GridKey::Down => (size + index + row_width) % size,
        GridKey::Left => (index + back) % size,
        GridKey::Right => (index + forth) % size,
    }
}

/// One kind of unit that a [`GridSelector`] chooses between
pub trait GridField<A: DateAdapter> {
    fn unit_count(&self) -> usize;

    fn row_width(&self) -> usize {
        UNITS_PER_ROW
    }

    /// Index of the unit that `date` falls in, if any
    fn index_of(&self, adapter: &A, date: &A::Date) -> Option<usize>;

    /// Replaces the unit of `anchor` with the unit at `index`, keeping the
    /// anchor's other fields
    fn apply(&self, adapter: &A, anchor: &A::Date, index: usize) -> A::Date;

    fn is_disabled(&self, adapter: &A, date: &A::Date) -> bool;

    fn label(&self, adapter: &A, date: &A::Date) -> String;
}

/// The twelve months of a year
#[derive(Clone)]
pub struct MonthField<D> {
    props: ValidationProps<D>,
    should_disable_month: Option<ShouldDisableUnit<D>>,
}

impl<D> MonthField<D> {
    pub fn new(props: ValidationProps<D>) -> MonthField<D> {
        MonthField {
            props,
            should_disable_month: None,
        }
    }

    pub fn should_disable_month<F>(mut self, func: F) -> Self
    where
        F: Fn(&D) -> bool + 'static,
    {
        self.should_disable_month = Some(Rc::new(func));
        self
    }
}

impl<D: fmt::Debug> fmt::Debug for MonthField<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonthField")
            .field("props", &self.props)
            .field(
                "should_disable_month",
                &self.should_disable_month.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

impl<A: DateAdapter> GridField<A> for MonthField<A::Date> {
    fn unit_count(&self) -> usize {
        MONTHS_IN_YEAR
    }

    fn index_of(&self, adapter: &A, date: &A::Date) -> Option<usize> {
        Some(usize::from(adapter.month(date)))
    }

    fn apply(&self, adapter: &A, anchor: &A::Date, index: usize) -> A::Date {
        u8::try_from(index).map_or(*anchor, |month| adapter.set_month(anchor, month))
    }

    fn is_disabled(&self, adapter: &A, date: &A::Date) -> bool {
        let month = adapter.start_of_month(date);
        if first_enabled_month(adapter, &self.props)
            .is_some_and(|first| adapter.is_before(&month, &first))
        {
            return true;
        }
        if last_enabled_month(adapter, &self.props)
            .is_some_and(|last| adapter.is_after(&month, &last))
        {
            return true;
        }
        self.should_disable_month
            .as_ref()
            .is_some_and(|func| func(&month))
    }

    fn label(&self, adapter: &A, date: &A::Date) -> String {
        adapter.format(date, DateFormat::MonthShort)
    }
}

/// The years from the minimum date's year to the maximum date's year
#[derive(Clone)]
pub struct YearField<D> {
    first_year: i32,
    last_year: i32,
    props: ValidationProps<D>,
    should_disable_year: Option<ShouldDisableUnit<D>>,
}

impl<D> YearField<D> {
    pub fn new<A>(adapter: &A, props: ValidationProps<D>) -> YearField<D>
    where
        A: DateAdapter<Date = D>,
    {
        let first_year = props
            .min_date
            .as_ref()
            .map_or(DEFAULT_MIN_YEAR, |d| adapter.year(d));
        let last_year = props
            .max_date
            .as_ref()
            .map_or(DEFAULT_MAX_YEAR, |d| adapter.year(d))
            .max(first_year);
        YearField {
            first_year,
            last_year,
            props,
            should_disable_year: None,
        }
    }

    pub fn should_disable_year<F>(mut self, func: F) -> Self
    where
        F: Fn(&D) -> bool + 'static,
    {
        self.should_disable_year = Some(Rc::new(func));
        self
    }

    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    pub fn last_year(&self) -> i32 {
        self.last_year
    }
}

impl<D: fmt::Debug> fmt::Debug for YearField<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YearField")
            .field("first_year", &self.first_year)
            .field("last_year", &self.last_year)
            .field("props", &self.props)
            .field(
                "should_disable_year",
                &self.should_disable_year.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

impl<A: DateAdapter> GridField<A> for YearField<A::Date> {
    fn unit_count(&self) -> usize {
        usize::try_from(self.last_year - self.first_year + 1).unwrap_or(0)
    }

    fn index_of(&self, adapter: &A, date: &A::Date) -> Option<usize> {
        usize::try_from(adapter.year(date) - self.first_year)
            .ok()
            .filter(|&i| i < GridField::<A>::unit_count(self))
    }

    fn apply(&self, adapter: &A, anchor: &A::Date, index: usize) -> A::Date {
        i32::try_from(index).map_or(*anchor, |offset| {
            adapter.set_year(anchor, self.first_year + offset)
        })
    }

    fn is_disabled(&self, adapter: &A, date: &A::Date) -> bool {
        let today = adapter.today();
        let props = &self.props;
        (props.disable_past && adapter.is_before_year(date, &today))
            || (props.disable_future && adapter.is_after_year(date, &today))
            || props
                .min_date
                .as_ref()
                .is_some_and(|min| adapter.is_before_year(date, min))
            || props
                .max_date
                .as_ref()
                .is_some_and(|max| adapter.is_after_year(date, max))
            || self
                .should_disable_year
                .as_ref()
                .is_some_and(|func| func(date))
    }

    fn label(&self, adapter: &A, date: &A::Date) -> String {
        adapter.format(date, DateFormat::Year)
    }
}

/// How one unit of a grid should be presented
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridCell<D> {
    pub index: usize,
    pub date: D,
    pub label: String,
    pub selected: bool,
    pub focused: bool,
    pub disabled: bool,
}

/// Keyboard focus and selection over a [`GridField`]
#[derive(Clone, Debug)]
pub struct GridSelector<F> {
    field: F,
    focused: usize,
    selected: Option<usize>,
    has_focus: bool,
    read_only: bool,
}

impl<F> GridSelector<F> {
    /// Creates a selector whose focus starts on the unit of `value`, or on
    /// the current unit if there is no value.  The current unit counts as
    /// selected when there is no value unless `disable_highlight_today` is
    /// set.
    pub fn new<A>(
        adapter: &A,
        field: F,
        value: Option<&A::Date>,
        disable_highlight_today: bool,
    ) -> GridSelector<F>
    where
        A: DateAdapter,
        F: GridField<A>,
    {
        let today_index = field.index_of(adapter, &adapter.today());
        let selected = match value {
            Some(date) => field.index_of(adapter, date),
            None if disable_highlight_today => None,
            None => today_index,
        };
        GridSelector {
            focused: selected.or(today_index).unwrap_or(0),
            selected,
            field,
            has_focus: false,
            read_only: false,
        }
    }

    pub fn read_only(mut self, flag: bool) -> Self {
        self.read_only = flag;
        self
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn set_has_focus(&mut self, flag: bool) {
        self.has_focus = flag;
    }

    /// Moves the focus to `index` unless that unit is disabled.  Returns
    /// whether the focus moved.
    pub fn focus<A>(&mut self, adapter: &A, anchor: &A::Date, index: usize) -> bool
    where
        A: DateAdapter,
        F: GridField<A>,
    {
        if index >= self.field.unit_count() {
            return false;
        }
        let date = self.field.apply(adapter, anchor, index);
        if self.field.is_disabled(adapter, &date) {
            log::trace!("Refusing to focus disabled grid unit {index}");
            return false;
        }
        self.focused = index;
        self.has_focus = true;
        true
    }

    /// Moves the focus in response to an arrow key.  Returns whether the
    /// focus moved; a move onto a disabled unit leaves the focus in place.
    pub fn handle_key<A>(
        &mut self,
        adapter: &A,
        anchor: &A::Date,
        key: GridKey,
        direction: WritingDirection,
    ) -> bool
    where
        A: DateAdapter,
        F: GridField<A>,
    {
        let target = step_index(
            self.focused,
            key,
            self.field.unit_count(),
            self.field.row_width(),
            direction,
        );
        self.focus(adapter, anchor, target)
    }

    /// Maps the unit at `index` onto `anchor` and returns the resulting date,
    /// which the host should treat as the new value.  Returns `None` if the
    /// selector is read-only or the unit is disabled.  The focus does not
    /// move.
    pub fn select<A>(&self, adapter: &A, anchor: &A::Date, index: usize) -> Option<A::Date>
    where
        A: DateAdapter,
        F: GridField<A>,
    {
        if self.read_only || index >= self.field.unit_count() {
            return None;
        }
        let date = self.field.apply(adapter, anchor, index);
        (!self.field.is_disabled(adapter, &date)).then_some(date)
    }

    /// Updates the selected unit after the value changed, bringing the focus
    /// along with it
    pub fn sync_value<A>(&mut self, adapter: &A, value: Option<&A::Date>)
    where
        A: DateAdapter,
        F: GridField<A>,
    {
        if let Some(index) = value.and_then(|date| self.field.index_of(adapter, date)) {
            self.selected = Some(index);
            self.focused = index;
        }
    }

    pub fn cells<A>(&self, adapter: &A, anchor: &A::Date) -> Vec<GridCell<A::Date>>
    where
        A: DateAdapter,
        F: GridField<A>,
    {
        (0..self.field.unit_count())
            .map(|index| {
                let date = self.field.apply(adapter, anchor, index);
                GridCell {
                    index,
                    label: self.field.label(adapter, &date),
                    selected: self.selected == Some(index),
                    focused: self.focused == index,
                    disabled: self.field.is_disabled(adapter, &date),
                    date,
                }
            })
            .collect()
    }
}
