use super::util::{month_weeks, weekday_labels, WeekdayExt};
use crate::theme::{
    day_style, ARROW_STYLE, BASE_STYLE, DISABLED_STYLE, EDITING_STYLE, TITLE_STYLE, WEEKDAY_STYLE,
};
use rangepick::adapter::DateFormat;
use rangepick::config::WritingDirection;
use rangepick::{DateAdapter, RangeEnd, RangePicker, TimeAdapter};
use ratatui::layout::Flex;
use ratatui::{prelude::*, widgets::*};
use time::Date;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 3;

/// Width of a single month grid in columns
const MONTH_WIDTH: u16 = DAY_WIDTH * 7 - 1;

/// Columns between two adjacent month grids
const MONTH_GUTTER: u16 = 3;

/// Lines taken up by the month title and the weekday header
const MONTH_HEADER_LINES: u16 = 2;

/// Lines taken up by the toolbar, including the blank line below it
pub(super) const TOOLBAR_LINES: u16 = 3;

const PREV_ARROW: &str = "‹";
const NEXT_ARROW: &str = "›";

const UNSET_DATE: &str = "__________";

/// The toolbar (if enabled) and the displayed month grids of a picker
#[derive(Clone, Copy, Debug)]
pub(crate) struct Calendar<'a> {
    picker: &'a RangePicker<TimeAdapter>,
}

impl<'a> Calendar<'a> {
    pub(crate) fn new(picker: &'a RangePicker<TimeAdapter>) -> Calendar<'a> {
        Calendar { picker }
    }
}

impl Widget for Calendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let config = self.picker.config();
        let months = self.picker.visible_months();
        let qty = u16::try_from(months.len()).unwrap_or(1);
        let width = qty * MONTH_WIDTH + qty.saturating_sub(1) * MONTH_GUTTER;
        let mut top = 0;
        if config.toolbar_visible() {
            BufferCanvas::new(area, buf).draw_toolbar(self.picker);
            top = TOOLBAR_LINES;
        }
        let [area] = Layout::horizontal([width.min(area.width)])
            .flex(Flex::Center)
            .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        let rtl = config.direction == WritingDirection::Rtl;
        for (i, month) in std::iter::zip(0u16.., &months) {
            let slot = if rtl { qty - 1 - i } else { i };
            canvas.draw_month(top, slot * (MONTH_WIDTH + MONTH_GUTTER), month, self.picker);
        }
        let (left_disabled, right_disabled) = if rtl {
            (
                self.picker.is_next_month_disabled(),
                self.picker.is_previous_month_disabled(),
            )
        } else {
            (
                self.picker.is_previous_month_disabled(),
                self.picker.is_next_month_disabled(),
            )
        };
        let arrow_style = |disabled| if disabled { DISABLED_STYLE } else { ARROW_STYLE };
        canvas.mvprint(top, 0, PREV_ARROW, Some(arrow_style(left_disabled)));
        canvas.mvprint(top, width - 1, NEXT_ARROW, Some(arrow_style(right_disabled)));
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_toolbar(&mut self, picker: &RangePicker<TimeAdapter>) {
        let text = picker.config().locale.text();
        self.mvprint(0, 0, text.date_range_toolbar_title, Some(TITLE_STYLE));
        let adapter = picker.adapter();
        let mut x = 0;
        for (end, label) in [(RangeEnd::Start, text.start), (RangeEnd::End, text.end)] {
            let value = picker
                .range()
                .get(end)
                .map_or_else(|| UNSET_DATE.to_owned(), |d| adapter.format(d, DateFormat::KeyboardDate));
            let style = if picker.selecting() == end {
                EDITING_STYLE
            } else {
                BASE_STYLE
            };
            let s = format!("{label}: {value}");
            let width = u16::try_from(Span::raw(s.as_str()).width()).unwrap_or(u16::MAX);
            self.mvprint(1, x, s, Some(style));
            x = x.saturating_add(width).saturating_add(MONTH_GUTTER);
        }
    }

    fn draw_month(&mut self, top: u16, left: u16, month: &Date, picker: &RangePicker<TimeAdapter>) {
        let adapter = picker.adapter();
        let rtl = picker.config().direction == WritingDirection::Rtl;
        let column = |index: u16| {
            let index = if rtl { 6 - index } else { index };
            left + DAY_WIDTH * index
        };
        let title = adapter.format(month, DateFormat::MonthAndYear);
        let title_width = u16::try_from(title.len()).unwrap_or(MONTH_WIDTH);
        self.mvprint(
            top,
            left + MONTH_WIDTH.saturating_sub(title_width) / 2,
            title,
            Some(TITLE_STYLE),
        );
        for (i, label) in std::iter::zip(0u16.., weekday_labels(picker.config().locale)) {
            self.mvprint(top + 1, column(i), label, Some(WEEKDAY_STYLE));
        }
        for (row, week) in std::iter::zip(0u16.., month_weeks(*month)) {
            for day in week.into_iter().flatten() {
                let style = day_style(picker.day_flags(&day));
                self.mvprint(
                    top + MONTH_HEADER_LINES + row,
                    column(day.weekday().index0()),
                    format!("{:2}", day.day()),
                    Some(style),
                );
            }
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}
