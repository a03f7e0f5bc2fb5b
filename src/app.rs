use crate::calendar::{Calendar, UnitGrid};
use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::{BASE_STYLE, ERROR_STYLE};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use rangepick::adapter::DateFormat;
use rangepick::config::{Viewport, WritingDirection};
use rangepick::grid::{GridField, GridKey, GridSelector, MonthField, YearField};
use rangepick::locale::CalendarView;
use rangepick::picker::{DayKey, PickerEvent, PickerHost};
use rangepick::selection::Completion;
use rangepick::validation::RangeValidation;
use rangepick::{DateAdapter, DateRange, RangeEnd, RangePicker, TimeAdapter};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
    DefaultTerminal,
};
use std::io::{self, Write};
use time::Date;

#[derive(Clone, Debug)]
pub(crate) struct App {
    picker: RangePicker<TimeAdapter>,
    status: Status,
    state: AppState,
}

impl App {
    pub(crate) fn new(picker: RangePicker<TimeAdapter>) -> App {
        let text = picker.config().locale.text();
        let status = Status {
            message: Some(text.open_picker_dialogue(picker.adapter(), picker.range().start.as_ref())),
            error: None,
        };
        App {
            picker,
            status,
            state: AppState::Calendar,
        }
    }

    /// Runs the picker until the user quits.  Returns the range if the user
    /// accepted one.
    pub(crate) fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<Option<DateRange<Date>>> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(match self.state {
            AppState::Quitting { accepted: true } => Some(*self.picker.range()),
            _ => None,
        })
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(&mut *self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting { accepted: false };
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        let direction = self.picker.config().direction;
        let anchor = self.picker.calendar().current_month;
        match &mut self.state {
            AppState::Calendar => self.handle_calendar_key(key),
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => state.handle_input(JumpToInput::Negative),
                        KeyCode::Char('+') => state.handle_input(JumpToInput::Positive),
                        KeyCode::Char(c @ '0'..='9') => match c.to_digit(10).map(u8::try_from) {
                            Some(Ok(d)) => state.handle_input(JumpToInput::Digit(d)),
                            _ => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(date) => {
                            self.state = AppState::Calendar;
                            self.dispatch(PickerEvent::FocusDay(date));
                            true
                        }
                    }
                }
            }
            AppState::Months(selector) => {
                match unit_grid_key(selector, self.picker.adapter(), &anchor, key, direction) {
                    UnitGridOutput::Moved(ok) => ok,
                    UnitGridOutput::Close => {
                        self.state = AppState::Calendar;
                        true
                    }
                    UnitGridOutput::Chose(date) => {
                        self.state = AppState::Calendar;
                        self.dispatch(PickerEvent::ChangeMonth(date));
                        true
                    }
                }
            }
            AppState::Years(selector) => {
                match unit_grid_key(selector, self.picker.adapter(), &anchor, key, direction) {
                    UnitGridOutput::Moved(ok) => ok,
                    UnitGridOutput::Close => {
                        self.state = AppState::Calendar;
                        true
                    }
                    UnitGridOutput::Chose(date) => {
                        // Continue on to the month of the chosen year
                        self.dispatch(PickerEvent::ChangeMonth(date));
                        self.open_month_view();
                        true
                    }
                }
            }
            AppState::Quitting { .. } => false,
        }
    }

    fn handle_calendar_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('h') | KeyCode::Left => self.move_focus(DayKey::Left),
            KeyCode::Char('l') | KeyCode::Right => self.move_focus(DayKey::Right),
            KeyCode::Char('k') | KeyCode::Up => self.move_focus(DayKey::Up),
            KeyCode::Char('j') | KeyCode::Down => self.move_focus(DayKey::Down),
            KeyCode::PageUp => self.move_focus(DayKey::PageUp),
            KeyCode::PageDown => self.move_focus(DayKey::PageDown),
            KeyCode::Char('<' | ',') => self.previous_month(),
            KeyCode::Char('>' | '.') => self.next_month(),
            KeyCode::Enter | KeyCode::Char(' ') => self.pick_focused_day(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.dispatch(PickerEvent::SetSelectingEnd(self.picker.selecting().other()));
                true
            }
            KeyCode::Char('s') => {
                self.dispatch(PickerEvent::SetSelectingEnd(RangeEnd::Start));
                true
            }
            KeyCode::Char('e') => {
                self.dispatch(PickerEvent::SetSelectingEnd(RangeEnd::End));
                true
            }
            KeyCode::Char('t') => {
                let today = self.picker.adapter().today();
                self.dispatch(PickerEvent::FocusDay(today));
                true
            }
            KeyCode::Char('c') => self.clear(),
            KeyCode::Char('o') => self.accept(),
            KeyCode::Char('m') => {
                self.open_month_view();
                true
            }
            KeyCode::Char('y') => {
                self.open_year_view();
                true
            }
            KeyCode::Char('g') => {
                self.state = AppState::Jumping(JumpToState::new());
                true
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state = AppState::Quitting { accepted: false };
                true
            }
            KeyCode::Char('?') => {
                self.state = AppState::Helping;
                true
            }
            _ => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        matches!(self.state, AppState::Quitting { .. })
    }

    fn dispatch(&mut self, event: PickerEvent<Date>) {
        self.picker.dispatch(event, &mut self.status);
    }

    fn move_focus(&mut self, key: DayKey) -> bool {
        self.dispatch(PickerEvent::MoveFocus(key));
        true
    }

    fn previous_month(&mut self) -> bool {
        if self.picker.is_previous_month_disabled() {
            false
        } else {
            self.dispatch(PickerEvent::PreviousMonth);
            true
        }
    }

    fn next_month(&mut self) -> bool {
        if self.picker.is_next_month_disabled() {
            false
        } else {
            self.dispatch(PickerEvent::NextMonth);
            true
        }
    }

    fn pick_focused_day(&mut self) -> bool {
        let Some(day) = self.picker.calendar().focused_day else {
            return false;
        };
        if self.picker.config().read_only || self.picker.is_day_disabled(&day) {
            return false;
        }
        self.dispatch(PickerEvent::PickDay(day));
        true
    }

    fn clear(&mut self) -> bool {
        if self.picker.config().read_only {
            return false;
        }
        self.dispatch(PickerEvent::SetValue(DateRange::empty()));
        self.dispatch(PickerEvent::SetSelectingEnd(RangeEnd::Start));
        true
    }

    fn accept(&mut self) -> bool {
        if self.picker.completion() == Completion::Finish && !self.picker.validation().has_error() {
            self.state = AppState::Quitting { accepted: true };
            true
        } else {
            false
        }
    }

    fn open_month_view(&mut self) {
        let config = self.picker.config();
        let mut selector = GridSelector::new(
            self.picker.adapter(),
            MonthField::new(config.validation.clone()),
            Some(&self.picker.calendar().current_month),
            config.disable_highlight_today,
        )
        .read_only(config.read_only);
        selector.set_has_focus(true);
        self.state = AppState::Months(selector);
    }

    fn open_year_view(&mut self) {
        let config = self.picker.config();
        let mut selector = GridSelector::new(
            self.picker.adapter(),
            YearField::new(self.picker.adapter(), config.validation.clone()),
            Some(&self.picker.calendar().current_month),
            config.disable_highlight_today,
        )
        .read_only(config.read_only);
        selector.set_has_focus(true);
        self.state = AppState::Years(selector);
    }

    fn status_line(&self) -> Line<'static> {
        let text = self.picker.config().locale.text();
        let view = match self.state {
            AppState::Months(_) => Some(CalendarView::Month),
            AppState::Years(_) => Some(CalendarView::Year),
            _ => None,
        };
        if let Some(view) = view {
            return Line::styled(text.calendar_view_switching_label(view), BASE_STYLE);
        }
        if let Some(error) = self.status.error {
            let mut spans = Vec::new();
            for (end, label) in [(RangeEnd::Start, text.start), (RangeEnd::End, text.end)] {
                if let Some(e) = error.get(end) {
                    if !spans.is_empty() {
                        spans.push(Span::styled("; ", ERROR_STYLE));
                    }
                    spans.push(Span::styled(format!("{label}: {e}"), ERROR_STYLE));
                }
            }
            Line::from(spans)
        } else {
            Line::styled(self.status.message.clone().unwrap_or_default(), BASE_STYLE)
        }
    }

    fn action_bar(&self) -> Line<'static> {
        let text = self.picker.config().locale.text();
        Line::styled(
            format!(
                "[c] {}  [t] {}  [o] {}  [q] {}",
                text.clear_button_label,
                text.today_button_label,
                text.ok_button_label,
                text.cancel_button_label
            ),
            BASE_STYLE,
        )
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, status_area, actions_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Calendar::new(&self.picker).render(cal_area, buf);
        self.status_line().render(status_area, buf);
        self.action_bar().render(actions_area, buf);
        let adapter = self.picker.adapter();
        let anchor = self.picker.calendar().current_month;
        let direction = self.picker.config().direction;
        match self.state {
            AppState::Helping => Help(BASE_STYLE).render(area, buf),
            AppState::Jumping(ref mut state) => JumpTo.render(area, buf, state),
            AppState::Months(ref selector) => {
                let cells = selector.cells(adapter, &anchor);
                let title = adapter.format(&anchor, DateFormat::Year);
                let row_width = GridField::<TimeAdapter>::row_width(selector.field());
                UnitGrid::new(&cells, &title, row_width, direction).render(cal_area, buf);
            }
            AppState::Years(ref selector) => {
                let cells = selector.cells(adapter, &anchor);
                let field = selector.field();
                let title = format!("{}–{}", field.first_year(), field.last_year());
                let row_width = GridField::<TimeAdapter>::row_width(field);
                UnitGrid::new(&cells, &title, row_width, direction).render(cal_area, buf);
            }
            AppState::Calendar | AppState::Quitting { .. } => (),
        }
    }
}

#[derive(Clone, Debug)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Months(GridSelector<MonthField<Date>>),
    Years(GridSelector<YearField<Date>>),
    Quitting { accepted: bool },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum UnitGridOutput {
    /// The focus moved (`true`) or the key was refused (`false`)
    Moved(bool),
    Close,
    Chose(Date),
}

fn unit_grid_key<F: GridField<TimeAdapter>>(
    selector: &mut GridSelector<F>,
    adapter: &TimeAdapter,
    anchor: &Date,
    key: KeyCode,
    direction: WritingDirection,
) -> UnitGridOutput {
    let grid_key = match key {
        KeyCode::Char('h') | KeyCode::Left => GridKey::Left,
        KeyCode::Char('l') | KeyCode::Right => GridKey::Right,
        KeyCode::Char('k') | KeyCode::Up => GridKey::Up,
        KeyCode::Char('j') | KeyCode::Down => GridKey::Down,
        KeyCode::Enter | KeyCode::Char(' ') => {
            return match selector.select(adapter, anchor, selector.focused()) {
                Some(date) => UnitGridOutput::Chose(date),
                None => UnitGridOutput::Moved(false),
            };
        }
        KeyCode::Char('q' | 'm' | 'y') | KeyCode::Esc => return UnitGridOutput::Close,
        _ => return UnitGridOutput::Moved(false),
    };
    UnitGridOutput::Moved(selector.handle_key(adapter, anchor, grid_key, direction))
}

/// Records the picker's notifications for display in the status line
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Status {
    message: Option<String>,
    error: Option<RangeValidation>,
}

impl PickerHost<Date> for Status {
    fn on_date_change(&mut self, range: &DateRange<Date>, viewport: Viewport, completion: Completion) {
        let show = |d: Option<Date>| d.map_or_else(|| String::from("?"), |d| d.to_string());
        log::info!("Range is now {range:?} ({completion}, {viewport})");
        self.message = Some(format!(
            "{} to {} ({completion})",
            show(range.start),
            show(range.end)
        ));
    }

    fn on_selecting_range_end_change(&mut self, end: RangeEnd) {
        self.message = Some(format!("Now picking the {end} date"));
    }

    fn on_error(&mut self, error: &RangeValidation) {
        self.error = Some(*error).filter(RangeValidation::has_error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangepick::config::Calendars;
    use rangepick::validation::ValidationProps;
    use rangepick::PickerConfig;
    use ratatui::buffer::Cell;
    use time::macros::date;
    use time::Weekday;

    fn app(config: PickerConfig<Date>) -> App {
        App::new(RangePicker::new(
            TimeAdapter::new(date!(2024 - 03 - 15)),
            config,
            DateRange::empty(),
        ))
    }

    fn render(app: &mut App) -> Buffer {
        let area = Rect::new(0, 0, 50, 14);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .filter_map(|x| buffer.cell((x, y)))
            .map(Cell::symbol)
            .collect()
    }

    #[test]
    fn test_pick_range_with_keyboard() {
        let mut app = app(PickerConfig::new());
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.picker.selecting(), RangeEnd::End);
        assert!(app.handle_key(KeyCode::Down));
        assert!(app.handle_key(KeyCode::Right));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(
            *app.picker.range(),
            DateRange::new(Some(date!(2024 - 03 - 15)), Some(date!(2024 - 03 - 23)))
        );
        assert_eq!(
            app.status.message.as_deref(),
            Some("2024-03-15 to 2024-03-23 (finish)")
        );
        assert!(app.handle_key(KeyCode::Char('o')));
        assert!(matches!(app.state, AppState::Quitting { accepted: true }));
    }

    #[test]
    fn test_accept_refused_when_incomplete() {
        let mut app = app(PickerConfig::new());
        assert!(app.handle_key(KeyCode::Enter));
        assert!(!app.handle_key(KeyCode::Char('o')));
        assert!(!app.quitting());
    }

    #[test]
    fn test_disabled_day_cannot_be_picked() {
        let props = ValidationProps::new()
            .should_disable_date(|date: &Date, _: RangeEnd| date.weekday() == Weekday::Saturday);
        let mut app = app(PickerConfig::new().validation(props));
        assert!(app.handle_key(KeyCode::Right));
        assert!(!app.handle_key(KeyCode::Enter));
        assert!(app.picker.range().is_empty());
    }

    #[test]
    fn test_clear_resets_to_start() {
        let mut app = app(PickerConfig::new());
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Enter);
        assert!(app.handle_key(KeyCode::Char('c')));
        assert!(app.picker.range().is_empty());
        assert_eq!(app.picker.selecting(), RangeEnd::Start);
    }

    #[test]
    fn test_error_in_status_line() {
        let mut app = app(PickerConfig::new());
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Enter);
        let buffer = render(&mut app);
        assert_eq!(
            row(&buffer, 12).trim_end(),
            "Start: start date is after end date; End: start date is after end date"
                .chars()
                .take(50)
                .collect::<String>()
                .trim_end()
        );
        assert_eq!(
            row(&buffer, 13).trim_end(),
            "[c] Clear  [t] Today  [o] OK  [q] Cancel"
        );
    }

    #[test]
    fn test_month_view_changes_month() {
        let mut app = app(PickerConfig::new().calendars(Calendars::One));
        assert!(app.handle_key(KeyCode::Char('m')));
        assert!(matches!(app.state, AppState::Months(_)));
        assert!(app.handle_key(KeyCode::Down));
        assert!(app.handle_key(KeyCode::Enter));
        assert!(matches!(app.state, AppState::Calendar));
        assert_eq!(app.picker.calendar().current_month, date!(2024 - 06 - 01));
    }

    #[test]
    fn test_month_view_status_line() {
        let mut app = app(PickerConfig::new());
        assert!(app.handle_key(KeyCode::Char('m')));
        let buffer = render(&mut app);
        assert_eq!(
            row(&buffer, 12).trim_end(),
            "month view is open, switch to calendar view"
        );
    }

    #[test]
    fn test_year_view_titled_with_year_span() {
        let mut app = app(PickerConfig::new());
        assert!(app.handle_key(KeyCode::Char('y')));
        let buffer = render(&mut app);
        assert!((0..12).any(|y| row(&buffer, y).contains(" 1900–2099 ")));
        assert_eq!(
            row(&buffer, 12).trim_end(),
            "year view is open, switch to calendar view"
        );
    }

    #[test]
    fn test_year_view_leads_to_month_view() {
        let mut app = app(PickerConfig::new().calendars(Calendars::One));
        assert!(app.handle_key(KeyCode::Char('y')));
        assert!(app.handle_key(KeyCode::Up));
        assert!(app.handle_key(KeyCode::Enter));
        assert!(matches!(app.state, AppState::Months(_)));
        assert_eq!(app.picker.calendar().current_month, date!(2021 - 03 - 01));
        assert!(app.handle_key(KeyCode::Esc));
        assert!(matches!(app.state, AppState::Calendar));
    }

    #[test]
    fn test_jump_to_focuses_date() {
        let mut app = app(PickerConfig::new().calendars(Calendars::One));
        assert!(app.handle_key(KeyCode::Char('g')));
        for c in "20250704".chars() {
            assert!(app.handle_key(KeyCode::Char(c)));
        }
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.picker.calendar().focused_day, Some(date!(2025 - 07 - 04)));
        assert_eq!(app.picker.calendar().current_month, date!(2025 - 07 - 01));
    }

    #[test]
    fn test_help_dismissed_by_any_key() {
        let mut app = app(PickerConfig::new());
        assert!(app.handle_key(KeyCode::Char('?')));
        assert!(app.handle_key(KeyCode::Char('x')));
        assert!(matches!(app.state, AppState::Calendar));
        assert!(!app.handle_key(KeyCode::Char('x')));
    }
}
