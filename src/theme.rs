use ratatui::style::{Color, Modifier, Style};
use rangepick::picker::DayFlags;

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const ARROW_STYLE: Style = BASE_STYLE.fg(Color::LightCyan);

pub(crate) const DISABLED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const RANGE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

pub(crate) const ENDPOINT_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE.fg(Color::LightGreen);

pub(crate) const FOCUS_MODIFIER: Modifier = Modifier::REVERSED;

pub(crate) const ERROR_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) const EDITING_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED.union(Modifier::BOLD));

/// Style in which to draw a day of the month grid
pub(crate) fn day_style(flags: DayFlags) -> Style {
    let style = if flags.is_start || flags.is_end {
        ENDPOINT_STYLE
    } else if flags.in_range {
        RANGE_STYLE
    } else if flags.disabled {
        DISABLED_STYLE
    } else if flags.today {
        TODAY_STYLE
    } else {
        BASE_STYLE
    };
    if flags.focused {
        style.add_modifier(FOCUS_MODIFIER)
    } else {
        style
    }
}

pub(crate) mod grid {
    use super::*;

    pub(crate) const SELECTED_STYLE: Style = ENDPOINT_STYLE;

    pub(crate) const FOCUSED_STYLE: Style = BASE_STYLE.add_modifier(FOCUS_MODIFIER);
}

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_beats_range() {
        let flags = DayFlags {
            is_start: true,
            in_range: true,
            ..DayFlags::default()
        };
        assert_eq!(day_style(flags), ENDPOINT_STYLE);
    }

    #[test]
    fn test_focus_is_layered() {
        let flags = DayFlags {
            in_range: true,
            focused: true,
            ..DayFlags::default()
        };
        assert_eq!(day_style(flags), RANGE_STYLE.add_modifier(FOCUS_MODIFIER));
    }

    #[test]
    fn test_disabled_beats_today() {
        let flags = DayFlags {
            today: true,
            disabled: true,
            ..DayFlags::default()
        };
        assert_eq!(day_style(flags), DISABLED_STYLE);
    }
}
