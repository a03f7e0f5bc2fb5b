use crate::locale::Locale;
use crate::validation::ValidationProps;
use std::fmt;
use thiserror::Error;

/// How many months are shown side by side in the desktop layout
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Calendars {
    One,
    #[default]
    Two,
    Three,
}

impl Calendars {
    pub fn get(self) -> u8 {
        match self {
            Calendars::One => 1,
            Calendars::Two => 2,
            Calendars::Three => 3,
        }
    }
}

impl TryFrom<u8> for Calendars {
    type Error = CalendarsError;

    fn try_from(value: u8) -> Result<Calendars, CalendarsError> {
        match value {
            1 => Ok(Calendars::One),
            2 => Ok(Calendars::Two),
            3 => Ok(Calendars::Three),
            n => Err(CalendarsError(n)),
        }
    }
}

impl fmt::Display for Calendars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("number of calendars must be 1, 2, or 3, not {0}")]
pub struct CalendarsError(u8);

/// The layout the picker is presented in
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Viewport {
    #[default]
    Desktop,
    Mobile,
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Viewport::Desktop => write!(f, "desktop"),
            Viewport::Mobile => write!(f, "mobile"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WritingDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Host-supplied, read-only settings of a range picker
#[derive(Clone, Debug)]
pub struct PickerConfig<D> {
    pub validation: ValidationProps<D>,
    pub calendars: Calendars,
    pub viewport: Viewport,
    pub disable_auto_month_switching: bool,
    pub disable_highlight_today: bool,
    pub read_only: bool,
    pub direction: WritingDirection,
    pub show_toolbar: Option<bool>,
    pub locale: Locale,
    pub default_calendar_month: Option<D>,
}

impl<D> PickerConfig<D> {
    pub fn new() -> PickerConfig<D> {
        PickerConfig {
            validation: ValidationProps::new(),
            calendars: Calendars::default(),
            viewport: Viewport::default(),
            disable_auto_month_switching: false,
            disable_highlight_today: false,
            read_only: false,
            direction: WritingDirection::default(),
            show_toolbar: None,
            locale: Locale::default(),
            default_calendar_month: None,
        }
    }

    pub fn validation(mut self, validation: ValidationProps<D>) -> Self {
        self.validation = validation;
        self
    }

    pub fn calendars(mut self, calendars: Calendars) -> Self {
        self.calendars = calendars;
        self
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn disable_auto_month_switching(mut self, flag: bool) -> Self {
        self.disable_auto_month_switching = flag;
        self
    }

    pub fn disable_highlight_today(mut self, flag: bool) -> Self {
        self.disable_highlight_today = flag;
        self
    }

    pub fn read_only(mut self, flag: bool) -> Self {
        self.read_only = flag;
        self
    }

    pub fn direction(mut self, direction: WritingDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn show_toolbar(mut self, flag: bool) -> Self {
        self.show_toolbar = Some(flag);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn default_calendar_month(mut self, date: D) -> Self {
        self.default_calendar_month = Some(date);
        self
    }

    /// Number of months displayed after the anchor month
    pub fn trailing_months(&self) -> u8 {
        match self.viewport {
            Viewport::Mobile => 0,
            Viewport::Desktop => self.calendars.get() - 1,
        }
    }

    /// Whether the toolbar with the start/end labels is displayed.  Unless
    /// set explicitly, it is hidden on desktop.
    pub fn toolbar_visible(&self) -> bool {
        self.show_toolbar
            .unwrap_or(self.viewport != Viewport::Desktop)
    }
}

impl<D> Default for PickerConfig<D> {
    fn default() -> PickerConfig<D> {
        PickerConfig::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendars_try_from() {
        assert_eq!(Calendars::try_from(1), Ok(Calendars::One));
        assert_eq!(Calendars::try_from(3), Ok(Calendars::Three));
        let err = Calendars::try_from(4).unwrap_err();
        assert_eq!(err.to_string(), "number of calendars must be 1, 2, or 3, not 4");
        assert!(Calendars::try_from(0).is_err());
    }

    #[test]
    fn test_trailing_months() {
        let config = PickerConfig::<()>::new().calendars(Calendars::Three);
        assert_eq!(config.trailing_months(), 2);
        let config = config.viewport(Viewport::Mobile);
        assert_eq!(config.trailing_months(), 0);
        let config = PickerConfig::<()>::new().calendars(Calendars::One);
        assert_eq!(config.trailing_months(), 0);
    }

    #[test]
    fn test_toolbar_defaults_by_viewport() {
        let config = PickerConfig::<()>::new();
        assert!(!config.toolbar_visible());
        let config = config.viewport(Viewport::Mobile);
        assert!(config.toolbar_visible());
        let config = config.show_toolbar(false);
        assert!(!config.toolbar_visible());
    }
}
