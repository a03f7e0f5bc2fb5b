//! User-facing strings of the range picker
use crate::adapter::{DateAdapter, DateFormat};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Locale {
    #[default]
    EnUs,
    ZhCn,
}

impl Locale {
    pub fn text(self) -> &'static LocaleText {
        match self {
            Locale::EnUs => &EN_US,
            Locale::ZhCn => &ZH_CN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::EnUs => write!(f, "en-US"),
            Locale::ZhCn => write!(f, "zh-CN"),
        }
    }
}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Locale, ParseLocaleError> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(Locale::EnUs),
            "zh" | "zh-cn" => Ok(Locale::ZhCn),
            _ => Err(ParseLocaleError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown locale {0:?}; expected \"en-US\" or \"zh-CN\"")]
pub struct ParseLocaleError(String);

/// Which view the calendar is switching away from
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CalendarView {
    Day,
    Month,
    Year,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LocaleText {
    pub previous_month: &'static str,
    pub next_month: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub cancel_button_label: &'static str,
    pub clear_button_label: &'static str,
    pub ok_button_label: &'static str,
    pub today_button_label: &'static str,
    pub date_range_toolbar_title: &'static str,
    year_view_open: &'static str,
    month_view_open: &'static str,
    day_view_open: &'static str,
    choose_date: &'static str,
    chosen_date_prefix: &'static str,
    chosen_date_separator: &'static str,
}

impl LocaleText {
    pub fn calendar_view_switching_label(&self, view: CalendarView) -> &'static str {
        match view {
            CalendarView::Year => self.year_view_open,
            CalendarView::Month => self.month_view_open,
            CalendarView::Day => self.day_view_open,
        }
    }

    /// Label for the control that opens the picker for `value`
    pub fn open_picker_dialogue<A: DateAdapter>(&self, adapter: &A, value: Option<&A::Date>) -> String {
        match value {
            Some(date) if adapter.is_valid(date) => format!(
                "{}{}{}{}",
                self.choose_date,
                self.chosen_date_separator,
                self.chosen_date_prefix,
                adapter.format(date, DateFormat::KeyboardDate)
            ),
            _ => self.choose_date.to_owned(),
        }
    }
}

const EN_TOOLBAR_TITLE: &str = "Select date range";

pub static EN_US: LocaleText = LocaleText {
    previous_month: "Previous month",
    next_month: "Next month",
    start: "Start",
    end: "End",
    cancel_button_label: "Cancel",
    clear_button_label: "Clear",
    ok_button_label: "OK",
    today_button_label: "Today",
    date_range_toolbar_title: EN_TOOLBAR_TITLE,
    year_view_open: "year view is open, switch to calendar view",
    month_view_open: "month view is open, switch to calendar view",
    day_view_open: "calendar view is open, switch to year view",
    choose_date: "Choose date",
    chosen_date_prefix: "selected date is ",
    chosen_date_separator: ", ",
};

// The toolbar title has no Chinese translation yet and stays in English.
pub static ZH_CN: LocaleText = LocaleText {
    previous_month: "上个月",
    next_month: "下个月",
    start: "开始",
    end: "结束",
    cancel_button_label: "取消",
    clear_button_label: "清除",
    ok_button_label: "确认",
    today_button_label: "今天",
    date_range_toolbar_title: EN_TOOLBAR_TITLE,
    year_view_open: "年视图已打开，切换为日历视图",
    month_view_open: "月视图已打开，切换为日历视图",
    day_view_open: "日历视图已打开，切换为年视图",
    choose_date: "选择日期",
    chosen_date_prefix: "已选择",
    chosen_date_separator: "，",
};
