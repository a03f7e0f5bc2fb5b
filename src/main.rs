mod app;
mod calendar;
mod help;
mod jumpto;
mod theme;
use crate::app::App;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use rangepick::config::{Calendars, PickerConfig, Viewport, WritingDirection};
use rangepick::locale::Locale;
use rangepick::validation::ValidationProps;
use rangepick::{DateRange, RangeEnd, RangePicker, TimeAdapter};
use ratatui::DefaultTerminal;
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    Weekday,
};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    calendars: Calendars,
    min_date: Option<Date>,
    max_date: Option<Date>,
    disable_past: bool,
    disable_future: bool,
    disable_weekends: bool,
    disable_auto_month_switching: bool,
    disable_highlight_today: bool,
    mobile: bool,
    rtl: bool,
    read_only: bool,
    locale: Locale,
    log_file: Option<PathBuf>,
}

impl RunOptions {
    fn config(&self) -> PickerConfig<Date> {
        let mut validation = ValidationProps::new()
            .disable_past(self.disable_past)
            .disable_future(self.disable_future);
        if let Some(date) = self.min_date {
            validation = validation.min_date(date);
        }
        if let Some(date) = self.max_date {
            validation = validation.max_date(date);
        }
        if self.disable_weekends {
            validation = validation.should_disable_date(|date: &Date, _: RangeEnd| {
                matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
            });
        }
        let mut config = PickerConfig::new()
            .validation(validation)
            .calendars(self.calendars)
            .disable_auto_month_switching(self.disable_auto_month_switching)
            .disable_highlight_today(self.disable_highlight_today)
            .read_only(self.read_only)
            .locale(self.locale);
        if self.mobile {
            config = config.viewport(Viewport::Mobile);
        }
        if self.rtl {
            config = config.direction(WritingDirection::Rtl);
        }
        if let Some(date) = self.date {
            config = config.default_calendar_month(date);
        }
        config
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("calendars") => {
                    opts.calendars = parser.value()?.parse_with(
                        |s| -> Result<Calendars, Box<dyn Error + Send + Sync>> {
                            Ok(Calendars::try_from(s.parse::<u8>()?)?)
                        },
                    )?;
                }
                Arg::Long("min-date") => opts.min_date = Some(parse_date(&mut parser)?),
                Arg::Long("max-date") => opts.max_date = Some(parse_date(&mut parser)?),
                Arg::Long("disable-past") => opts.disable_past = true,
                Arg::Long("disable-future") => opts.disable_future = true,
                Arg::Long("disable-weekends") => opts.disable_weekends = true,
                Arg::Long("disable-auto-month-switching") => {
                    opts.disable_auto_month_switching = true;
                }
                Arg::Long("disable-highlight-today") => opts.disable_highlight_today = true,
                Arg::Long("mobile") => opts.mobile = true,
                Arg::Long("rtl") => opts.rtl = true,
                Arg::Long("read-only") => opts.read_only = true,
                Arg::Long("locale") => opts.locale = parser.value()?.parse()?,
                Arg::Long("log-file") => opts.log_file = Some(parser.value()?.into()),
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(value.parse_with(|s| Date::parse(s, YMD_FMT))?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(path) = &opts.log_file {
                    init_logging(path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                log::info!("Starting range picker; today is {today}");
                let picker =
                    RangePicker::new(TimeAdapter::new(today), opts.config(), DateRange::empty());
                let range = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(picker).run(terminal).context("failed to run picker")
                })?;
                match range {
                    Some(DateRange {
                        start: Some(start),
                        end: Some(end),
                    }) => println!("{start} {end}"),
                    _ => log::info!("No range accepted"),
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: rangepick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Pick a range of dates in the terminal and print it on acceptance");
                println!();
                println!("Options:");
                println!("  --calendars N                    Show N months side by side (1-3) [default: 2]");
                println!("  --min-date YYYY-MM-DD            Earliest date that may be picked");
                println!("  --max-date YYYY-MM-DD            Latest date that may be picked");
                println!("  --disable-past                   Disable dates before today");
                println!("  --disable-future                 Disable dates after today");
                println!("  --disable-weekends               Disable Saturdays and Sundays");
                println!("  --disable-auto-month-switching   Keep the displayed months when switching ends");
                println!("  --disable-highlight-today        Do not highlight today's date");
                println!("  --mobile                         Use the single-month layout with a toolbar");
                println!("  --rtl                            Lay out the calendar right to left");
                println!("  --read-only                      Display the calendar without allowing picks");
                println!("  --locale en-US|zh-CN             Language of the labels [default: en-US]");
                println!("  --log-file PATH                  Write debug logs to PATH");
                println!("  -h, --help                       Display this help message and exit");
                println!("  -V, --version                    Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_date(parser: &mut Parser) -> Result<Date, lexopt::Error> {
    parser.value()?.parse_with(|s| Date::parse(s, YMD_FMT))
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logging")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_no_args() {
        assert!(matches!(parse(&[]), Ok(Command::Run(opts)) if opts == RunOptions::default()));
    }

    #[test]
    fn test_all_options() {
        let Ok(Command::Run(opts)) = parse(&[
            "--calendars",
            "3",
            "--min-date",
            "2024-01-01",
            "--max-date=2024-12-31",
            "--disable-past",
            "--mobile",
            "--rtl",
            "--locale",
            "zh-CN",
            "2024-06-15",
        ]) else {
            panic!("options should parse");
        };
        assert_eq!(opts.calendars, Calendars::Three);
        assert_eq!(opts.min_date, Some(date!(2024 - 01 - 01)));
        assert_eq!(opts.max_date, Some(date!(2024 - 12 - 31)));
        assert_eq!(opts.date, Some(date!(2024 - 06 - 15)));
        assert_eq!(opts.locale, Locale::ZhCn);
        assert!(opts.disable_past && opts.mobile && opts.rtl);
        let config = opts.config();
        assert_eq!(config.trailing_months(), 0);
        assert_eq!(config.direction, WritingDirection::Rtl);
        assert_eq!(config.default_calendar_month, Some(date!(2024 - 06 - 15)));
    }

    #[test]
    fn test_bad_calendars() {
        assert!(parse(&["--calendars", "4"]).is_err());
        assert!(parse(&["--calendars", "two"]).is_err());
    }

    #[test]
    fn test_bad_date() {
        assert!(parse(&["2024-13-01"]).is_err());
        assert!(parse(&["2024-01-01", "2024-02-01"]).is_err());
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["--rtl", "-h"]).ok(), Some(Command::Help));
    }

    #[test]
    fn test_disable_weekends() {
        let opts = RunOptions {
            disable_weekends: true,
            ..RunOptions::default()
        };
        let config = opts.config();
        let picker = RangePicker::new(
            TimeAdapter::new(date!(2024 - 03 - 15)),
            config,
            DateRange::empty(),
        );
        assert!(picker.is_day_disabled(&date!(2024 - 03 - 16)));
        assert!(!picker.is_day_disabled(&date!(2024 - 03 - 15)));
    }
}
