mod units;
mod util;
mod widget;
pub(crate) use self::units::UnitGrid;
pub(crate) use self::widget::Calendar;
