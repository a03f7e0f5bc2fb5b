//! State machine for a calendar-based date range picker.
//!
//! The picker lets a user choose a `[start, end]` pair of dates by clicking
//! (or keyboard-activating) days in one or more adjacent month grids.  It
//! decides which end a pick writes to, keeps the displayed months in step
//! with the end being edited, validates the range against min/max and
//! past/future restrictions, and reports every change to a host through the
//! [`PickerHost`](picker::PickerHost) callbacks.
//!
//! All date arithmetic goes through a [`DateAdapter`](adapter::DateAdapter),
//! so the picker works with any date type; [`TimeAdapter`](adapter::TimeAdapter)
//! implements it for [`time::Date`].
pub mod adapter;
pub mod config;
pub mod grid;
pub mod locale;
pub mod navigation;
pub mod picker;
pub mod range;
pub mod selection;
pub mod validation;

pub use crate::adapter::{DateAdapter, TimeAdapter};
pub use crate::config::PickerConfig;
pub use crate::picker::{PickerEvent, PickerHost, RangePicker};
pub use crate::range::{DateRange, RangeEnd};
