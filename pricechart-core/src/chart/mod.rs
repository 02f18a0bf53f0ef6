//! Chart transform core: range filtering, shared date axis, gap-preserving
//! alignment, presence check, tooltip rows, and an explicit build memo.
//!
//! Everything here is a pure, synchronous function of its inputs.

pub mod align;
pub mod axis;
pub mod build;
pub mod memo;
pub mod presence;
pub mod range;
pub mod tooltip;

pub use align::{align_all, align_series};
pub use axis::build_date_axis;
pub use build::{build_chart_series, ChartData};
pub use memo::{ChartMemo, MemoKey};
pub use presence::has_renderable_data;
pub use range::{filter_history, parse_bound, DateRange};
pub use tooltip::{format_tooltip, round_cents, tooltip_for_date, Tooltip, TooltipRow};
