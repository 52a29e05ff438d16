//! Named payroll constants. These values are policy, not math: they are
//! pinned here so the computation modules never carry inline magic numbers.

/// Fallback when a caller supplies a missing or non-positive working-day
/// count for a month.
pub const DEFAULT_WORKING_DAYS: i32 = 30;

/// Divisor used to derive a per-day rate from monthly gross when pricing
/// unpaid leave. Fixed at 26 regardless of the calendar month.
pub const UNPAID_LEAVE_DIVISOR: f64 = 26.0;

/// Provident fund contribution, as a fraction of earned basic.
pub const PF_RATE: f64 = 0.12;

/// Employee state insurance, as a fraction of gross earnings.
pub const ESI_RATE: f64 = 0.0075;

/// Annual income below this threshold attracts no income tax.
pub const IT_ANNUAL_EXEMPTION: f64 = 250_000.0;

/// Flat rate applied to annual income above the exemption threshold.
pub const IT_SLAB_RATE: f64 = 0.10;

/// Professional tax, a flat monthly amount.
pub const PT_FLAT_AMOUNT: f64 = 200.0;

pub const MONTHS_PER_YEAR: f64 = 12.0;
