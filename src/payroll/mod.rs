//! Pure payroll computation: no I/O lives here. The service layer feeds
//! these functions with rows loaded by the repositories.

pub mod constants;
pub mod deductions;
pub mod earnings;

pub use deductions::{resolve_deductions, DeductionSummary, ResolvedDeduction};
pub use earnings::{calculate_earnings, EarningsBreakdown};
