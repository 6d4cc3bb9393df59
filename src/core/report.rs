//! Plain-text formatting of ledger summaries.

use crate::core::{category::LedgerCategory, ledger::LedgerSummary, period::MonthRange};

/// One-line summary of a ledger over a month range.
///
/// # Examples
/// `salary 2024-01..2024-03: total 4500.00 across 3 records`
#[must_use]
pub fn format_ledger_summary(
    category: LedgerCategory,
    range: MonthRange,
    summary: &LedgerSummary,
) -> String {
    let noun = if summary.record_count == 1 {
        "record"
    } else {
        "records"
    };
    format!(
        "{category} {range}: total {:.2} across {} {noun}",
        summary.total_payout, summary.record_count
    )
}
