//! Ledger categories and the shape each one has.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the financial record types kept by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerCategory {
    /// Monthly salary paid to a priest
    Salary,
    /// Monthly house rent paid on behalf of a priest
    HouseRent,
    /// Insurance premium, one row per insurance type
    Insurance,
    /// Loan record, one row per loan status
    Loan,
    /// International transfer to a province
    FundTransfer,
    /// Donation received from a free-text sender
    Donation,
}

/// Granularity of a ledger's `period` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Normalized to the first day of the month, unique per subject
    Month,
    /// A specific date, several rows per date allowed
    Day,
}

/// Who a ledger record is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    /// A row in `priests`
    Priest,
    /// A row in `provinces`
    Province,
    /// No subject reference (free-text sender)
    None,
}

impl LedgerCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 6] = [
        Self::Salary,
        Self::HouseRent,
        Self::Insurance,
        Self::Loan,
        Self::FundTransfer,
        Self::Donation,
    ];

    /// Stable identifier used in logs and translation keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::HouseRent => "house_rent",
            Self::Insurance => "insurance",
            Self::Loan => "loan",
            Self::FundTransfer => "fund_transfer",
            Self::Donation => "donation",
        }
    }

    #[must_use]
    pub const fn granularity(self) -> Granularity {
        match self {
            Self::FundTransfer | Self::Donation => Granularity::Day,
            Self::Salary | Self::HouseRent | Self::Insurance | Self::Loan => Granularity::Month,
        }
    }

    #[must_use]
    pub const fn subject_kind(self) -> SubjectKind {
        match self {
            Self::FundTransfer => SubjectKind::Province,
            Self::Donation => SubjectKind::None,
            Self::Salary | Self::HouseRent | Self::Insurance | Self::Loan => SubjectKind::Priest,
        }
    }

    /// Inclusive range of valid discriminator values, if the ledger has one.
    #[must_use]
    pub const fn discriminator_range(self) -> Option<(i32, i32)> {
        match self {
            Self::Insurance => Some((1, 5)),
            Self::Loan => Some((1, 4)),
            _ => None,
        }
    }
}

impl fmt::Display for LedgerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
