//! Core business logic for the portal.
//!
//! Nothing in here knows about HTTP, sessions or rendering. Every operation
//! takes a `SeaORM` connection (and a [`clock::Clock`] where time matters) and
//! returns plain data or an [`crate::errors::Error`].

/// Role checks callers apply before invoking an operation
pub mod access;
/// Announcements: common and individual pools, time-windowed publication
pub mod announcement;
/// The six ledger categories and their static properties
pub mod category;
/// Injectable wall-clock
pub mod clock;
/// Priest dashboard assembled from the ledgers and announcements
pub mod dashboard;
/// Priest and province lookups
pub mod directory;
/// Donations received
pub mod donation;
/// Transfers to provinces
pub mod fund_transfer;
/// House rent paid per priest and month
pub mod house_rent;
/// Insurance premiums per priest, month and policy type
pub mod insurance;
/// Category-generic create, update, list and summary operations
pub mod ledger;
/// Loans per priest, month and status
pub mod loan;
/// Form input parsing helpers
pub mod numeric;
/// Month and month-range handling
pub mod period;
/// Text formatting of summaries
pub mod report;
/// Salary paid per priest and month
pub mod salary;
