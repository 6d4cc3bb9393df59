//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod announcement;
pub mod donation;
pub mod fund_transfer;
pub mod house_rent;
pub mod insurance;
pub mod loan;
pub mod priest;
pub mod province;
pub mod salary;

// Re-export specific types to avoid conflicts
pub use announcement::{
    Column as AnnouncementColumn, Entity as Announcement, Model as AnnouncementModel,
};
pub use donation::{Column as DonationColumn, Entity as Donation, Model as DonationModel};
pub use fund_transfer::{
    Column as FundTransferColumn, Entity as FundTransfer, Model as FundTransferModel,
};
pub use house_rent::{Column as HouseRentColumn, Entity as HouseRent, Model as HouseRentModel};
pub use insurance::{Column as InsuranceColumn, Entity as Insurance, Model as InsuranceModel};
pub use loan::{Column as LoanColumn, Entity as Loan, Model as LoanModel};
pub use priest::{Column as PriestColumn, Entity as Priest, Model as PriestModel};
pub use province::{Column as ProvinceColumn, Entity as Province, Model as ProvinceModel};
pub use salary::{Column as SalaryColumn, Entity as Salary, Model as SalaryModel};
