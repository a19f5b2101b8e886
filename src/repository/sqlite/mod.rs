//! SQLite-backed implementations of the repository contracts (spec §4.6).
//!
//! Nested, variably-shaped configuration (day-plan breaks/bonuses, tariff
//! rhythm plans, shift-alternative windows) is stored as JSON columns
//! rather than fully normalized join tables — these are read-mostly,
//! whole-row documents from the calculation core's point of view, and
//! normalizing them would not buy query flexibility the core ever needs.

pub mod absences;
pub mod account_values;
pub mod bookings;
pub mod daily_values;
pub mod day_plans;
pub mod db;
pub mod employee_day_plans;
pub mod employees;
pub mod holidays;
pub mod migrations;
pub mod monthly_values;
pub mod tariffs;

pub use db::SqliteDb;
