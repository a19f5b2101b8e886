//! # kasl-time-core
//!
//! Deterministic time-tracking calculation core for a multi-tenant
//! workforce management system: pure daily/monthly calculators, rhythm
//! resolution, the daily calculation service, and the recalculation
//! cascade that keeps derived state consistent as bookings and
//! configuration change underneath it.
//!
//! ## Layout
//!
//! - [`model`] — the domain entities (`DayPlan`, `Tariff`, `Booking`,
//!   `DailyValue`, `MonthlyValue`, ...) and their opaque ids.
//! - [`calc`] — the pure calculators: [`calc::daily`] pairs bookings against
//!   a day plan, [`calc::monthly`] aggregates days and applies the
//!   flextime credit policy. Neither touches a repository.
//! - [`rhythm`] — resolves the day plan in effect for an employee on a
//!   given date from their tariff's rhythm and any manual override.
//! - [`repository`] — the collaborator traits the core depends on, plus a
//!   `sqlite` implementation.
//! - [`service`] — the daily calculation service and recalculation
//!   orchestrator that compose the above into the system's public
//!   operations.
//! - [`cli`] — the `kasl-timectl` command surface.
//! - [`config`] — process-wide engine settings.
//! - [`error`] — the core's error types.

pub mod calc;
pub mod cli;
pub mod config;
pub mod error;
pub mod libs;
pub mod model;
pub mod repository;
pub mod rhythm;
pub mod service;
