//! Booking and booking-type entities (spec §3.1).

use crate::model::ids::{BookingId, BookingTypeId, EmployeeId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a clock event relative to work.
///
/// `BREAK_START`/`BREAK_END` invert the usual in/out sense: a break *start*
/// is an `Out` event (the employee leaves work) and a break *end* is an
/// `In` event (spec §3.1, `BookingType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Work,
    Break,
    BusinessTrip,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingSource {
    Web,
    Terminal,
    Api,
    Import,
    Correction,
}

/// Classifies a booking: direction, category, and optional account posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingType {
    pub id: BookingTypeId,
    pub code: String,
    pub direction: Direction,
    pub category: Category,
    pub account: Option<crate::model::ids::AccountId>,
    pub requires_reason: bool,
    pub is_system: bool,
}

impl BookingType {
    pub fn come() -> Self {
        Self {
            id: BookingTypeId::new(),
            code: "COME".into(),
            direction: Direction::In,
            category: Category::Work,
            account: None,
            requires_reason: false,
            is_system: true,
        }
    }

    pub fn go() -> Self {
        Self {
            id: BookingTypeId::new(),
            code: "GO".into(),
            direction: Direction::Out,
            category: Category::Work,
            account: None,
            requires_reason: false,
            is_system: true,
        }
    }

    pub fn break_start() -> Self {
        Self {
            id: BookingTypeId::new(),
            code: "BREAK_START".into(),
            direction: Direction::Out,
            category: Category::Break,
            account: None,
            requires_reason: false,
            is_system: true,
        }
    }

    pub fn break_end() -> Self {
        Self {
            id: BookingTypeId::new(),
            code: "BREAK_END".into(),
            direction: Direction::In,
            category: Category::Break,
            account: None,
            requires_reason: false,
            is_system: true,
        }
    }
}

/// A recorded clock event (spec §3.1, `Booking`).
///
/// `0 ≤ original_time, edited_time < 1440` is an invariant enforced by
/// [`Booking::new`] and [`Booking::edit_time`]; `calculated_time` is cleared
/// whenever `edited_time` changes, also enforced by `edit_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub employee: EmployeeId,
    pub date: NaiveDate,
    pub booking_type: BookingType,
    pub original_time: u16,
    pub edited_time: u16,
    pub calculated_time: Option<u16>,
    pub pair_id: Option<BookingId>,
    pub source: BookingSource,
    pub terminal_id: Option<String>,
    pub booking_reason: Option<String>,
}

impl Booking {
    pub fn new(employee: EmployeeId, date: NaiveDate, booking_type: BookingType, time: u16, source: BookingSource) -> Self {
        assert!(time < 1440, "booking time must be within [0, 1440)");
        Self {
            id: BookingId::new(),
            employee,
            date,
            booking_type,
            original_time: time,
            edited_time: time,
            calculated_time: None,
            pair_id: None,
            source,
            terminal_id: None,
            booking_reason: None,
        }
    }

    /// Edits the clock time, clearing any previously computed
    /// `calculated_time` per the invariant in spec §3.1.
    pub fn edit_time(&mut self, new_time: u16) {
        assert!(new_time < 1440, "booking time must be within [0, 1440)");
        self.edited_time = new_time;
        self.calculated_time = None;
    }

    pub fn direction(&self) -> Direction {
        self.booking_type.direction
    }

    pub fn category(&self) -> Category {
        self.booking_type.category
    }
}
