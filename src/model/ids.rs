//! Opaque 128-bit identifiers for every entity in the calculation core.
//!
//! Every id in the data model (spec §3) is a 128-bit opaque value. We model
//! each one as a distinct newtype over [`uuid::Uuid`] so that, for example, a
//! `TenantId` can never be passed where an `EmployeeId` is expected, even
//! though both are backed by the same 16 bytes.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! opaque_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

opaque_id!(TenantId);
opaque_id!(EmployeeId);
opaque_id!(BookingId);
opaque_id!(BookingTypeId);
opaque_id!(DayPlanId);
opaque_id!(TariffId);
opaque_id!(AccountId);
opaque_id!(HolidayId);
opaque_id!(AbsenceTypeId);
opaque_id!(AbsenceDayId);
opaque_id!(UserId);
opaque_id!(DepartmentId);
opaque_id!(OrderId);
