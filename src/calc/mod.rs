//! Stateless calculation engines (spec §4.2, §4.3). Neither module performs
//! I/O; both are free to call from any thread (spec §5 "Scheduling model").

pub mod daily;
pub mod monthly;
