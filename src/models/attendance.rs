//! Attendance records, owned by the attendance module and read by payroll.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attendance status for one employee on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Worked the day.
    #[serde(alias = "Present")]
    Present,
    /// Unjustified absence; deducted at the daily rate.
    #[serde(alias = "Absent")]
    Absent,
    /// Late arrival; forfeits the presence bonus but is not deducted.
    #[serde(alias = "Late")]
    Late,
    /// Approved leave; neither deducted nor penalized.
    #[serde(alias = "Leave")]
    Leave,
}

/// One attendance entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The day recorded.
    pub date: NaiveDate,
    /// What happened that day.
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// True for statuses that forfeit the presence bonus.
    pub fn is_penalizing(&self) -> bool {
        matches!(
            self.status,
            AttendanceStatus::Absent | AttendanceStatus::Late
        )
    }
}
