use serde::{Deserialize, Serialize};

/// Status given to enrollments created without one.
pub const STATUS_PENDING: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: String,
    pub course_id: String,
    pub student_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub preferred_dates: Option<String>,
    /// Usually one of pending, confirmed or cancelled, but not restricted.
    pub status: String,
    pub notes: Option<String>,
}
