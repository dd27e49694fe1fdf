pub mod course;
pub mod enrollment;

use serde::{Deserialize, Serialize};

pub use course::Course;
pub use enrollment::Enrollment;

/// Body returned by the create endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedRecord {
    pub id: String,
}
