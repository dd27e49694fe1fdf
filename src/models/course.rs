use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub modality: Option<String>,
    pub duration_hours: Option<i64>,
    pub price: f64,
    pub seats: Option<i64>,
    pub is_published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}
