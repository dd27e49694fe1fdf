pub mod records;

pub use records::{create_record, list_records};
