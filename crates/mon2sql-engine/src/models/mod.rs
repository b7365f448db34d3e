pub mod record;
pub mod value;

pub use record::{Record, SOURCE_TABLE_NAME};
pub use value::{FieldValue, Timestamp};
