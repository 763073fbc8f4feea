//! Record forms for the table's create and edit surfaces

pub mod record;

pub use record::{FieldKind, FormField, RecordForm};
