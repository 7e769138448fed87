mod field;
mod models;

pub use field::{DEFAULT_CLASS_NAME, Field, FieldValues, Required};
pub use models::{Form, StatusCheck};
