pub mod fixtures;

pub use fixtures::{EU_KEY, fixed_record, handler_tuple};
