pub mod format;
pub mod string_ext;

pub use format::{format_count, format_threshold};
pub use string_ext::{collapse_and_truncate, identifier_parts, quote_identifier, strip_decoration};
