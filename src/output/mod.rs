pub mod formatter;

pub use formatter::{format_detail, format_table, should_use_colors};
