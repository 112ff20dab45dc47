pub mod date_formatter;
pub mod format;
