mod date;
mod datetime;

pub use date::Date;
pub use datetime::DateTime;
