mod aggregate;
mod filter;

pub use aggregate::aggregate;
pub use filter::filter_records;
