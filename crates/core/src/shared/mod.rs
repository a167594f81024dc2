pub mod constants;
pub mod staging;
