pub mod euler;
pub mod query;
